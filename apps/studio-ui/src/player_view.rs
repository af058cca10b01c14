//! The video surface and its control bar.

use eframe::egui::{self, Color32, Rect, Sense, Vec2};
use studio_model::geometry::Point;
use studio_playback::{MediaElement, PlaybackSurface};

const CONTROL_BAR_HEIGHT: f32 = 44.0;

/// Layout result of one frame of the player.
pub struct PlayerOutput {
    /// Screen rect of the composition surface overlays are placed in.
    pub surface: Rect,
    /// The video body (not the control bar) was clicked, and the press did
    /// not start on an overlay.
    pub body_clicked: bool,
}

pub struct PlayerView {
    texture: Option<egui::TextureHandle>,
    frame_aspect: Option<f32>,
    fallback_aspect: f32,
    /// The current press started on an overlay; the player ignores it.
    press_on_overlay: bool,
}

impl PlayerView {
    pub fn new(fallback_aspect: f32) -> Self {
        Self {
            texture: None,
            frame_aspect: None,
            fallback_aspect,
            press_on_overlay: false,
        }
    }

    /// Whether a video frame has been shown yet.
    pub fn has_frame(&self) -> bool {
        self.texture.is_some()
    }

    /// Draw the player. `overlay_at` reports whether an overlay covers a
    /// surface-relative point; presses there belong to the overlay, not to
    /// the video body or the control bar beneath it.
    pub fn show<M: MediaElement>(
        &mut self,
        ui: &mut egui::Ui,
        player: &mut PlaybackSurface<M>,
        overlay_at: impl Fn(Point) -> bool,
    ) -> PlayerOutput {
        self.upload_latest_frame(ui.ctx(), player);

        let width = ui.available_width();
        let aspect = self.frame_aspect.unwrap_or(self.fallback_aspect);
        let (surface, body) =
            ui.allocate_exact_size(Vec2::new(width, width / aspect), Sense::click());

        let painter = ui.painter_at(surface);
        painter.rect_filled(surface, 8.0, Color32::BLACK);
        if let Some(texture) = self.texture.as_ref() {
            let video_rect = fit_centered(texture.size_vec2(), surface);
            painter.image(
                texture.id(),
                video_rect,
                Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        } else if let Some(error) = player.last_error() {
            painter.text(
                surface.center(),
                egui::Align2::CENTER_CENTER,
                format!("Video unavailable: {error}"),
                egui::FontId::proportional(14.0),
                Color32::from_gray(160),
            );
        }

        let bar = Rect::from_min_max(
            egui::pos2(surface.min.x, surface.max.y - CONTROL_BAR_HEIGHT),
            surface.max,
        );
        painter.rect_filled(bar, 0.0, Color32::from_black_alpha(160));

        let (pressed, pos) = ui.input(|i| (i.pointer.primary_pressed(), i.pointer.latest_pos()));
        if pressed {
            self.press_on_overlay = pos.filter(|p| surface.contains(*p)).is_some_and(|p| {
                overlay_at(Point::new(p.x - surface.min.x, p.y - surface.min.y))
            });
        }
        let accepts_input = !self.press_on_overlay;

        let body_clicked = accepts_input
            && body.clicked()
            && !body
                .interact_pointer_pos()
                .is_some_and(|p| bar.contains(p));

        ui.allocate_ui_at_rect(bar.shrink2(Vec2::new(16.0, 8.0)), |ui| {
            ui.horizontal_centered(|ui| {
                let play = egui::Button::new(
                    egui::RichText::new(player.play_label()).color(Color32::WHITE),
                )
                .fill(Color32::TRANSPARENT);
                if ui.add(play).clicked() && accepts_input {
                    if let Err(err) = player.toggle_play() {
                        tracing::warn!(error = %err, "play/pause failed");
                    }
                }

                let mute = egui::Button::new(
                    egui::RichText::new(player.mute_label()).color(Color32::WHITE),
                )
                .fill(Color32::TRANSPARENT);
                if ui.add(mute).clicked() && accepts_input {
                    if let Err(err) = player.toggle_mute() {
                        tracing::warn!(error = %err, "mute toggle failed");
                    }
                }

                let mut volume = player.volume();
                let slider = egui::Slider::new(&mut volume, 0.0..=1.0)
                    .step_by(studio_playback::VOLUME_STEP)
                    .show_value(false);
                let slider = ui.add_sized([96.0, 18.0], slider).on_hover_text("Volume");
                if slider.changed() && accepts_input {
                    if let Err(err) = player.set_volume(volume) {
                        tracing::warn!(error = %err, "volume change failed");
                    }
                }
            });
        });

        PlayerOutput {
            surface,
            body_clicked,
        }
    }

    fn upload_latest_frame<M: MediaElement>(
        &mut self,
        ctx: &egui::Context,
        player: &mut PlaybackSurface<M>,
    ) {
        let Some(frame) = player.poll_frame() else {
            return;
        };
        self.frame_aspect = frame.aspect_ratio().or(self.frame_aspect);
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [frame.width as usize, frame.height as usize],
            &frame.rgba,
        );
        match self.texture.as_mut() {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture =
                    Some(ctx.load_texture("video_frame", image, egui::TextureOptions::LINEAR));
            }
        }
    }
}

/// Largest rect with `content` aspect ratio centered inside `bounds`.
fn fit_centered(content: Vec2, bounds: Rect) -> Rect {
    if content.x <= 0.0 || content.y <= 0.0 {
        return bounds;
    }
    let scale = (bounds.width() / content.x).min(bounds.height() / content.y);
    Rect::from_center_size(bounds.center(), content * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_playback::DetachedMedia;

    fn frame(ctx: &egui::Context, events: Vec<egui::Event>, mut show: impl FnMut(&mut egui::Ui)) {
        let input = egui::RawInput {
            screen_rect: Some(Rect::from_min_size(egui::Pos2::ZERO, Vec2::new(800.0, 600.0))),
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| show(ui));
        });
    }

    fn button(pos: egui::Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::default(),
        }
    }

    /// Lay out the player once, then click the Play button. `covered` says
    /// whether an overlay sits over the button.
    fn click_play_button(covered: bool) -> bool {
        let ctx = egui::Context::default();
        let mut view = PlayerView::new(16.0 / 9.0);
        let mut player = PlaybackSurface::new(DetachedMedia::new(), "test://stream");
        let mut surface = Rect::NOTHING;

        frame(&ctx, vec![], |ui| {
            surface = view.show(ui, &mut player, |_| covered).surface;
        });
        let target = egui::pos2(surface.min.x + 26.0, surface.max.y - CONTROL_BAR_HEIGHT / 2.0);

        let steps = [
            vec![egui::Event::PointerMoved(target)],
            vec![button(target, true)],
            vec![button(target, false)],
            vec![],
        ];
        for events in steps {
            frame(&ctx, events, |ui| {
                view.show(ui, &mut player, |_| covered);
            });
        }
        player.sync();
        player.is_playing()
    }

    #[test]
    fn play_button_toggles_playback() {
        assert!(click_play_button(false));
    }

    #[test]
    fn press_on_overlay_over_control_bar_leaves_playback_alone() {
        assert!(!click_play_button(true));
    }

    #[test]
    fn has_frame_is_false_before_any_video() {
        assert!(!PlayerView::new(16.0 / 9.0).has_frame());
    }

    #[test]
    fn fit_centered_letterboxes_wide_content() {
        let bounds = Rect::from_min_size(egui::pos2(0.0, 0.0), Vec2::new(800.0, 600.0));
        let fitted = fit_centered(Vec2::new(1600.0, 900.0), bounds);
        assert!((fitted.width() - 800.0).abs() < 1e-3);
        assert!((fitted.height() - 450.0).abs() < 1e-3);
        assert!((fitted.center().y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn fit_centered_ignores_empty_content() {
        let bounds = Rect::from_min_size(egui::pos2(10.0, 10.0), Vec2::new(100.0, 50.0));
        assert_eq!(fit_centered(Vec2::ZERO, bounds), bounds);
    }
}
