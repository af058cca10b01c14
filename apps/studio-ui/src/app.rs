use std::time::Duration;

use eframe::egui::{self, Color32};
use studio_common::config::AppConfig;
use studio_model::geometry::{Point, Size};
use studio_model::panel::{AddOverlayForm, INSTRUCTIONS};
use studio_model::store::OverlayStore;
use studio_playback::{DetachedMedia, GstMediaElement, MediaElement, PlaybackSurface};

use crate::composition::Composition;
use crate::controls_view::show_controls;
use crate::overlay_view::show_overlays;
use crate::player_view::PlayerView;

pub struct StudioApp {
    config: AppConfig,
    composition: Composition,
    form: AddOverlayForm,
    player: PlaybackSurface<Box<dyn MediaElement>>,
    player_view: PlayerView,
    last_pointer: Option<egui::Pos2>,
}

impl StudioApp {
    pub fn new(config: AppConfig) -> Self {
        let media: Box<dyn MediaElement> = match GstMediaElement::open(config.stream_url.clone()) {
            Ok(element) => Box::new(element),
            Err(err) => {
                tracing::warn!(error = %err, "video playback unavailable; overlays still editable");
                Box::new(DetachedMedia::new())
            }
        };
        let player = PlaybackSurface::new(media, config.stream_url.clone());
        let player_view = PlayerView::new(config.surface.aspect_ratio);

        Self {
            config,
            composition: Composition::new(OverlayStore::new()),
            form: AddOverlayForm::new(),
            player,
            player_view,
            last_pointer: None,
        }
    }

    /// Route raw pointer input on the composition surface.
    ///
    /// Presses go to the topmost overlay; while a gesture is live, moves and
    /// releases are delivered wherever the pointer is.
    fn route_pointer(&mut self, ctx: &egui::Context, surface: egui::Rect) {
        let (pressed, released, down, pos) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.primary_down(),
                i.pointer.latest_pos(),
            )
        });
        let to_local = |p: egui::Pos2| Point::new(p.x - surface.min.x, p.y - surface.min.y);

        if pressed {
            if let Some(p) = pos.filter(|p| surface.contains(*p)) {
                self.composition.press(to_local(p));
            }
        }

        if self.composition.is_gesture_active() {
            if let Some(p) = pos.filter(|p| Some(*p) != self.last_pointer) {
                self.composition.pointer_moved(to_local(p));
            }
            if released || !down {
                self.composition.pointer_released();
            }
        }
        self.last_pointer = pos;
    }

    fn toggle_play(&mut self) {
        if let Err(err) = self.player.toggle_play() {
            tracing::warn!(error = %err, "play/pause failed");
        }
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.player.sync();
        let has_frame = self.player_view.has_frame();
        if let Some(interval) = repaint_interval(self.player.is_playing(), has_frame) {
            ctx.request_repaint_after(interval);
        }

        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(Color32::from_rgba_premultiplied(0, 0, 0, 90))
                    .inner_margin(egui::Margin::symmetric(24.0, 14.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(Color32::from_rgb(59, 130, 246), "▶");
                    ui.heading(
                        egui::RichText::new("Livestream Overlay Studio")
                            .strong()
                            .color(Color32::WHITE),
                    );
                });
            });

        let controls_width =
            ctx.screen_rect().width() * (1.0 - self.config.surface.column_fraction);
        let commands = egui::SidePanel::right("overlay_controls")
            .resizable(false)
            .exact_width(controls_width.max(300.0))
            .show(ctx, |ui| {
                let overlays = self.composition.store().overlays();
                egui::ScrollArea::vertical()
                    .show(ui, |ui| show_controls(ui, &mut self.form, &overlays))
                    .inner
            })
            .inner;
        for command in commands {
            self.composition.apply(command);
        }

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(Color32::from_rgb(24, 26, 32))
                    .inner_margin(egui::Margin::same(24.0)),
            )
            .show(ctx, |ui| {
                let composition = &self.composition;
                let player = self.player_view.show(ui, &mut self.player, |p| {
                    composition.topmost_hit(p).is_some()
                });
                let surface = player.surface;
                self.composition
                    .set_surface_size(Size::new(surface.width(), surface.height()));

                self.route_pointer(ctx, surface);
                if player.body_clicked {
                    self.toggle_play();
                }

                show_overlays(ui, surface, &self.composition);

                ui.add_space(16.0);
                egui::Frame::group(ui.style())
                    .fill(Color32::from_white_alpha(16))
                    .rounding(egui::Rounding::same(8.0))
                    .inner_margin(egui::Margin::same(12.0))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(
                            egui::RichText::new("Instructions")
                                .strong()
                                .color(Color32::WHITE),
                        );
                        for hint in INSTRUCTIONS {
                            ui.label(
                                egui::RichText::new(format!("• {hint}"))
                                    .color(Color32::from_gray(200)),
                            );
                        }
                    });
            });
    }
}

/// How soon to redraw without user input. Playback needs every frame; until
/// the first frame arrives the preroll frame or a bus error still has to
/// show up on its own.
fn repaint_interval(is_playing: bool, has_frame: bool) -> Option<Duration> {
    if is_playing {
        Some(Duration::from_millis(16))
    } else if !has_frame {
        Some(Duration::from_millis(250))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repaints_continuously_while_playing() {
        assert_eq!(repaint_interval(true, true), Some(Duration::from_millis(16)));
        assert_eq!(repaint_interval(true, false), Some(Duration::from_millis(16)));
    }

    #[test]
    fn polls_slowly_until_first_frame_when_paused() {
        assert_eq!(repaint_interval(false, false), Some(Duration::from_millis(250)));
        assert_eq!(repaint_interval(false, true), None);
    }
}
