//! Painting overlays on the composition surface.
//!
//! Input is not handled here; [`crate::composition::Composition`] hit-tests
//! the same geometry. This only draws overlays and their edit affordances.

use eframe::egui::{self, Color32, CursorIcon, Painter, Rect, Stroke, Vec2};
use studio_model::geometry::{Bounds, Point};
use studio_model::gesture::{
    GesturePhase, HitRegion, DELETE_BUTTON_INSET, DELETE_BUTTON_SIDE, RESIZE_HANDLE_SIDE,
};
use studio_model::overlay::Overlay;

use crate::composition::Composition;

const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
const DANGER: Color32 = Color32::from_rgb(239, 68, 68);
const TEXT_SIZE: f32 = 18.0;

pub fn show_overlays(ui: &mut egui::Ui, surface: Rect, composition: &Composition) {
    let mut clipped = ui.child_ui(surface, *ui.layout());
    clipped.set_clip_rect(surface);
    let painter = clipped.painter().clone();

    let hovered = ui
        .ctx()
        .pointer_hover_pos()
        .filter(|p| surface.contains(*p))
        .and_then(|p| {
            composition.topmost_hit(Point::new(p.x - surface.min.x, p.y - surface.min.y))
        });

    for overlay in composition.store().render_order() {
        let rect = screen_rect(surface, overlay.bounds());
        if overlay.kind.is_media() {
            paint_media(&clipped, overlay, rect);
        } else {
            paint_text(&painter, overlay, rect);
        }

        let phase = composition.gesture_phase(&overlay.id);
        let hovered_region = hovered
            .as_ref()
            .filter(|(id, _)| *id == overlay.id)
            .map(|(_, region)| *region);
        if phase != GesturePhase::Idle || hovered_region.is_some() {
            paint_affordances(&painter, surface, overlay);
        }

        let cursor = match (phase, hovered_region) {
            (GesturePhase::Dragging { .. }, _) => Some(CursorIcon::Grabbing),
            (GesturePhase::Resizing { .. }, _) => Some(CursorIcon::ResizeNwSe),
            (_, Some(HitRegion::ResizeHandle)) => Some(CursorIcon::ResizeNwSe),
            (_, Some(HitRegion::DeleteButton)) => Some(CursorIcon::PointingHand),
            (_, Some(HitRegion::Body)) => Some(CursorIcon::Move),
            (GesturePhase::Idle, None) => None,
        };
        if let Some(cursor) = cursor {
            ui.ctx().set_cursor_icon(cursor);
        }
    }
}

fn screen_rect(surface: Rect, bounds: Bounds) -> Rect {
    Rect::from_min_size(
        surface.min + Vec2::new(bounds.origin.x, bounds.origin.y),
        Vec2::new(bounds.size.width, bounds.size.height),
    )
}

fn paint_text(painter: &Painter, overlay: &Overlay, rect: Rect) {
    painter.rect_filled(rect, 6.0, Color32::from_black_alpha(180));
    let galley = painter.layout(
        overlay.content.clone(),
        egui::FontId::proportional(TEXT_SIZE),
        Color32::WHITE,
        (rect.width() - 16.0).max(1.0),
    );
    let pos = rect.center() - galley.size() / 2.0;
    painter.galley(pos, galley, Color32::WHITE);
}

fn paint_media(ui: &egui::Ui, overlay: &Overlay, rect: Rect) {
    egui::Image::from_uri(overlay.content.as_str())
        .fit_to_exact_size(rect.size())
        .maintain_aspect_ratio(true)
        .paint_at(ui, rect);
}

/// Border, move glyph, delete button and resize handle.
fn paint_affordances(painter: &Painter, surface: Rect, overlay: &Overlay) {
    let bounds = overlay.bounds();
    let rect = screen_rect(surface, bounds);
    painter.rect_stroke(rect, 4.0, Stroke::new(2.0, ACCENT));

    let glyph = rect.min + Vec2::splat(12.0);
    let arm: f32 = 6.0;
    let stroke = Stroke::new(1.5, Color32::WHITE);
    painter.line_segment([glyph - Vec2::X * arm, glyph + Vec2::X * arm], stroke);
    painter.line_segment([glyph - Vec2::Y * arm, glyph + Vec2::Y * arm], stroke);

    let delete = screen_rect(
        surface,
        bounds.top_right_square(DELETE_BUTTON_SIDE, DELETE_BUTTON_INSET),
    );
    painter.rect_filled(delete, 3.0, DANGER);
    let cross = delete.shrink(5.0);
    let stroke = Stroke::new(2.0, Color32::WHITE);
    painter.line_segment([cross.left_top(), cross.right_bottom()], stroke);
    painter.line_segment([cross.right_top(), cross.left_bottom()], stroke);

    let handle = screen_rect(surface, bounds.bottom_right_square(RESIZE_HANDLE_SIDE));
    painter.rect_filled(handle, 2.0, ACCENT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_model::geometry::Size;

    #[test]
    fn screen_rect_offsets_by_surface_origin() {
        let surface = Rect::from_min_size(egui::pos2(24.0, 80.0), Vec2::new(800.0, 450.0));
        let bounds = Bounds::new(Point::new(50.0, 50.0), Size::new(150.0, 150.0));
        let rect = screen_rect(surface, bounds);
        assert_eq!(rect.min, egui::pos2(74.0, 130.0));
        assert_eq!(rect.size(), Vec2::new(150.0, 150.0));
    }
}
