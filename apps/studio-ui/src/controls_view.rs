//! The right-hand panel: add-overlay form and the overlay list.

use eframe::egui::{self, Color32, RichText};
use studio_model::overlay::{NewOverlay, Overlay, OverlayKind};
use studio_model::panel::{content_preview, list_heading, AddOverlayForm};

use crate::composition::StudioCommand;

const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
const DANGER: Color32 = Color32::from_rgb(239, 68, 68);

/// Draw the controls and collect what the user asked for this frame.
pub fn show_controls(
    ui: &mut egui::Ui,
    form: &mut AddOverlayForm,
    overlays: &[Overlay],
) -> Vec<StudioCommand> {
    let mut commands = Vec::new();

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        ui.heading(RichText::new("Overlay Controls").strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let toggle = egui::Button::new(RichText::new("Add Overlay").color(Color32::WHITE))
                .fill(ACCENT)
                .selected(form.open);
            if ui.add(toggle).clicked() {
                form.toggle();
            }
        });
    });
    ui.add_space(8.0);

    if form.open {
        if let Some(new_overlay) = show_form(ui, form) {
            commands.push(StudioCommand::Add(new_overlay));
        }
        ui.add_space(8.0);
    }

    ui.separator();
    ui.label(RichText::new(list_heading(overlays.len())).strong());
    ui.add_space(4.0);

    if overlays.is_empty() {
        ui.label(RichText::new("No overlays added yet").italics().color(Color32::GRAY));
        return commands;
    }

    for overlay in overlays {
        egui::Frame::group(ui.style())
            .rounding(egui::Rounding::same(6.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(overlay.kind.as_str().to_uppercase())
                                .small()
                                .strong()
                                .color(ACCENT),
                        );
                        let preview = RichText::new(content_preview(overlay));
                        let preview = if overlay.is_visible {
                            preview
                        } else {
                            preview.weak()
                        };
                        ui.add(egui::Label::new(preview).truncate(true));
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .button(RichText::new("✖").color(DANGER))
                            .on_hover_text("Delete overlay")
                            .clicked()
                        {
                            commands.push(StudioCommand::Delete(overlay.id.clone()));
                        }
                        let (label, hint) = if overlay.is_visible {
                            ("Hide", "Hide overlay")
                        } else {
                            ("Show", "Show overlay")
                        };
                        if ui.button(label).on_hover_text(hint).clicked() {
                            commands.push(StudioCommand::ToggleVisibility(overlay.id.clone()));
                        }
                    });
                });
            });
        ui.add_space(4.0);
    }

    commands
}

/// The add-overlay form. Returns the new overlay when it was submitted.
fn show_form(ui: &mut egui::Ui, form: &mut AddOverlayForm) -> Option<NewOverlay> {
    let mut submitted = None;

    egui::Frame::group(ui.style())
        .rounding(egui::Rounding::same(6.0))
        .inner_margin(egui::Margin::same(10.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.label("Overlay Type");
            egui::ComboBox::from_id_source("overlay_kind")
                .selected_text(form.kind.display_name())
                .width(ui.available_width())
                .show_ui(ui, |ui| {
                    for kind in OverlayKind::ALL {
                        ui.selectable_value(&mut form.kind, kind, kind.display_name());
                    }
                });
            ui.add_space(6.0);

            ui.label(form.content_label());
            let placeholder = form.content_placeholder();
            let input = ui.add(
                egui::TextEdit::singleline(&mut form.content)
                    .hint_text(placeholder)
                    .desired_width(f32::INFINITY),
            );
            let entered =
                input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                let create = ui.add_enabled(
                    form.can_submit(),
                    egui::Button::new(RichText::new("Create Overlay").color(Color32::WHITE))
                        .fill(ACCENT),
                );
                if create.clicked() || entered {
                    submitted = form.submit();
                }
                if ui.button("Cancel").clicked() {
                    form.cancel();
                }
            });
        });

    if let Some(new_overlay) = submitted.as_ref() {
        tracing::debug!(kind = %new_overlay.kind, "overlay form submitted");
    }
    submitted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_text(shape: &egui::Shape, out: &mut Vec<String>) {
        match shape {
            egui::Shape::Text(text) => out.push(text.galley.text().to_string()),
            egui::Shape::Vec(shapes) => shapes.iter().for_each(|s| collect_text(s, out)),
            _ => {}
        }
    }

    fn rendered_text(form: &mut AddOverlayForm) -> Vec<String> {
        let ctx = egui::Context::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                show_controls(ui, form, &[]);
            });
        });
        let mut texts = Vec::new();
        for clipped in &output.shapes {
            collect_text(&clipped.shape, &mut texts);
        }
        texts
    }

    #[test]
    fn toggle_keeps_its_label_while_form_is_open() {
        let mut form = AddOverlayForm::new();
        form.toggle();
        let texts = rendered_text(&mut form);
        assert!(texts.iter().any(|t| t == "Add Overlay"));
        assert!(!texts.iter().any(|t| t == "Close"));
        assert!(texts.iter().any(|t| t == "Create Overlay"));
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let mut form = AddOverlayForm::new();
        let texts = rendered_text(&mut form);
        assert!(texts.iter().any(|t| t == "Active Overlays (0)"));
        assert!(texts.iter().any(|t| t == "No overlays added yet"));
    }
}
