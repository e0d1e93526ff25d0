// src/ui/clear_data.rs
use eframe::egui::{self, RichText};

use super::UiAction;

/// Confirmation modal for wiping every record on the server. Returns the
/// window's screen rect so the caller can tell clicks outside it.
pub fn show_clear_data_modal(
    ctx: &egui::Context,
    busy: bool,
    actions: &mut Vec<UiAction>,
) -> Option<egui::Rect> {
    let shown = egui::Window::new("Clear All Data")
        .collapsible(false)
        .resizable(false)
        .fixed_size([360.0, 140.0])
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("⚠").size(28.0).color(egui::Color32::RED));
                ui.label("This permanently deletes all students and email logs.");
                ui.label(RichText::new("This action cannot be undone.").strong());
            });
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    actions.push(UiAction::CloseClearData);
                }
                let confirm = egui::Button::new(
                    RichText::new("Yes, clear everything").color(egui::Color32::WHITE),
                )
                .fill(egui::Color32::from_rgb(0xEF, 0x44, 0x44));
                if ui.add_enabled(!busy, confirm).clicked() {
                    actions.push(UiAction::ConfirmClearData);
                }
                if busy {
                    ui.spinner();
                }
            });
        })?;

    Some(shown.response.rect)
}
