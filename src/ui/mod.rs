// src/ui/mod.rs
//! egui layout. Views only read controller state and report what the user
//! did as [`UiAction`]s; the app applies them after the frame is laid out.

use eframe::egui::{self, Color32, RichText};
use uuid::Uuid;

use crate::view::{StatCard, Tone};

pub mod upload;
pub mod dashboard;
pub mod charts;
pub mod clear_data;
pub mod overlays;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    PickFile,
    ClearFile,
    Upload,
    AskSendEmails,
    AskClearPreview,
    AnswerConfirm(bool),
    RefreshDashboard,
    OpenClearData,
    ConfirmClearData,
    CloseClearData,
    ExportLogs,
    DismissBanner(Uuid),
    DismissNotification(Uuid),
    AcknowledgeAlert,
}

pub fn rgb([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}

pub fn tone_color(tone: Tone) -> Color32 {
    rgb(tone.rgb())
}

/// A row of equal-width summary cards.
pub fn show_stat_cards(ui: &mut egui::Ui, cards: &[StatCard]) {
    if cards.is_empty() {
        return;
    }
    ui.columns(cards.len(), |columns| {
        for (column, card) in columns.iter_mut().zip(cards) {
            egui::Frame::group(column.style()).show(column, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(card.title).small().weak());
                ui.label(
                    RichText::new(&card.value)
                        .size(22.0)
                        .strong()
                        .color(tone_color(card.tone)),
                );
            });
        }
    });
}
