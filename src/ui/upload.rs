// src/ui/upload.rs
use eframe::egui::{self, Color32, RichText, Sense, Stroke};

use super::{rgb, show_stat_cards, UiAction};
use crate::controller::UploadController;
use crate::view::PreviewView;

const COLUMN_WIDTHS: [f32; 5] = [0.24, 0.32, 0.12, 0.2, 0.12];
const HEADERS: [&str; 5] = ["Name", "Email", "Score", "Subject", "Grade"];

pub fn show_upload_view(ui: &mut egui::Ui, upload: &UploadController, actions: &mut Vec<UiAction>) {
    ui.heading("Upload Student Results");
    ui.add_space(8.0);

    show_drop_area(ui, upload, actions);
    ui.add_space(8.0);

    if let Some(file) = upload.staged() {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.label("📄");
                ui.label(RichText::new(&file.name).strong());
                ui.label(upload.staged_size_text().unwrap_or_default());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✖ Remove").clicked() {
                        actions.push(UiAction::ClearFile);
                    }
                });
            });
        });
        ui.add_space(8.0);
    }

    ui.horizontal(|ui| {
        if ui
            .add_enabled(upload.upload_enabled(), egui::Button::new("⬆ Upload & Preview"))
            .clicked()
        {
            actions.push(UiAction::Upload);
        }
        if ui
            .add_enabled(upload.send_enabled(), egui::Button::new("✉ Send Emails"))
            .clicked()
        {
            actions.push(UiAction::AskSendEmails);
        }
        if ui
            .add_enabled(upload.preview().is_some(), egui::Button::new("🗑 Clear Preview"))
            .clicked()
        {
            actions.push(UiAction::AskClearPreview);
        }
    });

    if let Some(preview) = upload.preview() {
        ui.add_space(16.0);
        ui.separator();
        show_preview(ui, preview);
    }
}

fn show_drop_area(ui: &mut egui::Ui, upload: &UploadController, actions: &mut Vec<UiAction>) {
    let (stroke, fill) = if upload.drop_hover() {
        (Stroke::new(2.0, rgb([0x3B, 0x82, 0xF6])), rgb([0xEF, 0xF6, 0xFF]))
    } else {
        (ui.visuals().widgets.noninteractive.bg_stroke, Color32::TRANSPARENT)
    };

    let response = egui::Frame::none()
        .stroke(stroke)
        .fill(fill)
        .rounding(8.0)
        .inner_margin(egui::Margin::same(24.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("📂").size(32.0));
                ui.label("Drop a spreadsheet here or click to browse");
                ui.label(RichText::new("CSV, XLSX or XLS").small().weak());
            });
        })
        .response
        .interact(Sense::click());

    if response.on_hover_cursor(egui::CursorIcon::PointingHand).clicked() {
        actions.push(UiAction::PickFile);
    }
}

fn show_preview(ui: &mut egui::Ui, preview: &PreviewView) {
    ui.heading("Preview");
    ui.add_space(8.0);
    show_stat_cards(ui, &preview.cards);
    ui.add_space(8.0);

    let width = ui.available_width();
    let stripe = ui.visuals().faint_bg_color;

    row(ui, width, Color32::TRANSPARENT, |ui, i| {
        ui.label(RichText::new(HEADERS[i]).strong());
    });

    egui::ScrollArea::vertical()
        .id_source("preview_rows")
        .max_height(360.0)
        .show(ui, |ui| {
            for entry in &preview.rows {
                let fill = if entry.shaded { stripe } else { Color32::TRANSPARENT };
                row(ui, width, fill, |ui, i| match i {
                    0 => {
                        ui.label(&entry.name);
                    }
                    1 => {
                        ui.label(&entry.email);
                    }
                    2 => {
                        ui.label(&entry.score);
                    }
                    3 => {
                        ui.label(&entry.subject);
                    }
                    _ => {
                        ui.label(
                            RichText::new(entry.grade.letter())
                                .strong()
                                .color(rgb(entry.grade.color().rgb())),
                        );
                    }
                });
            }
        });
}

fn row(ui: &mut egui::Ui, width: f32, fill: Color32, mut cell: impl FnMut(&mut egui::Ui, usize)) {
    egui::Frame::none()
        .fill(fill)
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                for (i, share) in COLUMN_WIDTHS.iter().enumerate() {
                    ui.allocate_ui(egui::vec2(width * share - 8.0, 18.0), |ui| {
                        ui.set_width(width * share - 8.0);
                        cell(ui, i);
                    });
                }
            });
        });
}
