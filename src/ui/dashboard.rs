// src/ui/dashboard.rs
use eframe::egui::{self, RichText};

use super::charts::{show_grade_donut, show_history_plot};
use super::{show_stat_cards, tone_color, UiAction};
use crate::controller::DashboardController;
use crate::view::{ActivityRowView, ListView, SubjectRowView};

pub fn show_dashboard_view(
    ui: &mut egui::Ui,
    dashboard: &mut DashboardController,
    actions: &mut Vec<UiAction>,
) {
    ui.horizontal(|ui| {
        ui.heading("Email Dashboard");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .button(RichText::new("🗑 Clear All Data").color(egui::Color32::RED))
                .clicked()
            {
                actions.push(UiAction::OpenClearData);
            }
            if ui.button("⬇ Export Logs").clicked() {
                actions.push(UiAction::ExportLogs);
            }
            if ui
                .add_enabled(!dashboard.is_loading(), egui::Button::new("⟳ Refresh"))
                .clicked()
            {
                actions.push(UiAction::RefreshDashboard);
            }
            if dashboard.is_loading() {
                ui.spinner();
            }
        });
    });
    ui.add_space(8.0);

    let Some(view) = dashboard.view().cloned() else {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(RichText::new("Loading dashboard statistics...").weak());
        });
        return;
    };

    show_stat_cards(ui, &view.cards);
    ui.add_space(12.0);

    let charts = dashboard.charts_mut();
    ui.columns(2, |columns| {
        columns[0].group(|ui| {
            ui.set_width(ui.available_width());
            ui.heading("Grade Distribution");
            ui.add_space(4.0);
            if let Some(instance) = charts.grades.live_mut() {
                show_grade_donut(ui, instance);
            }
        });
        columns[1].group(|ui| {
            ui.set_width(ui.available_width());
            ui.heading("Email History");
            ui.add_space(4.0);
            if let Some(instance) = charts.history.live_mut() {
                show_history_plot(ui, instance);
            }
        });
    });
    ui.add_space(12.0);

    ui.columns(2, |columns| {
        columns[0].group(|ui| {
            ui.set_width(ui.available_width());
            ui.heading("Recent Activity");
            ui.add_space(4.0);
            show_list(ui, "recent_activity", &view.activity, show_activity_row);
        });
        columns[1].group(|ui| {
            ui.set_width(ui.available_width());
            ui.heading("Subjects");
            ui.add_space(4.0);
            show_list(ui, "subject_stats", &view.subjects, show_subject_row);
        });
    });
}

fn show_list<T>(
    ui: &mut egui::Ui,
    id: &str,
    list: &ListView<T>,
    mut show_row: impl FnMut(&mut egui::Ui, &T),
) {
    match list {
        ListView::Empty(message) => {
            ui.label(RichText::new(*message).weak().italics());
        }
        ListView::Rows(rows) => {
            egui::ScrollArea::vertical()
                .id_source(id)
                .max_height(260.0)
                .show(ui, |ui| {
                    for row in rows {
                        show_row(ui, row);
                        ui.separator();
                    }
                });
        }
    }
}

fn show_activity_row(ui: &mut egui::Ui, row: &ActivityRowView) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(&row.name).strong());
            ui.label(RichText::new(&row.email).small().weak());
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(&row.timestamp).small().weak());
            ui.label(
                RichText::new(format!("{} {}", row.badge.icon, row.badge.text))
                    .color(tone_color(row.badge.tone)),
            );
        });
    });
}

fn show_subject_row(ui: &mut egui::Ui, row: &SubjectRowView) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(&row.subject).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(format!("Avg: {}", row.average));
            ui.label(RichText::new(format!("{} students", row.count)).weak());
        });
    });
}
