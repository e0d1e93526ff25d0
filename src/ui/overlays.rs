// src/ui/overlays.rs
use eframe::egui::{self, Color32, RichText};
use std::time::Instant;

use super::{rgb, UiAction};
use crate::feedback::{AlertBox, BannerStack, LoadingOverlay, NotificationCenter, NotificationKind};
use crate::state::DialogState;

fn kind_color(kind: NotificationKind) -> Color32 {
    match kind {
        NotificationKind::Success => rgb([0x10, 0xB9, 0x81]),
        NotificationKind::Error => rgb([0xEF, 0x44, 0x44]),
        NotificationKind::Info => rgb([0x3B, 0x82, 0xF6]),
    }
}

/// Toasts stacked in the top-right corner, newest at the bottom.
pub fn show_notifications(
    ctx: &egui::Context,
    notifications: &NotificationCenter,
    actions: &mut Vec<UiAction>,
) {
    if notifications.items().is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("notifications"))
        .anchor(egui::Align2::RIGHT_TOP, [-12.0, 36.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.set_max_width(320.0);
            for note in notifications.items() {
                let color = kind_color(note.kind);
                egui::Frame::popup(ui.style())
                    .stroke(egui::Stroke::new(1.0, color))
                    .show(ui, |ui| {
                        ui.set_width(300.0);
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&note.title).strong().color(color));
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if ui.small_button("✖").clicked() {
                                    actions.push(UiAction::DismissNotification(note.id));
                                }
                            });
                        });
                        ui.label(&note.message);
                    });
                ui.add_space(6.0);
            }
        });
}

pub fn show_loading(ctx: &egui::Context, loading: &LoadingOverlay) {
    let Some(message) = loading.message() else {
        return;
    };

    egui::Window::new("Loading")
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(message);
            });
        });
}

pub fn show_confirm_dialog(ctx: &egui::Context, dialog: &DialogState, actions: &mut Vec<UiAction>) {
    let DialogState::Confirm(action) = dialog else {
        return;
    };

    egui::Window::new(action.title())
        .collapsible(false)
        .resizable(false)
        .fixed_size([340.0, 120.0])
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(action.prompt());
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    actions.push(UiAction::AnswerConfirm(false));
                }
                if ui.button("OK").clicked() {
                    actions.push(UiAction::AnswerConfirm(true));
                }
            });
        });
}

pub fn show_alert(ctx: &egui::Context, alert: &AlertBox, actions: &mut Vec<UiAction>) {
    let Some(message) = alert.message() else {
        return;
    };

    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.label(message);
            if ui.button("OK").clicked() {
                actions.push(UiAction::AcknowledgeAlert);
            }
        });
}

/// Success banners at the top of the main area, faded by their age.
pub fn show_banners(ui: &mut egui::Ui, banners: &BannerStack, now: Instant, actions: &mut Vec<UiAction>) {
    let green = rgb([0x10, 0xB9, 0x81]);
    for (banner, alpha) in banners.visible(now) {
        egui::Frame::none()
            .fill(rgb([0xD1, 0xFA, 0xE5]).gamma_multiply(alpha))
            .stroke(egui::Stroke::new(1.0, green.gamma_multiply(alpha)))
            .rounding(6.0)
            .inner_margin(egui::Margin::same(8.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("✔ {}", banner.message))
                            .color(rgb([0x06, 0x5F, 0x46]).gamma_multiply(alpha)),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✖").clicked() {
                            actions.push(UiAction::DismissBanner(banner.id));
                        }
                    });
                });
            });
        ui.add_space(6.0);
    }
}
