// src/app.rs
use eframe::egui;
use rfd::FileDialog;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::controller::upload::ALLOWED_EXTENSIONS;
use crate::controller::{
    reload_screens, ClearDataController, DashboardController, LogExportController,
    UploadController,
};
use crate::feedback::{NotificationKind, Notifier};
use crate::models::UploadedFile;
use crate::state::{AppContext, ConfirmAction, DialogState, Screen, UiPrefs};
use crate::ui::UiAction;

pub struct ResultsApp {
    context: AppContext,
    prefs: UiPrefs,
    dialog: DialogState,
    upload: UploadController,
    dashboard: DashboardController,
    clear_data: ClearDataController,
    logs: LogExportController,
}

impl ResultsApp {
    pub fn new(cc: &eframe::CreationContext<'_>, context: AppContext) -> Self {
        let prefs: UiPrefs = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let mut dashboard = DashboardController::new(context.config.poll_interval());
        dashboard.start(Instant::now());

        Self {
            upload: UploadController::new(&context.config),
            clear_data: ClearDataController::new(context.config.reload_delay()),
            logs: LogExportController::new(),
            dialog: DialogState::None,
            dashboard,
            prefs,
            context,
        }
    }

    fn show_menu(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open Spreadsheet...").clicked() {
                    actions.push(UiAction::PickFile);
                    ui.close_menu();
                }
                if ui.button("Export Email Logs...").clicked() {
                    actions.push(UiAction::ExportLogs);
                    ui.close_menu();
                }
            });

            ui.separator();

            for screen in Screen::ALL {
                if ui
                    .selectable_label(self.prefs.screen == screen, screen.label())
                    .clicked()
                {
                    self.prefs.screen = screen;
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(self.context.config.server_url.as_str())
                        .small()
                        .weak(),
                );
            });
        });
    }

    fn pick_file(&mut self) {
        let dialog = FileDialog::new()
            .add_filter("Spreadsheets", &ALLOWED_EXTENSIONS)
            .set_title("Select Student Results");

        if let Some(path) = dialog.pick_file() {
            self.stage_paths(vec![path]);
        }
    }

    fn stage_paths(&mut self, paths: Vec<PathBuf>) {
        let mut files = Vec::new();
        for path in paths {
            match UploadedFile::from_path(&path) {
                Ok(file) => files.push(file),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "unreadable file");
                    self.context.notifications.notify(
                        NotificationKind::Error,
                        "Invalid File",
                        &format!("{:#}", e),
                    );
                    return;
                }
            }
        }
        self.upload.select_file(files, &mut self.context.notifications);
    }

    fn export_logs(&mut self) {
        let default_name = format!(
            "email_logs_{}.csv",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        );
        let dialog = FileDialog::new()
            .add_filter("CSV files", &["csv"])
            .set_file_name(default_name)
            .set_title("Export Email Logs");

        if let Some(path) = dialog.save_file() {
            self.logs.export(
                &self.context.backend,
                path,
                &mut self.context.notifications,
                &mut self.context.loading,
            );
        }
    }

    fn reload(&mut self) {
        self.dialog = DialogState::None;
        let ctx = &mut self.context;
        reload_screens(
            &mut self.upload,
            &mut self.dashboard,
            &ctx.backend,
            &mut ctx.notifications,
            &mut ctx.loading,
        );
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw
                    .dropped_files
                    .iter()
                    .filter_map(|f| f.path.clone())
                    .collect::<Vec<_>>(),
            )
        });

        self.upload.set_drop_hover(hovering);
        if !dropped.is_empty() {
            self.prefs.screen = Screen::Upload;
            self.stage_paths(dropped);
        }
    }

    fn apply(&mut self, action: UiAction) {
        let ctx = &mut self.context;
        match action {
            UiAction::PickFile => self.pick_file(),
            UiAction::ClearFile => self.upload.clear_file(),
            UiAction::Upload => {
                self.upload
                    .upload(&ctx.backend, &mut ctx.notifications, &mut ctx.loading)
            }
            UiAction::AskSendEmails => self.dialog.ask(ConfirmAction::SendEmails),
            UiAction::AskClearPreview => self.dialog.ask(ConfirmAction::ClearPreview),
            UiAction::AnswerConfirm(accepted) => match self.dialog.answer(accepted) {
                Some(ConfirmAction::SendEmails) => {
                    self.upload
                        .send_emails(&ctx.backend, &mut ctx.notifications, &mut ctx.loading)
                }
                Some(ConfirmAction::ClearPreview) => {
                    self.upload.clear_all_data(&mut ctx.notifications)
                }
                None => {}
            },
            UiAction::RefreshDashboard => {
                self.dashboard.refresh_now(&ctx.backend, &mut ctx.notifications);
            }
            UiAction::OpenClearData => self.clear_data.open_confirmation(),
            UiAction::ConfirmClearData => {
                self.clear_data.confirm_clear(&ctx.backend, &mut ctx.alert)
            }
            UiAction::CloseClearData => self.clear_data.close_confirmation(),
            UiAction::ExportLogs => self.export_logs(),
            UiAction::DismissBanner(id) => ctx.banners.dismiss(id),
            UiAction::DismissNotification(id) => ctx.notifications.dismiss(id),
            UiAction::AcknowledgeAlert => ctx.alert.acknowledge(),
        }
    }

    fn poll(&mut self, now: Instant) {
        let ctx = &mut self.context;
        self.upload.poll(&mut ctx.notifications, &mut ctx.loading);
        self.logs.poll(&mut ctx.notifications, &mut ctx.loading);
        self.dashboard.tick(now, &ctx.backend, &mut ctx.notifications);
        self.clear_data.poll(now, &mut ctx.banners, &mut ctx.alert);
        ctx.notifications.prune(now);
        ctx.banners.prune(now);

        if self.clear_data.take_due_reload(now) {
            self.reload();
        }
    }

    fn next_wake(&self, now: Instant) -> Duration {
        let busy = self.upload.is_busy()
            || self.logs.is_busy()
            || self.clear_data.is_busy()
            || self.dashboard.is_loading();
        if busy || !self.context.banners.is_empty() {
            return Duration::from_millis(50);
        }

        [
            self.dashboard.next_poll(),
            self.clear_data.reload_at(),
            self.context.notifications.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
        .map(|at| at.saturating_duration_since(now))
        .unwrap_or(Duration::from_secs(1))
    }
}

impl eframe::App for ResultsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.poll(now);
        self.handle_dropped_files(ctx);

        let mut actions = Vec::new();
        let modal_was_open = self.clear_data.is_open();

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if self.dialog.is_open() {
                self.dialog.answer(false);
            } else {
                self.clear_data.handle_escape();
            }
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.show_menu(ui, &mut actions);
        });

        let blocked = self.context.loading.is_active()
            || self.clear_data.is_open()
            || self.dialog.is_open()
            || self.context.alert.message().is_some();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                egui::ScrollArea::vertical()
                    .id_source("main_scroll")
                    .enable_scrolling(!self.clear_data.scroll_locked())
                    .show(ui, |ui| {
                        crate::ui::overlays::show_banners(ui, &self.context.banners, now, &mut actions);
                        match self.prefs.screen {
                            Screen::Upload => {
                                crate::ui::upload::show_upload_view(ui, &self.upload, &mut actions);
                            }
                            Screen::Dashboard => {
                                crate::ui::dashboard::show_dashboard_view(
                                    ui,
                                    &mut self.dashboard,
                                    &mut actions,
                                );
                            }
                        }
                    });
            });
        });

        if self.clear_data.is_open() {
            let modal = crate::ui::clear_data::show_clear_data_modal(
                ctx,
                self.clear_data.is_busy(),
                &mut actions,
            );
            // The click that opened the modal must not close it again.
            let clicked_outside = ctx.input(|i| {
                i.pointer.any_click()
                    && match (i.pointer.interact_pos(), modal) {
                        (Some(pos), Some(rect)) => !rect.contains(pos),
                        _ => false,
                    }
            });
            if modal_was_open && clicked_outside {
                self.clear_data.handle_click_outside();
            }
        }

        crate::ui::overlays::show_confirm_dialog(ctx, &self.dialog, &mut actions);
        crate::ui::overlays::show_loading(ctx, &self.context.loading);
        crate::ui::overlays::show_alert(ctx, &self.context.alert, &mut actions);
        crate::ui::overlays::show_notifications(ctx, &self.context.notifications, &mut actions);

        for action in actions {
            self.apply(action);
        }

        ctx.request_repaint_after(self.next_wake(Instant::now()));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.prefs);
    }
}
