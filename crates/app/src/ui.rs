//! Control window and overlay hosting using egui

use crate::config::Config;
use crate::controller::{Controller, FileDialogTarget};
use crate::counters::CategoryCounters;
use crate::hotkey::{self, HotkeyBinding};
use capture::PlatformGrabber;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use export::{ExportConfig, ImageExporter};
use overlay::OverlayWindow;
use std::path::PathBuf;
use std::time::Instant;

/// Requests that reach the UI thread from elsewhere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    NewRegion,
}

const BUTTON_GRAY: egui::Color32 = egui::Color32::from_rgb(108, 117, 125);

/// Main application using egui
pub struct RegionShotApp {
    controller: Controller,
    commands: Receiver<AppCommand>,
    grabber: PlatformGrabber,
    save_target: FileDialogTarget,
    exporter: ImageExporter,
    hotkey_label: String,
    counters: CategoryCounters,
    counters_path: PathBuf,
    _hotkey: Option<HotkeyBinding>,
}

impl RegionShotApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        cfg: Config,
        counters: CategoryCounters,
        commands_tx: Sender<AppCommand>,
        commands: Receiver<AppCommand>,
    ) -> Self {
        let binding = hotkey::register(&cfg.hotkey);
        if let Some(ref binding) = binding {
            hotkey::forward_events(binding, commands_tx, cc.egui_ctx.clone());
        }

        Self {
            controller: Controller::new(&cfg),
            commands,
            grabber: PlatformGrabber::default(),
            save_target: FileDialogTarget::new(cfg.default_file_name.clone()),
            exporter: ImageExporter::new(ExportConfig::default()),
            hotkey_label: cfg.hotkey.clone(),
            counters,
            counters_path: cfg.counters_file,
            _hotkey: binding,
        }
    }

    fn drain_commands(&mut self) {
        while let Ok(cmd) = self.commands.try_recv() {
            match cmd {
                AppCommand::NewRegion => self.controller.start_new_region(None),
            }
        }
    }

    fn run_pending_capture(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        self.controller.poll_pending_capture(
            now,
            &self.grabber,
            &self.save_target,
            &self.exporter,
        );

        if let Some(due) = self.controller.pending_capture_due() {
            ctx.request_repaint_after(due.saturating_duration_since(now));
        }
    }

    fn show_overlay(&mut self, ctx: &egui::Context) {
        let Some(selector) = self.controller.visible_selector().cloned() else {
            return;
        };
        let focus = self.controller.take_focus_request();

        let frame = OverlayWindow::show(ctx, &selector, focus);

        if let Some(mapping) = frame.mapping {
            self.controller.set_screen_mapping(mapping);
        }
        if frame.events.is_empty() {
            return;
        }
        for event in frame.events {
            self.controller.dispatch(event);
        }
        ctx.request_repaint();
    }

    fn action_button(ui: &mut egui::Ui, text: &str, fill: egui::Color32, enabled: bool) -> bool {
        let button = egui::Button::new(
            egui::RichText::new(text)
                .size(14.0)
                .color(egui::Color32::WHITE),
        )
        .fill(if enabled { fill } else { BUTTON_GRAY })
        .min_size(egui::vec2(ui.available_width(), 32.0))
        .rounding(8.0);

        ui.add_enabled(enabled, button).clicked()
    }

    fn show_control_panel(&mut self, ctx: &egui::Context) {
        let has_overlay = self.controller.selector().is_some();
        let capturing = self.controller.is_overlay_hidden();
        let has_last = self.controller.last_region().is_some();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                ui.label("Last Dimension:");
                ui.label(
                    egui::RichText::new(self.controller.last_dimension_text())
                        .strong()
                        .color(egui::Color32::from_rgb(51, 51, 51)),
                );
                if ui
                    .add_enabled(has_last, egui::Button::new("Reuse Last Region").rounding(6.0))
                    .clicked()
                {
                    self.controller.reuse_last_region();
                }
            });

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(8.0);

            let new_label = format!("New Region ({})", self.hotkey_label);
            if Self::action_button(ui, &new_label, egui::Color32::from_rgb(0, 123, 255), true) {
                self.controller.start_new_region(None);
            }
            ui.add_space(4.0);

            if Self::action_button(
                ui,
                "Take Screenshot (Space)",
                egui::Color32::from_rgb(40, 167, 69),
                !capturing,
            ) {
                self.controller.request_screenshot(Instant::now());
            }
            ui.add_space(4.0);

            if Self::action_button(
                ui,
                "Close Region (Esc)",
                egui::Color32::from_rgb(220, 53, 69),
                has_overlay,
            ) {
                self.controller.close_region();
            }

            ui.add_space(12.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(self.controller.status())
                        .size(13.0)
                        .color(egui::Color32::from_rgb(102, 102, 102)),
                );
            });
        });
    }
}

impl eframe::App for RegionShotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_commands();
        self.run_pending_capture(ctx);
        self.show_overlay(ctx);
        self.show_control_panel(ctx);
    }

    /// Lets the overlay viewport show the desktop through its dim layer
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if self.counters.is_empty() {
            return;
        }
        if let Err(e) = self.counters.save(&self.counters_path) {
            log::warn!("Error saving counters: {e:#}");
        }
    }
}
