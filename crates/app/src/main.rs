//! RegionShot - draw, nudge and capture a screen region

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod config;
mod controller;
mod counters;
mod hotkey;
mod ui;

use crate::counters::CategoryCounters;
use crate::ui::{AppCommand, RegionShotApp};
use crossbeam_channel::{unbounded, Receiver, Sender};
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Capture rectangles are physical pixels
    #[cfg(windows)]
    unsafe {
        use windows::Win32::UI::HiDpi::{
            SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
        };
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }

    let cfg = config::load_config();
    let counters = CategoryCounters::load(&cfg.counters_file);

    let (cmd_tx, cmd_rx): (Sender<AppCommand>, Receiver<AppCommand>) = unbounded();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([340.0, 250.0])
            .with_min_inner_size([300.0, 230.0])
            .with_title("RegionShot")
            .with_always_on_top()
            .with_resizable(true),
        ..Default::default()
    };

    log::info!("Starting RegionShot (hotkey {})", cfg.hotkey);
    eframe::run_native(
        "RegionShot",
        native_options,
        Box::new(move |cc| Ok(Box::new(RegionShotApp::new(cc, cfg, counters, cmd_tx, cmd_rx)))),
    )
    .map_err(|e| anyhow::anyhow!("UI event loop failed: {e}"))?;

    Ok(())
}
