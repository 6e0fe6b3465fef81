//! Global hotkey that opens a new region from any application.

use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};

use crate::ui::AppCommand;

/// Registered "new region" hotkey; keeps its manager alive.
pub struct HotkeyBinding {
    _manager: GlobalHotKeyManager,
    hotkey: HotKey,
}

impl HotkeyBinding {
    pub fn id(&self) -> u32 {
        self.hotkey.id()
    }
}

/// Parse a shortcut string like "Ctrl+D" into a `HotKey`.
pub fn parse_shortcut(s: &str) -> Result<HotKey> {
    let mut modifiers = Modifiers::empty();
    let mut key_code: Option<Code> = None;

    for token in s.split('+') {
        let token = token.trim();
        match token.to_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= Modifiers::CONTROL,
            "alt" => modifiers |= Modifiers::ALT,
            "shift" => modifiers |= Modifiers::SHIFT,
            "super" | "win" | "meta" | "cmd" => modifiers |= Modifiers::SUPER,
            _ => {
                if key_code.is_some() {
                    anyhow::bail!("multiple key codes in shortcut: {s:?}");
                }
                key_code = Some(parse_key_code(token)?);
            }
        }
    }

    let code = key_code.context(format!("no key code found in shortcut: {s:?}"))?;
    let mods = if modifiers.is_empty() { None } else { Some(modifiers) };
    Ok(HotKey::new(mods, code))
}

const LETTERS: [Code; 26] = [
    Code::KeyA, Code::KeyB, Code::KeyC, Code::KeyD, Code::KeyE, Code::KeyF, Code::KeyG,
    Code::KeyH, Code::KeyI, Code::KeyJ, Code::KeyK, Code::KeyL, Code::KeyM, Code::KeyN,
    Code::KeyO, Code::KeyP, Code::KeyQ, Code::KeyR, Code::KeyS, Code::KeyT, Code::KeyU,
    Code::KeyV, Code::KeyW, Code::KeyX, Code::KeyY, Code::KeyZ,
];

const DIGITS: [Code; 10] = [
    Code::Digit0, Code::Digit1, Code::Digit2, Code::Digit3, Code::Digit4,
    Code::Digit5, Code::Digit6, Code::Digit7, Code::Digit8, Code::Digit9,
];

const FUNCTION_KEYS: [Code; 12] = [
    Code::F1, Code::F2, Code::F3, Code::F4, Code::F5, Code::F6,
    Code::F7, Code::F8, Code::F9, Code::F10, Code::F11, Code::F12,
];

/// Map a key name to a `Code` variant.
fn parse_key_code(token: &str) -> Result<Code> {
    let lower = token.to_lowercase();

    let mut chars = lower.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        if ch.is_ascii_lowercase() {
            return Ok(LETTERS[(ch as u8 - b'a') as usize]);
        }
        if ch.is_ascii_digit() {
            return Ok(DIGITS[(ch as u8 - b'0') as usize]);
        }
    }

    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<usize>().ok()) {
        if (1..=FUNCTION_KEYS.len()).contains(&n) {
            return Ok(FUNCTION_KEYS[n - 1]);
        }
    }

    match lower.as_str() {
        "space" => Ok(Code::Space),
        "enter" | "return" => Ok(Code::Enter),
        "tab" => Ok(Code::Tab),
        "escape" | "esc" => Ok(Code::Escape),
        "insert" | "ins" => Ok(Code::Insert),
        "home" => Ok(Code::Home),
        "end" => Ok(Code::End),
        "pageup" => Ok(Code::PageUp),
        "pagedown" => Ok(Code::PageDown),
        "printscreen" | "prtsc" => Ok(Code::PrintScreen),
        _ => anyhow::bail!("unknown key: {token:?}"),
    }
}

/// Register the configured hotkey, returning `None` if registration fails.
pub fn register(shortcut: &str) -> Option<HotkeyBinding> {
    let hotkey = match parse_shortcut(shortcut) {
        Ok(h) => h,
        Err(e) => {
            log::warn!(
                "Invalid hotkey {shortcut:?}: {e}. Continuing without hotkey; \
                 use the New Region button or fix hotkey in regionshot.json."
            );
            return None;
        }
    };

    let manager = match GlobalHotKeyManager::new() {
        Ok(m) => m,
        Err(e) => {
            log::warn!("Failed to create hotkey manager: {e}");
            return None;
        }
    };

    match manager.register(hotkey) {
        Ok(()) => {
            log::info!("Global new-region hotkey registered: {shortcut}");
            Some(HotkeyBinding {
                _manager: manager,
                hotkey,
            })
        }
        Err(e) => {
            log::warn!("Failed to register hotkey {shortcut:?}: {e}. Continuing without hotkey.");
            None
        }
    }
}

/// Translate a hotkey event into an app command.
pub fn handle_hotkey_event(event: &GlobalHotKeyEvent, new_region_id: u32) -> Option<AppCommand> {
    if event.state != HotKeyState::Pressed || event.id != new_region_id {
        return None;
    }
    Some(AppCommand::NewRegion)
}

/// Forward hotkey presses from the listener into the UI loop.
///
/// Only the channel send and a repaint request run off the UI thread.
pub fn forward_events(binding: &HotkeyBinding, commands: Sender<AppCommand>, ctx: egui::Context) {
    let id = binding.id();
    GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
        if let Some(cmd) = handle_hotkey_event(&event, id) {
            if commands.send(cmd).is_ok() {
                ctx.request_repaint();
            }
        }
    }));
}
