use anyhow::{Context, Result};
use global_hotkey::{
    GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
    hotkey::{Code, HotKey, Modifiers},
};
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, MSG, PM_REMOVE, PeekMessageW, TranslateMessage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    Capture,
    Reset,
    ToggleText,
    CopyAll,
    NextLanguage,
}

/// Ctrl+Shift+O capture, R reset, T show/hide text, C copy all, L next language
pub fn default_bindings() -> Vec<(HotKey, HotkeyAction)> {
    let modifiers = Some(Modifiers::CONTROL | Modifiers::SHIFT);
    vec![
        (HotKey::new(modifiers, Code::KeyO), HotkeyAction::Capture),
        (HotKey::new(modifiers, Code::KeyR), HotkeyAction::Reset),
        (HotKey::new(modifiers, Code::KeyT), HotkeyAction::ToggleText),
        (HotKey::new(modifiers, Code::KeyC), HotkeyAction::CopyAll),
        (HotKey::new(modifiers, Code::KeyL), HotkeyAction::NextLanguage),
    ]
}

pub struct HotkeyManager {
    manager: GlobalHotKeyManager,
    bindings: Vec<(HotKey, HotkeyAction)>,
}

impl HotkeyManager {
    pub fn new() -> Result<Self> {
        Self::with_bindings(default_bindings())
    }

    pub fn with_bindings(bindings: Vec<(HotKey, HotkeyAction)>) -> Result<Self> {
        let manager = GlobalHotKeyManager::new().context("Failed to create hotkey manager")?;

        for (hotkey, action) in &bindings {
            manager
                .register(*hotkey)
                .with_context(|| format!("Failed to register {action:?} hotkey"))?;
        }

        Ok(Self { manager, bindings })
    }

    /// Non-blocking; also pumps this thread's messages so presses get delivered
    pub fn poll(&self) -> Option<HotkeyAction> {
        pump_messages();

        let event = GlobalHotKeyEvent::receiver().try_recv().ok()?;
        if event.state != HotKeyState::Pressed {
            return None;
        }

        let action = action_for(&self.bindings, event.id);
        if action.is_none() {
            tracing::debug!("Ignoring unknown hotkey id {}", event.id);
        }
        action
    }
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        for (hotkey, _) in &self.bindings {
            let _ = self.manager.unregister(*hotkey);
        }
    }
}

fn action_for(bindings: &[(HotKey, HotkeyAction)], id: u32) -> Option<HotkeyAction> {
    bindings
        .iter()
        .find(|(hotkey, _)| hotkey.id() == id)
        .map(|(_, action)| *action)
}

fn pump_messages() {
    let mut msg = MSG::default();
    unsafe {
        while PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_are_distinct() {
        let bindings = default_bindings();
        for (hotkey, action) in &bindings {
            assert_eq!(action_for(&bindings, hotkey.id()), Some(*action));
        }
    }

    #[test]
    fn unknown_id_has_no_action() {
        let bindings = default_bindings();
        let other = HotKey::new(Some(Modifiers::ALT), Code::KeyQ);
        assert_eq!(action_for(&bindings, other.id()), None);
    }
}
