//! Keyboard combo normalization
//!
//! Combo grammar: held modifiers in the fixed order `alt+ctrl+meta+shift`,
//! each at most once, followed by the lower-cased key name, joined by `+`
//! (`alt+1`, `ctrl+shift+g`).

/// Modifier tokens in canonical order
pub const MODIFIER_ORDER: [&str; 4] = ["alt", "ctrl", "meta", "shift"];

/// Key names that are modifiers themselves
const MODIFIER_KEYS: [&str; 5] = ["alt", "control", "ctrl", "shift", "meta"];

/// A physical key-down event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key name as reported by the input source ("a", "1", "F5", "Shift", ...)
    pub key: String,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Build from an egui key press; `meta` is the macOS command key
    pub fn from_egui(key: egui::Key, modifiers: egui::Modifiers) -> Self {
        Self {
            key: egui_key_name(key).to_string(),
            alt: modifiers.alt,
            ctrl: modifiers.ctrl,
            meta: modifiers.mac_cmd,
            shift: modifiers.shift,
        }
    }

    fn held(&self) -> [bool; 4] {
        [self.alt, self.ctrl, self.meta, self.shift]
    }
}

/// Key names following the browser `KeyboardEvent.key` spelling where egui differs
fn egui_key_name(key: egui::Key) -> &'static str {
    use egui::Key;
    match key {
        Key::ArrowDown => "ArrowDown",
        Key::ArrowLeft => "ArrowLeft",
        Key::ArrowRight => "ArrowRight",
        Key::ArrowUp => "ArrowUp",
        other => other.name(),
    }
}

/// Whether a key name denotes a bare modifier press
pub fn is_modifier_key(key: &str) -> bool {
    let lower = key.to_lowercase();
    MODIFIER_KEYS.contains(&lower.as_str())
}

/// Canonical combo for a key event, or an empty string for bare modifier presses
pub fn normalize(event: &KeyEvent) -> String {
    if event.key.is_empty() || is_modifier_key(&event.key) {
        return String::new();
    }

    let mut parts: Vec<String> = MODIFIER_ORDER
        .iter()
        .zip(event.held())
        .filter(|(_, held)| *held)
        .map(|(name, _)| name.to_string())
        .collect();
    parts.push(event.key.to_lowercase());
    parts.join("+")
}

/// Lookup key for a stored hotkey string
pub fn combo_key(hotkey: &str) -> String {
    hotkey.to_lowercase()
}
