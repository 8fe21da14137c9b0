//! Keyboard shortcuts shown in the wizard footer.
//!
//! Single source of truth for the hints; `WizardScreen::handle_key` and the
//! prompt dialog implement them.

use crossterm::event::KeyCode;

use crate::wizard::Step;

/// A keyboard shortcut definition
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// Primary key for this shortcut
    pub key: KeyCode,
    /// Alternative key (e.g., letter variant or arrow key)
    pub alt_key: Option<KeyCode>,
    /// Human-readable description of what this shortcut does
    pub description: &'static str,
    /// Context where this shortcut is active
    pub context: ShortcutContext,
}

/// Contexts where shortcuts are active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutContext {
    /// Every page
    Global,
    ObjectsPage,
    ParametersPage,
    SendPage,
    /// While an alert or confirm dialog is open
    Prompt,
}

impl ShortcutContext {
    /// Context for a wizard page
    pub fn for_step(step: Step) -> Self {
        match step {
            Step::Objects => ShortcutContext::ObjectsPage,
            Step::Parameters => ShortcutContext::ParametersPage,
            Step::Send => ShortcutContext::SendPage,
        }
    }
}

impl Shortcut {
    /// Format key for display (e.g., "q", "Enter/→")
    pub fn key_display(&self) -> String {
        let primary = format_keycode(&self.key);
        match &self.alt_key {
            Some(alt) => format!("{}/{}", primary, format_keycode(alt)),
            None => primary,
        }
    }

    /// Compact "key description" hint for the footer
    pub fn hint(&self) -> String {
        format!("[{}] {}", self.key_display(), self.description)
    }
}

/// Format a KeyCode for display
fn format_keycode(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        _ => format!("{:?}", key),
    }
}

/// Static registry of all keyboard shortcuts
pub static SHORTCUTS: &[Shortcut] = &[
    // === Objects page ===
    Shortcut {
        key: KeyCode::Up,
        alt_key: Some(KeyCode::Down),
        description: "Move",
        context: ShortcutContext::ObjectsPage,
    },
    Shortcut {
        key: KeyCode::Char(' '),
        alt_key: None,
        description: "Check object",
        context: ShortcutContext::ObjectsPage,
    },
    Shortcut {
        key: KeyCode::Char('a'),
        alt_key: None,
        description: "Check all",
        context: ShortcutContext::ObjectsPage,
    },
    // === Parameters page ===
    Shortcut {
        key: KeyCode::Up,
        alt_key: Some(KeyCode::Down),
        description: "Switch field",
        context: ShortcutContext::ParametersPage,
    },
    Shortcut {
        key: KeyCode::Backspace,
        alt_key: None,
        description: "Delete",
        context: ShortcutContext::ParametersPage,
    },
    Shortcut {
        key: KeyCode::Char('r'),
        alt_key: None,
        description: "Toggle auto-generation",
        context: ShortcutContext::ParametersPage,
    },
    // === Send page ===
    Shortcut {
        key: KeyCode::Up,
        alt_key: Some(KeyCode::Down),
        description: "Scroll response",
        context: ShortcutContext::SendPage,
    },
    // === Global ===
    Shortcut {
        key: KeyCode::Enter,
        alt_key: Some(KeyCode::Right),
        description: "Next",
        context: ShortcutContext::Global,
    },
    Shortcut {
        key: KeyCode::Esc,
        alt_key: Some(KeyCode::Left),
        description: "Previous",
        context: ShortcutContext::Global,
    },
    Shortcut {
        key: KeyCode::Char('q'),
        alt_key: None,
        description: "Quit",
        context: ShortcutContext::Global,
    },
    // === Prompt ===
    Shortcut {
        key: KeyCode::Left,
        alt_key: Some(KeyCode::Right),
        description: "Choose",
        context: ShortcutContext::Prompt,
    },
    Shortcut {
        key: KeyCode::Char('y'),
        alt_key: Some(KeyCode::Char('n')),
        description: "Yes / No",
        context: ShortcutContext::Prompt,
    },
    Shortcut {
        key: KeyCode::Enter,
        alt_key: None,
        description: "Accept",
        context: ShortcutContext::Prompt,
    },
];

/// Shortcuts active in a single context
pub fn shortcuts_for_context(context: ShortcutContext) -> Vec<&'static Shortcut> {
    SHORTCUTS.iter().filter(|s| s.context == context).collect()
}

/// Footer line for a page: page shortcuts first, then global ones
pub fn footer_hints(step: Step) -> String {
    shortcuts_for_context(ShortcutContext::for_step(step))
        .into_iter()
        .chain(shortcuts_for_context(ShortcutContext::Global))
        .map(Shortcut::hint)
        .collect::<Vec<_>>()
        .join("  ")
}
