//! Keyboard shortcut dispatch for Probe Browser.
//!
//! Maps platform-normalized key chords to browser actions. Dispatch is a
//! pure lookup: a chord resolves to exactly one action or to nothing, in
//! which case the input passes through to the content view unmodified.

use std::collections::HashMap;

use crate::types::errors::ShortcutError;

/// A normalized key chord. `primary` is the platform's conventional primary
/// modifier: Command on macOS, Control elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub primary: bool,
    pub shift: bool,
    pub alt: bool,
    pub key: String,
}

impl KeyChord {
    pub fn new(primary: bool, shift: bool, alt: bool, key: &str) -> Self {
        Self {
            primary,
            shift,
            alt,
            key: normalize_key(key),
        }
    }

    pub fn primary(key: &str) -> Self {
        Self::new(true, false, false, key)
    }

    pub fn primary_shift(key: &str) -> Self {
        Self::new(true, true, false, key)
    }

    pub fn bare(key: &str) -> Self {
        Self::new(false, false, false, key)
    }
}

/// Single-character keys compare case-insensitively; named keys (`F12`,
/// `Delete`) keep their canonical spelling.
fn normalize_key(key: &str) -> String {
    if key.chars().count() == 1 {
        key.to_lowercase()
    } else {
        key.to_string()
    }
}

/// Actions a shortcut can invoke on the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    NewTab,
    CloseTab,
    Reload,
    HardReload,
    Find,
    FocusAddressBar,
    BookmarkPage,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    Print,
    ViewSource,
    ToggleDevTools,
    /// Select the nth tab (1-based) by creation order. Out-of-range digits
    /// are ignored at dispatch time.
    SelectTab(u8),
    ClearBrowsingData,
}

pub struct ShortcutManager {
    bindings: HashMap<KeyChord, ShortcutAction>,
}

impl ShortcutManager {
    pub fn new() -> Self {
        let mut mgr = Self {
            bindings: HashMap::new(),
        };
        for (chord, action) in Self::defaults() {
            mgr.bindings.insert(chord, action);
        }
        mgr
    }

    /// Pure lookup. `None` means the chord is not ours and passes through.
    pub fn resolve(&self, chord: &KeyChord) -> Option<ShortcutAction> {
        self.bindings.get(chord).copied()
    }

    /// Rebind an action to a new chord, refusing chords already taken by a
    /// different action.
    pub fn rebind(&mut self, action: ShortcutAction, chord: KeyChord) -> Result<(), ShortcutError> {
        if chord.key.is_empty() {
            return Err(ShortcutError::InvalidKeys("empty key".to_string()));
        }
        if let Some(existing) = self.bindings.get(&chord) {
            if *existing != action {
                return Err(ShortcutError::Conflict(format!(
                    "chord already bound to {:?}",
                    existing
                )));
            }
        }
        self.bindings.retain(|_, a| *a != action);
        self.bindings.insert(chord, action);
        Ok(())
    }

    pub fn reset_to_defaults(&mut self) {
        self.bindings = Self::defaults().into_iter().collect();
    }

    fn defaults() -> Vec<(KeyChord, ShortcutAction)> {
        let mut defaults = vec![
            (KeyChord::primary("t"), ShortcutAction::NewTab),
            (KeyChord::primary("w"), ShortcutAction::CloseTab),
            (KeyChord::primary("r"), ShortcutAction::Reload),
            (KeyChord::primary_shift("r"), ShortcutAction::HardReload),
            (KeyChord::primary("f"), ShortcutAction::Find),
            (KeyChord::primary("l"), ShortcutAction::FocusAddressBar),
            (KeyChord::primary("d"), ShortcutAction::BookmarkPage),
            (KeyChord::primary("="), ShortcutAction::ZoomIn),
            (KeyChord::primary("+"), ShortcutAction::ZoomIn),
            (KeyChord::primary("-"), ShortcutAction::ZoomOut),
            (KeyChord::primary("0"), ShortcutAction::ZoomReset),
            (KeyChord::primary("p"), ShortcutAction::Print),
            (KeyChord::primary("u"), ShortcutAction::ViewSource),
            (KeyChord::bare("F12"), ShortcutAction::ToggleDevTools),
            (KeyChord::primary_shift("i"), ShortcutAction::ToggleDevTools),
            (
                KeyChord::primary_shift("Delete"),
                ShortcutAction::ClearBrowsingData,
            ),
        ];
        for digit in 1..=9u8 {
            defaults.push((
                KeyChord::primary(&digit.to_string()),
                ShortcutAction::SelectTab(digit),
            ));
        }
        defaults
    }
}

impl Default for ShortcutManager {
    fn default() -> Self {
        Self::new()
    }
}
