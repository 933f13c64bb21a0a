#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutKey {
    Character(char),
    Space,
    Escape,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortcutModifiers {
    pub ctrl: bool,
    pub alt: bool,
}

impl ShortcutModifiers {
    pub const fn new(ctrl: bool, alt: bool) -> Self {
        Self { ctrl, alt }
    }

    const fn any(self) -> bool {
        self.ctrl || self.alt
    }
}

/// Discrete commands exposed to the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Quit,
    SaveAndNext,
    Save,
    ReloadCurrent,
    Next,
    Previous,
}

impl ShortcutAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Quit => "quit",
            Self::SaveAndNext => "save and next",
            Self::Save => "save",
            Self::ReloadCurrent => "reload current",
            Self::Next => "next",
            Self::Previous => "previous",
        }
    }
}

pub fn resolve_shortcut(key: ShortcutKey, modifiers: ShortcutModifiers) -> Option<ShortcutAction> {
    if modifiers.any() {
        return None;
    }

    match key {
        ShortcutKey::Escape => Some(ShortcutAction::Quit),
        ShortcutKey::Space => Some(ShortcutAction::SaveAndNext),
        ShortcutKey::Character('s') => Some(ShortcutAction::Save),
        ShortcutKey::Character('r') => Some(ShortcutAction::ReloadCurrent),
        ShortcutKey::Character('n') | ShortcutKey::Right => Some(ShortcutAction::Next),
        ShortcutKey::Character('p') | ShortcutKey::Left => Some(ShortcutAction::Previous),
        _ => None,
    }
}
