use crate::geometry::ViewPoint;
use crate::input::{ShortcutKey, ShortcutModifiers};

fn shortcut_character_from_keycode(keycode: u32) -> Option<char> {
    // Wayland/XKB keycodes are commonly evdev+8. Handle both so shortcuts
    // survive non-latin layouts.
    match keycode {
        31 | 39 => Some('s'),
        19 | 27 => Some('r'),
        49 | 57 => Some('n'),
        25 | 33 => Some('p'),
        _ => None,
    }
}

pub(super) fn normalize_shortcut_key(key: gtk4::gdk::Key, keycode: u32) -> Option<ShortcutKey> {
    match key {
        gtk4::gdk::Key::Escape => return Some(ShortcutKey::Escape),
        gtk4::gdk::Key::space | gtk4::gdk::Key::KP_Space => return Some(ShortcutKey::Space),
        gtk4::gdk::Key::Left | gtk4::gdk::Key::KP_Left => return Some(ShortcutKey::Left),
        gtk4::gdk::Key::Right | gtk4::gdk::Key::KP_Right => return Some(ShortcutKey::Right),
        _ => {}
    }

    let keyval_shortcut = key
        .to_unicode()
        .filter(|character| !character.is_control())
        .map(|character| character.to_ascii_lowercase());
    match keyval_shortcut {
        Some(character) if character.is_ascii() => Some(ShortcutKey::Character(character)),
        Some(_) | None => shortcut_character_from_keycode(keycode).map(ShortcutKey::Character),
    }
}

pub(super) fn shortcut_modifiers(modifier: gtk4::gdk::ModifierType) -> ShortcutModifiers {
    ShortcutModifiers::new(
        modifier.contains(gtk4::gdk::ModifierType::CONTROL_MASK),
        modifier.contains(gtk4::gdk::ModifierType::ALT_MASK),
    )
}

/// Pointer coordinates arrive as fractional widget pixels.
pub(super) fn view_point(x: f64, y: f64) -> ViewPoint {
    ViewPoint::new(x.floor() as i32, y.floor() as i32)
}
