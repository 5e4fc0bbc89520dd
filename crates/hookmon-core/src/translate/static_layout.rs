//! A deterministic, side-effect-free [`CharacterTranslator`] for tests and benches.
//!
//! Models a frozen snapshot of the US-QWERTY layout with an explicit shift
//! state. Unlike the live OS facility it is a pure function of its inputs,
//! which is exactly what property tests need: calling it twice with the same
//! payload always yields the same classification.

use super::CharacterTranslator;

/// Frozen US-QWERTY translation with a fixed shift state.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLayoutTranslator {
    shift: bool,
}

impl StaticLayoutTranslator {
    /// Layout snapshot with no modifiers held.
    pub fn new() -> Self {
        Self { shift: false }
    }

    /// Layout snapshot with the shift modifier held.
    pub fn with_shift() -> Self {
        Self { shift: true }
    }
}

impl CharacterTranslator for StaticLayoutTranslator {
    fn translate(&self, vk_code: u32, _scan_code: u32, _state_flags: u32) -> Option<char> {
        match vk_code {
            // VK_A..=VK_Z share their values with ASCII uppercase letters.
            0x41..=0x5A => {
                let upper = char::from_u32(vk_code)?;
                Some(if self.shift {
                    upper
                } else {
                    upper.to_ascii_lowercase()
                })
            }
            // VK_0..=VK_9: digit row, shifted variants per US layout.
            0x30..=0x39 => {
                if self.shift {
                    Some(b")!@#$%^&*("[(vk_code - 0x30) as usize] as char)
                } else {
                    char::from_u32(vk_code)
                }
            }
            0x20 => Some(' '),             // VK_SPACE
            0x0D => Some('\r'),            // VK_RETURN
            0xBC => Some(if self.shift { '<' } else { ',' }), // VK_OEM_COMMA
            0xBE => Some(if self.shift { '>' } else { '.' }), // VK_OEM_PERIOD
            // Everything else (function keys, modifiers, navigation) has no
            // character mapping in this snapshot.
            _ => None,
        }
    }
}
