//! Character to Windows Virtual Key translation for the US-QWERTY layout.
//!
//! Mirrors what `VkKeyScan` reports on a US keyboard: the VK code of the key
//! that produces the character and whether Shift must be held.
//!
//! # What is a Windows Virtual Key (VK) code? (for beginners)
//!
//! Windows assigns each keyboard key a number called a "Virtual Key code",
//! defined in `<winuser.h>` as `VK_*` (e.g. `VK_RETURN = 0x0D`).  Letters and
//! digits use their uppercase ASCII value (`'A'` → `0x41`, `'7'` → `0x37`);
//! punctuation lives on the `VK_OEM_*` codes.

/// The key that types a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyStroke {
    pub virtual_key: u8,
    pub shift: bool,
}

impl KeyStroke {
    const fn plain(virtual_key: u8) -> Self {
        Self { virtual_key, shift: false }
    }

    const fn shifted(virtual_key: u8) -> Self {
        Self { virtual_key, shift: true }
    }
}

const VK_BACK: u8 = 0x08;
const VK_TAB: u8 = 0x09;
const VK_RETURN: u8 = 0x0D;
const VK_ESCAPE: u8 = 0x1B;
const VK_SPACE: u8 = 0x20;
const VK_OEM_1: u8 = 0xBA; // ;:
const VK_OEM_PLUS: u8 = 0xBB; // =+
const VK_OEM_COMMA: u8 = 0xBC; // ,<
const VK_OEM_MINUS: u8 = 0xBD; // -_
const VK_OEM_PERIOD: u8 = 0xBE; // .>
const VK_OEM_2: u8 = 0xBF; // /?
const VK_OEM_3: u8 = 0xC0; // `~
const VK_OEM_4: u8 = 0xDB; // [{
const VK_OEM_5: u8 = 0xDC; // \|
const VK_OEM_6: u8 = 0xDD; // ]}
const VK_OEM_7: u8 = 0xDE; // '"

/// Returns the keystroke producing `key`, or `None` when the layout has none.
pub fn char_to_keystroke(key: char) -> Option<KeyStroke> {
    let stroke = match key {
        'a'..='z' => KeyStroke::plain(key.to_ascii_uppercase() as u8),
        'A'..='Z' => KeyStroke::shifted(key as u8),
        '0'..='9' => KeyStroke::plain(key as u8),

        ' ' => KeyStroke::plain(VK_SPACE),
        '\r' | '\n' => KeyStroke::plain(VK_RETURN),
        '\t' => KeyStroke::plain(VK_TAB),
        '\u{8}' => KeyStroke::plain(VK_BACK),
        '\u{1b}' => KeyStroke::plain(VK_ESCAPE),

        ';' => KeyStroke::plain(VK_OEM_1),
        '=' => KeyStroke::plain(VK_OEM_PLUS),
        ',' => KeyStroke::plain(VK_OEM_COMMA),
        '-' => KeyStroke::plain(VK_OEM_MINUS),
        '.' => KeyStroke::plain(VK_OEM_PERIOD),
        '/' => KeyStroke::plain(VK_OEM_2),
        '`' => KeyStroke::plain(VK_OEM_3),
        '[' => KeyStroke::plain(VK_OEM_4),
        '\\' => KeyStroke::plain(VK_OEM_5),
        ']' => KeyStroke::plain(VK_OEM_6),
        '\'' => KeyStroke::plain(VK_OEM_7),

        ':' => KeyStroke::shifted(VK_OEM_1),
        '+' => KeyStroke::shifted(VK_OEM_PLUS),
        '<' => KeyStroke::shifted(VK_OEM_COMMA),
        '_' => KeyStroke::shifted(VK_OEM_MINUS),
        '>' => KeyStroke::shifted(VK_OEM_PERIOD),
        '?' => KeyStroke::shifted(VK_OEM_2),
        '~' => KeyStroke::shifted(VK_OEM_3),
        '{' => KeyStroke::shifted(VK_OEM_4),
        '|' => KeyStroke::shifted(VK_OEM_5),
        '}' => KeyStroke::shifted(VK_OEM_6),
        '"' => KeyStroke::shifted(VK_OEM_7),

        ')' => KeyStroke::shifted(b'0'),
        '!' => KeyStroke::shifted(b'1'),
        '@' => KeyStroke::shifted(b'2'),
        '#' => KeyStroke::shifted(b'3'),
        '$' => KeyStroke::shifted(b'4'),
        '%' => KeyStroke::shifted(b'5'),
        '^' => KeyStroke::shifted(b'6'),
        '&' => KeyStroke::shifted(b'7'),
        '*' => KeyStroke::shifted(b'8'),
        '(' => KeyStroke::shifted(b'9'),

        _ => return None,
    };
    Some(stroke)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_use_uppercase_ascii_vk() {
        assert_eq!(char_to_keystroke('q'), Some(KeyStroke::plain(0x51)));
        assert_eq!(char_to_keystroke('Q'), Some(KeyStroke::shifted(0x51)));
    }

    #[test]
    fn test_digits_and_their_shifted_symbols() {
        assert_eq!(char_to_keystroke('2'), Some(KeyStroke::plain(0x32)));
        assert_eq!(char_to_keystroke('@'), Some(KeyStroke::shifted(0x32)));
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(char_to_keystroke('\r'), Some(KeyStroke::plain(VK_RETURN)));
        assert_eq!(char_to_keystroke('\t'), Some(KeyStroke::plain(VK_TAB)));
    }

    #[test]
    fn test_non_ascii_is_unmapped() {
        assert_eq!(char_to_keystroke('ß'), None);
    }
}
