//! Key translation tables for character key events.
//!
//! A key event on the wire carries a single character.  Injection happens by
//! hardware scan code, so every character goes through two lookups:
//!
//! ```text
//! char ──(us_layout)──▶ Virtual Key code ──(scan_codes)──▶ set-1 scan code
//! ```
//!
//! The tables describe the US-QWERTY layout.  Platforms with a native,
//! layout-aware resolver (Windows' `VkKeyScanW` + `MapVirtualKeyW`) use that
//! instead; the tables serve every other sink.

pub mod scan_codes;
pub mod us_layout;

pub use us_layout::KeyStroke;

/// A character key resolved to both of its platform identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedKey {
    /// Windows Virtual Key code (logical key).
    pub virtual_key: u8,
    /// Set-1 hardware scan code (physical key).  This is what gets injected.
    pub scan_code: u16,
}

/// Unified key mapper providing all translation directions.
pub struct KeyMapper;

impl KeyMapper {
    /// Translates a character to the Virtual Key code that types it, plus
    /// whether Shift is needed.
    ///
    /// Returns `None` if no key on the layout produces `key`.
    pub fn char_to_virtual_key(key: char) -> Option<KeyStroke> {
        us_layout::char_to_keystroke(key)
    }

    /// Translates a Virtual Key code to its set-1 scan code.
    ///
    /// Returns `None` if the VK has no scan code in the table.
    pub fn virtual_key_to_scan_code(vk: u8) -> Option<u16> {
        scan_codes::vk_to_scan_code(vk)
    }

    /// Resolves a character to its Virtual Key and scan code.
    ///
    /// The Shift requirement is dropped: one datagram injects one key event.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use infalsus_core::KeyMapper;
    ///
    /// let key = KeyMapper::resolve('s').unwrap();
    /// assert_eq!(key.virtual_key, 0x53);
    /// assert_eq!(key.scan_code, 0x1F);
    /// ```
    pub fn resolve(key: char) -> Option<ResolvedKey> {
        let stroke = Self::char_to_virtual_key(key)?;
        let scan_code = Self::virtual_key_to_scan_code(stroke.virtual_key)?;
        Some(ResolvedKey {
            virtual_key: stroke.virtual_key,
            scan_code,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
