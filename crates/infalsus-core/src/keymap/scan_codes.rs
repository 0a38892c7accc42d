//! Windows Virtual Key code to set-1 hardware scan code table.
//!
//! Mirrors `MapVirtualKey(vk, MAPVK_VK_TO_VSC)` on a standard US keyboard.
//!
//! # What is a scan code? (for beginners)
//!
//! A scan code identifies the *physical* key that was pressed, independent of
//! the layout.  Many consumers of injected input (games built on DirectInput
//! or raw input in particular) ignore Virtual Key events and only react to
//! scan codes, so the receiver always injects by scan code.
//!
//! Set-1 scan codes are also the Linux evdev key codes for the main block of
//! the keyboard (`KEY_A = 30 = 0x1E`), which lets the X11 sink reuse them.
//!
//! # How this table works
//!
//! `VK_TO_SCAN_TABLE` is a compile-time array of 256 entries indexed by VK
//! code.  `0` marks "no scan code".

/// Translates a Virtual Key code to its set-1 scan code.
///
/// Returns `None` for VK codes the table does not cover.
pub fn vk_to_scan_code(vk: u8) -> Option<u16> {
    match VK_TO_SCAN_TABLE[vk as usize] {
        0 => None,
        scan => Some(scan),
    }
}

/// VK → scan code table indexed by VK code (0x00–0xFF).
const VK_TO_SCAN_TABLE: [u16; 256] = {
    let mut t = [0u16; 256];

    // ── Alphabet keys (VK_A=0x41 … VK_Z=0x5A) ────────────────────────────────
    t[0x41] = 0x1E; // A
    t[0x42] = 0x30; // B
    t[0x43] = 0x2E; // C
    t[0x44] = 0x20; // D
    t[0x45] = 0x12; // E
    t[0x46] = 0x21; // F
    t[0x47] = 0x22; // G
    t[0x48] = 0x23; // H
    t[0x49] = 0x17; // I
    t[0x4A] = 0x24; // J
    t[0x4B] = 0x25; // K
    t[0x4C] = 0x26; // L
    t[0x4D] = 0x32; // M
    t[0x4E] = 0x31; // N
    t[0x4F] = 0x18; // O
    t[0x50] = 0x19; // P
    t[0x51] = 0x10; // Q
    t[0x52] = 0x13; // R
    t[0x53] = 0x1F; // S
    t[0x54] = 0x14; // T
    t[0x55] = 0x16; // U
    t[0x56] = 0x2F; // V
    t[0x57] = 0x11; // W
    t[0x58] = 0x2D; // X
    t[0x59] = 0x15; // Y
    t[0x5A] = 0x2C; // Z

    // ── Digit row (VK_0=0x30 … VK_9=0x39) ───────────────────────────────────
    t[0x31] = 0x02;
    t[0x32] = 0x03;
    t[0x33] = 0x04;
    t[0x34] = 0x05;
    t[0x35] = 0x06;
    t[0x36] = 0x07;
    t[0x37] = 0x08;
    t[0x38] = 0x09;
    t[0x39] = 0x0A;
    t[0x30] = 0x0B;

    // ── Control keys ─────────────────────────────────────────────────────────
    t[0x1B] = 0x01; // VK_ESCAPE
    t[0x08] = 0x0E; // VK_BACK
    t[0x09] = 0x0F; // VK_TAB
    t[0x0D] = 0x1C; // VK_RETURN
    t[0x20] = 0x39; // VK_SPACE

    // ── OEM punctuation ──────────────────────────────────────────────────────
    t[0xBD] = 0x0C; // VK_OEM_MINUS
    t[0xBB] = 0x0D; // VK_OEM_PLUS
    t[0xDB] = 0x1A; // VK_OEM_4   [
    t[0xDD] = 0x1B; // VK_OEM_6   ]
    t[0xBA] = 0x27; // VK_OEM_1   ;
    t[0xDE] = 0x28; // VK_OEM_7   '
    t[0xC0] = 0x29; // VK_OEM_3   `
    t[0xDC] = 0x2B; // VK_OEM_5   \
    t[0xBC] = 0x33; // VK_OEM_COMMA
    t[0xBE] = 0x34; // VK_OEM_PERIOD
    t[0xBF] = 0x35; // VK_OEM_2   /

    t
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_scan_codes_follow_physical_rows() {
        assert_eq!(vk_to_scan_code(b'Q'), Some(0x10));
        assert_eq!(vk_to_scan_code(b'A'), Some(0x1E));
        assert_eq!(vk_to_scan_code(b'Z'), Some(0x2C));
    }

    #[test]
    fn test_digit_zero_follows_nine() {
        assert_eq!(vk_to_scan_code(b'9'), Some(0x0A));
        assert_eq!(vk_to_scan_code(b'0'), Some(0x0B));
    }

    #[test]
    fn test_unmapped_vk_is_none() {
        assert_eq!(vk_to_scan_code(0x00), None);
        assert_eq!(vk_to_scan_code(0xFF), None);
    }

    #[test]
    fn test_every_mapped_scan_code_is_unique() {
        let mut seen = std::collections::HashSet::new();
        for vk in 0..=255u8 {
            if let Some(scan) = vk_to_scan_code(vk) {
                assert!(seen.insert(scan), "scan code 0x{scan:02X} mapped twice");
            }
        }
    }
}
