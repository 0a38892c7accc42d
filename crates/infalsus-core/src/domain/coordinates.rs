//! Absolute pointer coordinates in the normalized device space.
//!
//! # What is the normalized device space? (for beginners)
//!
//! Hardware-level pointer injection (for example `SendInput` with
//! `MOUSEEVENTF_ABSOLUTE` on Windows) does not take pixels.  Instead the
//! screen is addressed as a fixed integer grid from 0 to 65535 on both axes,
//! whatever the real resolution.  `(0, 0)` is the top-left corner and
//! `(65535, 65535)` the bottom-right one.
//!
//! An absolute move in this protocol only carries a horizontal fraction.  The
//! vertical coordinate comes from the pointer's live position, re-expressed as
//! a fraction of the screen height, so the pointer stays on the same row.

/// Largest coordinate on either axis of the normalized device space.
pub const NORMALIZED_MAX: i32 = 65535;

/// A pointer position in the 0–65535 normalized device space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsolutePoint {
    pub x: i32,
    pub y: i32,
}

impl AbsolutePoint {
    /// Builds the target of an absolute horizontal move.
    ///
    /// - `x = trunc(normalized_x * 65535)`
    /// - `y = trunc((cursor_y / screen_height) * 65535)`
    ///
    /// A `screen_height` of zero is treated as 1.  Neither axis is clamped:
    /// a fraction outside `[0, 1]` yields an off-screen coordinate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use infalsus_core::AbsolutePoint;
    ///
    /// let p = AbsolutePoint::from_horizontal_fraction(0.5, 540, 1080);
    /// assert_eq!(p, AbsolutePoint { x: 32767, y: 32767 });
    /// ```
    pub fn from_horizontal_fraction(normalized_x: f32, cursor_y: i32, screen_height: i32) -> Self {
        let height = if screen_height == 0 { 1 } else { screen_height };
        let ratio_y = f64::from(cursor_y) / f64::from(height);
        Self {
            x: (normalized_x * NORMALIZED_MAX as f32) as i32,
            y: (ratio_y * f64::from(NORMALIZED_MAX)) as i32,
        }
    }

    /// Returns the point with both axes clamped to `0..=65535`.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0, NORMALIZED_MAX),
            y: self.y.clamp(0, NORMALIZED_MAX),
        }
    }

    /// Maps the point back to pixels on a `width` x `height` screen,
    /// rounding to the nearest pixel.
    ///
    /// 0 maps to the first pixel and 65535 to the last one on each axis.
    pub fn to_pixels(self, width: i32, height: i32) -> (i32, i32) {
        (denormalize(self.x, width), denormalize(self.y, height))
    }
}

fn denormalize(value: i32, extent: i32) -> i32 {
    let last = (extent - 1).max(0);
    (f64::from(value) * f64::from(last) / f64::from(NORMALIZED_MAX)).round() as i32
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_width_truncates_to_32767() {
        let p = AbsolutePoint::from_horizontal_fraction(0.5, 0, 1080);
        assert_eq!(p.x, 32767);
    }

    #[test]
    fn test_full_and_zero_width() {
        assert_eq!(AbsolutePoint::from_horizontal_fraction(1.0, 0, 1080).x, 65535);
        assert_eq!(AbsolutePoint::from_horizontal_fraction(0.0, 0, 1080).x, 0);
    }

    #[test]
    fn test_vertical_fraction_follows_cursor() {
        // Arrange: cursor a quarter of the way down a 1440-pixel screen
        let cursor_y = 360;

        // Act
        let p = AbsolutePoint::from_horizontal_fraction(0.1, cursor_y, 1440);

        // Assert: trunc(0.25 * 65535) = 16383
        assert_eq!(p.y, 16383);
    }

    #[test]
    fn test_zero_screen_height_is_treated_as_one() {
        let p = AbsolutePoint::from_horizontal_fraction(0.0, 2, 0);
        assert_eq!(p.y, 2 * NORMALIZED_MAX);
    }

    #[test]
    fn test_out_of_range_fraction_is_not_clamped() {
        assert_eq!(AbsolutePoint::from_horizontal_fraction(2.0, 0, 1080).x, 131070);
        assert_eq!(AbsolutePoint::from_horizontal_fraction(-0.5, 0, 1080).x, -32767);
    }

    #[test]
    fn test_clamped_limits_both_axes() {
        let p = AbsolutePoint { x: -5, y: 70000 }.clamped();
        assert_eq!(p, AbsolutePoint { x: 0, y: NORMALIZED_MAX });
    }

    #[test]
    fn test_to_pixels_maps_full_range_onto_last_pixel() {
        // Arrange
        let far = AbsolutePoint { x: NORMALIZED_MAX, y: NORMALIZED_MAX };
        let origin = AbsolutePoint { x: 0, y: 0 };

        // Act / Assert
        assert_eq!(far.to_pixels(1920, 1080), (1919, 1079));
        assert_eq!(origin.to_pixels(1920, 1080), (0, 0));
    }

    #[test]
    fn test_to_pixels_keeps_cursor_row_within_a_pixel() {
        let p = AbsolutePoint::from_horizontal_fraction(0.5, 540, 1080);

        let (px, py) = p.to_pixels(1920, 1080);

        // 32767 * 1919 / 65535 = 959.49, 32767 * 1079 / 65535 = 539.49
        assert_eq!((px, py), (959, 539));
    }

    #[test]
    fn test_to_pixels_on_empty_screen_stays_at_origin() {
        assert_eq!(AbsolutePoint { x: NORMALIZED_MAX, y: 100 }.to_pixels(0, 0), (0, 0));
    }
}
