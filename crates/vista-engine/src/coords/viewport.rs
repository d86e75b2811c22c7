/// Drawable area in logical (device-independent) pixels.
///
/// Read from the host surface on demand; never persisted. Both dimensions must be
/// non-zero for the viewport to drive a projection update.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Width over height. Only meaningful when [`is_valid`](Self::is_valid).
    #[inline]
    pub fn aspect(self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Converts to physical pixels for the given device pixel ratio.
    ///
    /// Each dimension is rounded and clamped to at least one pixel.
    pub fn to_physical(self, pixel_ratio: f64) -> (u32, u32) {
        let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        let w = (self.width as f64 * ratio).round().max(1.0) as u32;
        let h = (self.height as f64 * ratio).round().max(1.0) as u32;
        (w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ── aspect ────────────────────────────────────────────────────────────

    #[test]
    fn aspect_of_common_sizes() {
        assert_relative_eq!(Viewport::new(800, 600).aspect(), 4.0 / 3.0);
        assert_eq!(Viewport::new(1, 1).aspect(), 1.0);
        assert_relative_eq!(Viewport::new(1920, 1080).aspect(), 1.7778, epsilon = 1e-4);
    }

    #[test]
    fn zero_dimension_is_invalid() {
        assert!(!Viewport::new(0, 600).is_valid());
        assert!(!Viewport::new(800, 0).is_valid());
        assert!(Viewport::new(1, 1).is_valid());
    }

    // ── to_physical ───────────────────────────────────────────────────────

    #[test]
    fn physical_size_scales_by_ratio() {
        assert_eq!(Viewport::new(800, 600).to_physical(1.5), (1200, 900));
    }

    #[test]
    fn physical_size_ignores_bad_ratio() {
        assert_eq!(Viewport::new(800, 600).to_physical(0.0), (800, 600));
        assert_eq!(Viewport::new(800, 600).to_physical(f64::NAN), (800, 600));
    }
}
