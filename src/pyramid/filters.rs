/// Burt–Adelson generating kernel `w(i)` for `i ∈ [-2, 2]`.
///
/// `w(0) = a`, `w(±1) = 1/4`, `w(±2) = 1/4 - a/2`. The taps always sum to
/// one; `a = 0.4` gives a Gaussian-like response, `0.3` blurs more broadly,
/// `0.5` is a triangle and `0.6` grows negative lobes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kernel5 {
    taps: [f64; 5],
}

impl Default for Kernel5 {
    fn default() -> Self {
        GAUSSIAN_5TAP
    }
}

impl Kernel5 {
    pub const RADIUS: usize = 2;

    pub const fn new(taps: [f64; 5]) -> Self {
        Self { taps }
    }

    pub fn burt_adelson(a: f64) -> Self {
        let edge = 0.25 - 0.5 * a;
        Self::new([edge, 0.25, a, 0.25, edge])
    }

    #[inline]
    pub fn taps(&self) -> &[f64; 5] {
        &self.taps
    }

    /// Weight for a signed offset; zero outside the support.
    #[inline]
    pub fn weight(&self, offset: isize) -> f64 {
        match offset {
            -2..=2 => self.taps[(offset + 2) as usize],
            _ => 0.0,
        }
    }
}

/// Generating kernel with `a = 0.4`.
pub const GAUSSIAN_5TAP: Kernel5 = Kernel5::new([0.05, 0.25, 0.4, 0.25, 0.05]);
