use log::warn;

/// A value in `0.0..=1.0`, used for progress fractions.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
pub struct UnitInterval(f64);

impl UnitInterval {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);

    /// Creates a unit interval value, clamping out of range values and mapping NaN to `0.0`.
    pub fn new(mut v: f64) -> Self {
        if v.is_nan() {
            warn!("Unit interval provided with NaN, set to 0.0");
            v = 0.0;
        }
        Self(v.clamp(0.0, 1.0))
    }

    /// Creates a unit interval from the fraction `part / whole`.
    ///
    /// A zero `whole` counts as complete.
    pub fn fraction(part: f64, whole: f64) -> Self {
        if whole <= 0.0 {
            return Self::ONE;
        }
        Self::new(part / whole)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}
