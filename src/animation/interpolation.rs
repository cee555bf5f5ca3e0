//! Progress curves and the linear interpolation used by the diff engine.

use std::fmt;
use std::sync::Arc;

use crate::util::easing::EasingFunction;

/// Maps raw time progress onto animation progress.
///
/// Implementations must be stateless and monotonic over `[0, 1]` with
/// `f(0) = 0` and `f(1) = 1`.
pub trait Interpolator: Send + Sync {
    /// Progress curve value at raw progress `t`.
    fn interpolate(&self, t: f32) -> f32;

    /// Optional name for debugging/logging.
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Type alias for shared interpolator references.
pub type SharedInterpolator = Arc<dyn Interpolator>;

/// Create a shared interpolator from any [`Interpolator`] implementation.
#[must_use]
pub fn shared<I: Interpolator + 'static>(interpolator: I) -> SharedInterpolator {
    Arc::new(interpolator)
}

impl Interpolator for EasingFunction {
    fn interpolate(&self, t: f32) -> f32 {
        self.evaluate(t)
    }

    fn name(&self) -> &'static str {
        EasingFunction::name(self)
    }
}

/// Adapts a plain closure into an [`Interpolator`].
pub struct FnInterpolator<F> {
    name: &'static str,
    curve: F,
}

impl<F> FnInterpolator<F>
where
    F: Fn(f32) -> f32 + Send + Sync,
{
    /// Named interpolator backed by `curve`.
    #[must_use]
    pub fn new(name: &'static str, curve: F) -> Self {
        Self { name, curve }
    }
}

impl<F> Interpolator for FnInterpolator<F>
where
    F: Fn(f32) -> f32 + Send + Sync,
{
    fn interpolate(&self, t: f32) -> f32 {
        (self.curve)(t)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

impl<F> fmt::Debug for FnInterpolator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnInterpolator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Lerp two f32 values.
///
/// Progress is not clamped. At exactly `t == 1.0` the end value is returned
/// unchanged so completed animations land on their target without rounding.
#[inline]
#[must_use]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    if t == 1.0 {
        end
    } else {
        start + (end - start) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_f32() {
        assert!((lerp(0.0, 100.0, 0.25) - 25.0).abs() < 0.001);
        assert_eq!(lerp(5.0, 10.0, 0.5), 7.5);
    }

    #[test]
    fn test_lerp_endpoints_are_exact() {
        assert_eq!(lerp(0.1, 0.3, 1.0), 0.3);
        assert_eq!(lerp(0.1, 0.3, 0.0), 0.1);
    }

    #[test]
    fn test_lerp_extrapolates_unclamped() {
        assert_eq!(lerp(0.0, 10.0, 1.5), 15.0);
        assert_eq!(lerp(0.0, 10.0, -0.5), -5.0);
    }

    #[test]
    fn test_easing_as_interpolator() {
        let curve = shared(EasingFunction::QuadraticIn);
        assert_eq!(curve.interpolate(0.5), 0.25);
        assert_eq!(curve.name(), "quadratic-in");
    }

    #[test]
    fn test_closure_interpolator() {
        let curve = shared(FnInterpolator::new("cube", |t: f32| t * t * t));
        assert_eq!(curve.interpolate(0.5), 0.125);
        assert_eq!(curve.name(), "cube");
    }
}
