//! Confidence scores
//!
//! Model-reported confidence is a single score in `[0.0, 1.0]`. Out-of-range
//! values are clamped rather than rejected.

/// Clamp a confidence score into `[0.0, 1.0]`
///
/// NaN is treated as no information and maps to `0.0`.
///
/// # Examples
///
/// ```
/// use alfrd_domain::clamp_confidence;
///
/// assert_eq!(clamp_confidence(1.5), 1.0);
/// assert_eq!(clamp_confidence(-0.2), 0.0);
/// assert_eq!(clamp_confidence(0.42), 0.42);
/// ```
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}
