use crate::util::Float;

/// Logistic function `1 / (1 + e^-z)`.
///
/// The exponent is always taken of a non-positive value so large
/// magnitudes saturate to 0 or 1 instead of overflowing.
pub fn sigmoid(val: Float) -> Float {
    if val >= 0.0 {
        1.0 / (1.0 + (-val).exp())
    } else {
        let e = val.exp();
        e / (1.0 + e)
    }
}

/// Derivative of the sigmoid expressed through its own output `o`.
pub fn sigmoid_deriv(out: Float) -> Float {
    out * (1.0 - out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_known_points() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!((sigmoid(1.0) - 0.731_058_578_630_004_9).abs() < 1e-12);
        assert!((sigmoid(-1.0) - 0.268_941_421_369_995_1).abs() < 1e-12);
    }

    #[test]
    fn sigmoid_is_symmetric() {
        for z in [0.1, 0.7, 2.5, 10.0, 30.0] {
            assert!((sigmoid(z) + sigmoid(-z) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn sigmoid_saturates_without_overflow() {
        let hi = sigmoid(1e6);
        let lo = sigmoid(-1e6);

        assert!(hi.is_finite() && lo.is_finite());
        assert_eq!(hi, 1.0);
        assert_eq!(lo, 0.0);
        assert!(!sigmoid(Float::MAX).is_nan());
        assert!(!sigmoid(Float::MIN).is_nan());
    }

    #[test]
    fn deriv_peaks_at_half() {
        assert_eq!(sigmoid_deriv(0.5), 0.25);
        assert_eq!(sigmoid_deriv(0.0), 0.0);
        assert_eq!(sigmoid_deriv(1.0), 0.0);
    }
}
