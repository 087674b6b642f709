//! Damage resistance - fractional reduction after the threshold
//!
//! Formula: `damage_taken = floor(damage * (1 - resistance))`, with
//! resistance read as a fraction in 0.0..=1.0.

use crate::types::floor_to_u32;

/// Calculate damage after resistance
///
/// Resistance outside 0.0..=1.0 is clamped, so the result never exceeds the
/// input and is never negative.
pub fn apply_resistance(damage: u32, resistance: f64) -> u32 {
    if damage == 0 {
        return 0;
    }
    let resistance = if resistance.is_nan() {
        0.0
    } else {
        resistance.clamp(0.0, 1.0)
    };
    floor_to_u32(damage as f64 * (1.0 - resistance)).min(damage)
}

/// Damage absorbed by resistance
pub fn resistance_reduction(damage: u32, resistance: f64) -> u32 {
    damage - apply_resistance(damage, resistance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_resistance_floors() {
        assert_eq!(apply_resistance(15, 0.5), 7);
    }

    #[test]
    fn test_fractional_floor() {
        // 9 * 0.8 = 7.2
        assert_eq!(apply_resistance(9, 0.2), 7);
        assert_eq!(resistance_reduction(9, 0.2), 2);
    }

    #[test]
    fn test_zero_resistance() {
        assert_eq!(apply_resistance(10, 0.0), 10);
    }

    #[test]
    fn test_full_resistance() {
        assert_eq!(apply_resistance(40, 1.0), 0);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(apply_resistance(10, 1.7), 0);
        assert_eq!(apply_resistance(10, -0.5), 10);
        assert_eq!(apply_resistance(10, f64::NAN), 10);
    }

    #[test]
    fn test_representation_error() {
        // 1.0 - 0.07 is 0.9299999999999999
        assert_eq!(apply_resistance(100, 0.07), 93);
    }
}
