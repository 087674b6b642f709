//! Damage threshold - flat reduction applied to every hit

/// Subtract a flat threshold, flooring at 0
pub fn apply_threshold(damage: u32, threshold: u32) -> u32 {
    damage.saturating_sub(threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_subtracts() {
        assert_eq!(apply_threshold(12, 3), 9);
    }

    #[test]
    fn test_threshold_never_negative() {
        assert_eq!(apply_threshold(3, 12), 0);
        assert_eq!(apply_threshold(0, 0), 0);
    }
}
