/// Binary gigabyte. Disk capacities elsewhere in the inventory are recorded
/// in this unit, so every size conversion goes through it.
pub const BYTES_PER_GB: u64 = 1024 * 1024 * 1024;

/// Convert a byte count to gigabytes rounded half-up to two decimals.
///
/// Rounding happens on the integer byte count, so values sitting exactly on
/// a half-hundredth always round up regardless of float representation.
pub fn bytes_to_gb(bytes: u64) -> f64 {
    let gb = BYTES_PER_GB as u128;
    let hundredths = (bytes as u128 * 100 + gb / 2) / gb;
    hundredths as f64 / 100.0
}

/// Unrounded conversion, for sums that must not accumulate rounding error.
pub fn bytes_to_gb_exact(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GB as f64
}

/// Round an already-computed float to two places, to nearest with `f64`
/// semantics. Not exact on ties; byte counts go through [`bytes_to_gb`].
pub fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_gigabytes() {
        assert_eq!(bytes_to_gb(0), 0.0);
        assert_eq!(bytes_to_gb(BYTES_PER_GB), 1.0);
        assert_eq!(bytes_to_gb(2 * BYTES_PER_GB), 2.0);
    }

    #[test]
    fn test_uses_binary_not_decimal_gigabytes() {
        // 1e9 bytes is 0.93 GiB, not 1.00
        assert_eq!(bytes_to_gb(1_000_000_000), 0.93);
        assert_eq!(bytes_to_gb(500_000_000), 0.47);
    }

    #[test]
    fn test_half_hundredth_rounds_up() {
        // exactly 0.125 GiB
        let eighth = BYTES_PER_GB / 8;
        assert_eq!(bytes_to_gb(eighth), 0.13);
        assert_eq!(bytes_to_gb(eighth - 1), 0.12);
    }

    #[test]
    fn test_round_2dp() {
        assert_eq!(round_2dp(66.666), 66.67);
        assert_eq!(round_2dp(12.0), 12.0);
        // 1.005 is stored just below the half
        assert_eq!(round_2dp(1.005), 1.0);
    }
}
