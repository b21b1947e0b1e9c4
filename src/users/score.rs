const TWITTER_WEIGHT: f64 = 0.5;
const WALLET_WEIGHT: f64 = 0.3;
const TELEGRAM_WEIGHT: f64 = 0.2;

/// Weighted total of the three sub-scores, rounded to the nearest integer.
///
/// Inputs are neither validated nor clamped.
pub fn compute_total_score(twitter: i64, wallet: i64, telegram: i64) -> i64 {
    let weighted = (twitter as f64 * TWITTER_WEIGHT)
        + (wallet as f64 * WALLET_WEIGHT)
        + (telegram as f64 * TELEGRAM_WEIGHT);
    weighted.round() as i64
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn weights_twitter_wallet_telegram() {
        assert_eq!(compute_total_score(80, 50, 20), 59);
        assert_eq!(compute_total_score(0, 0, 0), 0);
        assert_eq!(compute_total_score(100, 100, 100), 100);
    }

    #[test]
    fn rounds_half_up() {
        // 0.5 * 1 = 0.5
        assert_eq!(compute_total_score(1, 0, 0), 1);
        // 0.5 * 3 = 1.5
        assert_eq!(compute_total_score(3, 0, 0), 2);
    }

    #[test]
    fn out_of_range_inputs_pass_through() {
        assert_eq!(compute_total_score(-10, 0, 0), -5);
        assert_eq!(compute_total_score(1000, 0, 0), 500);
    }

    proptest! {
        #[test]
        fn deterministic_over_unit_range(t in 0i64..=100, w in 0i64..=100, g in 0i64..=100) {
            let expected = (0.5 * t as f64 + 0.3 * w as f64 + 0.2 * g as f64).round() as i64;
            prop_assert_eq!(compute_total_score(t, w, g), expected);
            prop_assert_eq!(compute_total_score(t, w, g), compute_total_score(t, w, g));
            prop_assert!((0..=100).contains(&compute_total_score(t, w, g)));
        }
    }
}
