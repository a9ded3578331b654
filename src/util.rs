/// Words per minute from completed-token count and elapsed seconds.
/// One point per completed token, rounded; zero before any time has passed.
pub fn words_per_minute(score: u32, elapsed_secs: u32) -> u32 {
    if elapsed_secs == 0 {
        return 0;
    }
    let minutes = elapsed_secs as f64 / 60.0;
    (score as f64 / minutes).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_elapsed_is_zero() {
        assert_eq!(words_per_minute(10, 0), 0);
    }

    #[test]
    fn test_zero_score() {
        assert_eq!(words_per_minute(0, 30), 0);
    }

    #[test]
    fn test_full_minute() {
        assert_eq!(words_per_minute(42, 60), 42);
    }

    #[test]
    fn test_half_minute_doubles() {
        assert_eq!(words_per_minute(5, 30), 10);
    }

    #[test]
    fn test_rounding() {
        // 7 words in 90 seconds = 4.67 wpm
        assert_eq!(words_per_minute(7, 90), 5);
        // 1 word in 45 seconds = 1.33 wpm
        assert_eq!(words_per_minute(1, 45), 1);
    }

    #[test]
    fn test_long_session() {
        assert_eq!(words_per_minute(100, 120), 50);
    }
}
