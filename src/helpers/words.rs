//! Word counting and reading-time estimation

/// Count whitespace-separated words
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minutes needed to read `words` at `words_per_minute`, rounded up and
/// never less than one.
pub fn reading_minutes(words: usize, words_per_minute: u32) -> u32 {
    let wpm = words_per_minute.max(1) as usize;
    let minutes = words.div_ceil(wpm);
    u32::try_from(minutes).unwrap_or(u32::MAX).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("Hi there"), 2);
        assert_eq!(count_words("  spaced\tout \n words  "), 3);
        assert_eq!(count_words(""), 0);
    }

    #[test]
    fn test_reading_minutes() {
        assert_eq!(reading_minutes(0, 200), 1);
        assert_eq!(reading_minutes(1, 200), 1);
        assert_eq!(reading_minutes(200, 200), 1);
        assert_eq!(reading_minutes(201, 200), 2);
        assert_eq!(reading_minutes(400, 200), 2);
        assert_eq!(reading_minutes(401, 200), 3);
    }

    #[test]
    fn test_reading_minutes_is_monotonic() {
        let mut last = 0;
        for words in 0..2000 {
            let minutes = reading_minutes(words, 200);
            assert!(minutes >= last);
            assert!(minutes >= 1);
            last = minutes;
        }
    }

    #[test]
    fn test_zero_wpm_does_not_panic() {
        assert_eq!(reading_minutes(3, 0), 3);
    }
}
