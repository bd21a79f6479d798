//! # Synthetic Value Providers
//!
//! Small building blocks shared by the entity and relationship generators:
//! fake names and text from the `fake` crate, timestamps anchored to the
//! pinned base time, and width-bounded strings.

use chrono::{Duration as ChronoDuration, NaiveDate, NaiveDateTime};
use fake::faker::company::en::{CatchPhrase, CompanyName};
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Sentence, Sentences, Words};
use fake::faker::name::en::Name;
use fake::Fake;
use rand::seq::IndexedRandom;
use rand::Rng;

const SECONDS_PER_YEAR: i64 = 365 * 24 * 60 * 60;

/// A timestamp up to `years` years before `base_time`.
///
/// All temporal values derive from the pinned base time so that a fixed seed
/// reproduces the same script regardless of when it runs.
pub fn past_datetime(rng: &mut impl Rng, base_time: NaiveDateTime, years: i64) -> NaiveDateTime {
    let seconds_ago = rng.random_range(1..=years.max(1) * SECONDS_PER_YEAR);
    base_time - ChronoDuration::seconds(seconds_ago)
}

/// A calendar date up to `years` years before `base_time`.
pub fn past_date(rng: &mut impl Rng, base_time: NaiveDateTime, years: i64) -> NaiveDate {
    past_datetime(rng, base_time, years).date()
}

/// Truncate to at most `max_chars` characters, never splitting a character.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => s[..byte_idx].to_string(),
        None => s.to_string(),
    }
}

/// Pick a uniformly random element, or `None` for an empty slice.
pub fn pick<'a, T>(rng: &mut impl Rng, items: &'a [T]) -> Option<&'a T> {
    items.choose(rng)
}

/// A uniformly random id in `[1, max]`, or `None` when `max` is zero.
pub fn random_id(rng: &mut impl Rng, max: usize) -> Option<i64> {
    if max == 0 {
        None
    } else {
        Some(rng.random_range(1..=max as i64))
    }
}

pub fn full_name(rng: &mut impl Rng) -> String {
    Name().fake_with_rng(rng)
}

/// A lowercase email made unique by embedding the row index.
pub fn unique_email(rng: &mut impl Rng, row_index: usize) -> String {
    let email: String = SafeEmail().fake_with_rng(rng);
    match email.split_once('@') {
        Some((local, domain)) => format!("{}.{}@{}", local, row_index, domain).to_lowercase(),
        None => format!("user{}@example.com", row_index),
    }
}

pub fn company_name(rng: &mut impl Rng) -> String {
    CompanyName().fake_with_rng(rng)
}

pub fn catch_phrase(rng: &mut impl Rng) -> String {
    CatchPhrase().fake_with_rng(rng)
}

/// `count` lorem words joined by spaces.
pub fn words(rng: &mut impl Rng, count: usize) -> String {
    let words: Vec<String> = Words(count..count + 1).fake_with_rng(rng);
    words.join(" ")
}

/// Lorem words with the first letter of each word capitalized.
pub fn title(rng: &mut impl Rng, count: usize) -> String {
    words(rng, count)
        .split(' ')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn sentence(rng: &mut impl Rng) -> String {
    Sentence(4..10).fake_with_rng(rng)
}

/// Exactly `count` lorem sentences joined by spaces.
pub fn sentences(rng: &mut impl Rng, count: usize) -> String {
    let sentences: Vec<String> = Sentences(count..count + 1).fake_with_rng(rng);
    sentences.join(" ")
}

/// A lowercase hexadecimal string of `len` characters.
pub fn hex_string(rng: &mut impl Rng, len: usize) -> String {
    const CHARS: &[u8] = b"0123456789abcdef";
    (0..len)
        .map(|_| CHARS[rng.random_range(0..CHARS.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn test_base_time() -> NaiveDateTime {
        NaiveDateTime::new(
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            chrono::NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_past_datetime_is_within_window() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let base = test_base_time();
        for _ in 0..500 {
            let ts = past_datetime(&mut rng, base, 3);
            assert!(ts < base);
            assert!(ts >= base - ChronoDuration::days(3 * 365));
        }
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("Cinéma Paradiso", 6), "Cinéma");
        assert_eq!(truncate_chars("short", 45), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_unique_email_embeds_row_index() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let email = unique_email(&mut rng, 31);
        assert!(email.contains(".31@"), "got {}", email);
        assert_eq!(email, email.to_lowercase());
    }

    #[test]
    fn test_hex_string_shape() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let hex = hex_string(&mut rng, 64);
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_random_id_bounds() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        assert_eq!(random_id(&mut rng, 0), None);
        for _ in 0..100 {
            let id = random_id(&mut rng, 5).unwrap();
            assert!((1..=5).contains(&id));
        }
    }

    #[test]
    fn test_sentences_count() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(9);
        let text = sentences(&mut rng, 2);
        assert_eq!(text.matches('.').count(), 2, "got {}", text);
    }
}
