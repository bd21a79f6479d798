//! # Entity Generators
//!
//! One generator per parent table. Vocabulary-backed tables (languages,
//! countries, tags, festival editions) clamp the requested count to the
//! vocabulary size and number rows `1..=n` in vocabulary order; later
//! generators rely on that numbering when they build identifier spaces.
//! Free-form tables produce exactly the requested number of rows.
//!
//! Every row is "just inserted": `created_at == updated_at`.

use chrono::{NaiveDate, NaiveDateTime};
use rand::Rng;
use tracing::warn;

use crate::generate::providers::{
    catch_phrase, company_name, full_name, hex_string, past_date, past_datetime, pick,
    random_id, sentence, sentences, title, truncate_chars, unique_email, words,
};
use crate::generate::record::record;
use crate::movies::MovieIds;

/// Column width of `studios.name`.
pub const STUDIO_NAME_MAX: usize = 45;
/// Width the random part of `releases.name` is cut to before the suffix.
pub const RELEASE_NAME_STEM_MAX: usize = 40;
const RELEASE_NAME_SUFFIX: &str = " Release";
/// Column width of `releases.name`.
pub const RELEASE_NAME_MAX: usize = RELEASE_NAME_STEM_MAX + RELEASE_NAME_SUFFIX.len();
/// Column width of `movie_lists.name`.
pub const MOVIE_LIST_NAME_MAX: usize = 45;
/// Length of the hex digest stored in `users.password`.
pub const PASSWORD_HASH_LEN: usize = 64;

const EVENT_LINK_PROBABILITY: f64 = 0.3;
const WATCH_LIST_PROBABILITY: f64 = 0.3;
const PRIVATE_LIST_PROBABILITY: f64 = 0.2;
const WATCH_LIKED_PROBABILITY: f64 = 0.7;
const PRIVATE_WATCH_PROBABILITY: f64 = 0.1;
const COMMENT_LIKED_PROBABILITY: f64 = 0.6;

record! {
    /// A row of `users`. Ids are assigned by the database, `1..=n` in insert order.
    pub struct UserRow => "users" {
        name: String,
        email: String,
        profile_image: Option<String>,
        password: String,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    }
}

record! {
    pub struct LanguageRow => "languages" {
        id: i64,
        name: String,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    }
}

record! {
    pub struct CountryRow => "countries" {
        id: i64,
        name: String,
        flag_url: String,
    }
}

record! {
    pub struct StudioRow => "studios" {
        id: i64,
        name: String,
        bio: String,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    }
}

record! {
    /// A festival edition.
    pub struct EventRow => "events" {
        id: i64,
        name: String,
        date: NaiveDate,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    }
}

record! {
    pub struct ReleaseRow => "releases" {
        id: i64,
        name: String,
        date: NaiveDate,
        release_type: String,
        event_id: Option<i64>,
        country_id: i64,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    }
}

record! {
    pub struct TagRow => "tags" {
        id: i64,
        name: String,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    }
}

record! {
    pub struct MovieListRow => "movie_lists" {
        id: i64,
        name: String,
        is_watch_list: bool,
        is_private: bool,
        user_id: i64,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    }
}

record! {
    /// A row of `watches`. Ids are assigned by the database, `1..=n` in insert order.
    pub struct WatchRow => "watches" {
        liked: bool,
        is_private: bool,
        rating: i64,
        review_text: String,
        movie_id: i64,
        user_id: i64,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    }
}

record! {
    pub struct WatchCommentRow => "watch_comments" {
        liked: bool,
        comment_text: String,
        user_id: i64,
        watch_id: i64,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    }
}

pub fn generate_users(count: usize, rng: &mut impl Rng, base_time: NaiveDateTime) -> Vec<UserRow> {
    (0..count)
        .map(|i| {
            let ts = past_datetime(rng, base_time, 3);
            UserRow {
                name: full_name(rng),
                email: unique_email(rng, i),
                profile_image: None,
                password: hex_string(rng, PASSWORD_HASH_LEN),
                created_at: ts,
                updated_at: ts,
            }
        })
        .collect()
}

pub fn generate_languages(
    count: usize,
    vocabulary: &[String],
    rng: &mut impl Rng,
    base_time: NaiveDateTime,
) -> Vec<LanguageRow> {
    vocabulary
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, name)| {
            let ts = past_datetime(rng, base_time, 5);
            LanguageRow {
                id: i as i64 + 1,
                name: name.clone(),
                created_at: ts,
                updated_at: ts,
            }
        })
        .collect()
}

/// Countries carry no timestamps; the flag path is built from the first two
/// letters of the name.
pub fn generate_countries(count: usize, vocabulary: &[String]) -> Vec<CountryRow> {
    vocabulary
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, name)| CountryRow {
            id: i as i64 + 1,
            name: name.clone(),
            flag_url: format!("/flags/{}.png", truncate_chars(name, 2).to_lowercase()),
        })
        .collect()
}

pub fn generate_studios(count: usize, rng: &mut impl Rng, base_time: NaiveDateTime) -> Vec<StudioRow> {
    (0..count)
        .map(|i| {
            let ts = past_datetime(rng, base_time, 5);
            StudioRow {
                id: i as i64 + 1,
                name: truncate_chars(&company_name(rng), STUDIO_NAME_MAX),
                bio: catch_phrase(rng),
                created_at: ts,
                updated_at: ts,
            }
        })
        .collect()
}

/// Events are festival editions. `editions` is the expanded vocabulary from
/// [`crate::generate::vocabulary::festival_editions`].
pub fn generate_events(
    count: usize,
    editions: &[String],
    rng: &mut impl Rng,
    base_time: NaiveDateTime,
) -> Vec<EventRow> {
    editions
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, name)| {
            let ts = past_datetime(rng, base_time, 5);
            EventRow {
                id: i as i64 + 1,
                name: name.clone(),
                date: past_date(rng, base_time, 10),
                created_at: ts,
                updated_at: ts,
            }
        })
        .collect()
}

/// Releases reference a country (required) and optionally a festival event.
///
/// Produces nothing when there are no countries or no release types to
/// reference.
pub fn generate_releases(
    count: usize,
    event_count: usize,
    country_count: usize,
    release_types: &[String],
    rng: &mut impl Rng,
    base_time: NaiveDateTime,
) -> Vec<ReleaseRow> {
    if count > 0 && (country_count == 0 || release_types.is_empty()) {
        warn!(
            "Skipping {} releases: no countries or release types to reference",
            count
        );
        return Vec::new();
    }

    let mut rows = Vec::with_capacity(count);
    for i in 0..count {
        let ts = past_datetime(rng, base_time, 3);
        let stem = truncate_chars(&title(rng, 3), RELEASE_NAME_STEM_MAX);
        let date = past_date(rng, base_time, 20);
        let (Some(release_type), Some(country_id)) =
            (pick(rng, release_types).cloned(), random_id(rng, country_count))
        else {
            break;
        };
        let event_id = if rng.random_bool(EVENT_LINK_PROBABILITY) {
            random_id(rng, event_count)
        } else {
            None
        };
        rows.push(ReleaseRow {
            id: i as i64 + 1,
            name: format!("{}{}", stem, RELEASE_NAME_SUFFIX),
            date,
            release_type,
            event_id,
            country_id,
            created_at: ts,
            updated_at: ts,
        });
    }
    rows
}

pub fn generate_tags(
    count: usize,
    vocabulary: &[String],
    rng: &mut impl Rng,
    base_time: NaiveDateTime,
) -> Vec<TagRow> {
    vocabulary
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, name)| {
            let ts = past_datetime(rng, base_time, 3);
            TagRow {
                id: i as i64 + 1,
                name: name.clone(),
                created_at: ts,
                updated_at: ts,
            }
        })
        .collect()
}

/// Movie lists are owned by a user; nothing is produced without users.
pub fn generate_movie_lists(
    count: usize,
    user_count: usize,
    rng: &mut impl Rng,
    base_time: NaiveDateTime,
) -> Vec<MovieListRow> {
    if count > 0 && user_count == 0 {
        warn!("Skipping {} movie lists: no users to own them", count);
        return Vec::new();
    }

    (0..count)
        .filter_map(|i| {
            let ts = past_datetime(rng, base_time, 2);
            Some(MovieListRow {
                id: i as i64 + 1,
                name: truncate_chars(&words(rng, 3), MOVIE_LIST_NAME_MAX),
                is_watch_list: rng.random_bool(WATCH_LIST_PROBABILITY),
                is_private: rng.random_bool(PRIVATE_LIST_PROBABILITY),
                user_id: random_id(rng, user_count)?,
                created_at: ts,
                updated_at: ts,
            })
        })
        .collect()
}

/// Watches are not a unique relationship: a user may log the same movie
/// more than once.
pub fn generate_watches(
    count: usize,
    movies: &MovieIds,
    user_count: usize,
    rng: &mut impl Rng,
    base_time: NaiveDateTime,
) -> Vec<WatchRow> {
    if count > 0 && user_count == 0 {
        warn!("Skipping {} watches: no users to log them", count);
        return Vec::new();
    }

    (0..count)
        .filter_map(|_| {
            let ts = past_datetime(rng, base_time, 2);
            Some(WatchRow {
                liked: rng.random_bool(WATCH_LIKED_PROBABILITY),
                is_private: rng.random_bool(PRIVATE_WATCH_PROBABILITY),
                rating: rng.random_range(1..=10),
                review_text: sentences(rng, 2),
                movie_id: movies.pick(rng)?,
                user_id: random_id(rng, user_count)?,
                created_at: ts,
                updated_at: ts,
            })
        })
        .collect()
}

pub fn generate_watch_comments(
    count: usize,
    user_count: usize,
    watch_count: usize,
    rng: &mut impl Rng,
    base_time: NaiveDateTime,
) -> Vec<WatchCommentRow> {
    if count > 0 && (user_count == 0 || watch_count == 0) {
        warn!(
            "Skipping {} watch comments: no users or watches to reference",
            count
        );
        return Vec::new();
    }

    (0..count)
        .filter_map(|_| {
            let ts = past_datetime(rng, base_time, 1);
            Some(WatchCommentRow {
                liked: rng.random_bool(COMMENT_LIKED_PROBABILITY),
                comment_text: sentence(rng),
                user_id: random_id(rng, user_count)?,
                watch_id: random_id(rng, watch_count)?,
                created_at: ts,
                updated_at: ts,
            })
        })
        .collect()
}
