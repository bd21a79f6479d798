//! # Relationship Generators
//!
//! Junction tables built on [`PairSampler`]. Each generator picks the two
//! identifier spaces, and shapes every sampled pair into a row. Movie-linked
//! tables draw the movie side from the externally supplied id population.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use rand::Rng;
use serde::Deserialize;

use crate::generate::providers::past_datetime;
use crate::generate::record::record;
use crate::generate::sampler::{IdSpace, PairSampler, Sampled};
use crate::movies::MovieIds;

/// Chance that a row after the first is marked primary under
/// [`PrimaryFlagPolicy::Loose`].
const PRIMARY_FLAG_PROBABILITY: f64 = 0.3;

/// How `is_primary` is assigned in movie-language and movie-list-tag rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimaryFlagPolicy {
    /// The first row of the run is primary; every later row is primary with
    /// a fixed probability. Groups may end up with zero or several primaries.
    #[default]
    Loose,
    /// Exactly one primary per group: the first row sampled for each group.
    OnePerGroup,
}

/// Tracks primary-flag assignment across one generator run.
struct PrimaryFlags {
    policy: PrimaryFlagPolicy,
    emitted: usize,
    groups: HashSet<i64>,
}

impl PrimaryFlags {
    fn new(policy: PrimaryFlagPolicy) -> Self {
        Self {
            policy,
            emitted: 0,
            groups: HashSet::new(),
        }
    }

    fn next(&mut self, group: i64, rng: &mut impl Rng) -> bool {
        self.emitted += 1;
        match self.policy {
            PrimaryFlagPolicy::Loose => {
                self.emitted == 1 || rng.random_bool(PRIMARY_FLAG_PROBABILITY)
            }
            PrimaryFlagPolicy::OnePerGroup => self.groups.insert(group),
        }
    }
}

record! {
    pub struct UserFollowRow => "user_follows" {
        user_id: i64,
        follow_user_id: i64,
        created_at: NaiveDateTime,
    }
}

record! {
    pub struct MovieLanguageRow => "movie_languages" {
        movie_id: i64,
        language_id: i64,
        is_primary: bool,
        created_at: NaiveDateTime,
    }
}

record! {
    pub struct MovieStudioRow => "movie_studios" {
        movie_id: i64,
        studio_id: i64,
        created_at: NaiveDateTime,
    }
}

record! {
    pub struct MovieReleaseRow => "movie_releases" {
        movie_id: i64,
        release_id: i64,
        created_at: NaiveDateTime,
    }
}

record! {
    pub struct MovieListMovieRow => "movie_lists_movie" {
        movie_list_id: i64,
        movie_id: i64,
        created_at: NaiveDateTime,
    }
}

record! {
    pub struct MovieListTagRow => "movie_lists_tags" {
        is_primary: bool,
        movie_list_id: i64,
        tag_id: i64,
        created_at: NaiveDateTime,
    }
}

/// Follows between users. A user never follows themselves.
pub fn generate_user_follows<R: Rng>(
    count: usize,
    user_count: usize,
    rng: &mut R,
    base_time: NaiveDateTime,
) -> Sampled<UserFollowRow> {
    PairSampler::new(IdSpace::Range(user_count), IdSpace::Range(user_count))
        .reject_self_pairs()
        .sample(count, rng, |rng, user_id, follow_user_id| UserFollowRow {
            user_id,
            follow_user_id,
            created_at: past_datetime(rng, base_time, 2),
        })
}

pub fn generate_movie_languages<R: Rng>(
    count: usize,
    movies: &MovieIds,
    language_count: usize,
    policy: PrimaryFlagPolicy,
    rng: &mut R,
    base_time: NaiveDateTime,
) -> Sampled<MovieLanguageRow> {
    let mut flags = PrimaryFlags::new(policy);
    PairSampler::new(movies.id_space(), IdSpace::Range(language_count)).sample(
        count,
        rng,
        |rng, movie_id, language_id| MovieLanguageRow {
            movie_id,
            language_id,
            is_primary: flags.next(movie_id, rng),
            created_at: past_datetime(rng, base_time, 3),
        },
    )
}

pub fn generate_movie_studios<R: Rng>(
    count: usize,
    movies: &MovieIds,
    studio_count: usize,
    rng: &mut R,
    base_time: NaiveDateTime,
) -> Sampled<MovieStudioRow> {
    PairSampler::new(movies.id_space(), IdSpace::Range(studio_count)).sample(
        count,
        rng,
        |rng, movie_id, studio_id| MovieStudioRow {
            movie_id,
            studio_id,
            created_at: past_datetime(rng, base_time, 3),
        },
    )
}

pub fn generate_movie_releases<R: Rng>(
    count: usize,
    movies: &MovieIds,
    release_count: usize,
    rng: &mut R,
    base_time: NaiveDateTime,
) -> Sampled<MovieReleaseRow> {
    PairSampler::new(movies.id_space(), IdSpace::Range(release_count)).sample(
        count,
        rng,
        |rng, movie_id, release_id| MovieReleaseRow {
            movie_id,
            release_id,
            created_at: past_datetime(rng, base_time, 3),
        },
    )
}

pub fn generate_movie_list_movies<R: Rng>(
    count: usize,
    movie_list_count: usize,
    movies: &MovieIds,
    rng: &mut R,
    base_time: NaiveDateTime,
) -> Sampled<MovieListMovieRow> {
    PairSampler::new(IdSpace::Range(movie_list_count), movies.id_space()).sample(
        count,
        rng,
        |rng, movie_list_id, movie_id| MovieListMovieRow {
            movie_list_id,
            movie_id,
            created_at: past_datetime(rng, base_time, 2),
        },
    )
}

pub fn generate_movie_list_tags<R: Rng>(
    count: usize,
    movie_list_count: usize,
    tag_count: usize,
    policy: PrimaryFlagPolicy,
    rng: &mut R,
    base_time: NaiveDateTime,
) -> Sampled<MovieListTagRow> {
    let mut flags = PrimaryFlags::new(policy);
    PairSampler::new(IdSpace::Range(movie_list_count), IdSpace::Range(tag_count)).sample(
        count,
        rng,
        |rng, movie_list_id, tag_id| MovieListTagRow {
            is_primary: flags.next(movie_list_id, rng),
            movie_list_id,
            tag_id,
            created_at: past_datetime(rng, base_time, 2),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use std::path::Path;

    fn test_base_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn movies() -> MovieIds {
        MovieIds::parse("[11, 22, 33, 44, 55, 66, 77, 88]", Path::new("movies.json")).unwrap()
    }

    #[test]
    fn test_follows_among_five_users() {
        let mut rng = StdRng::seed_from_u64(42);
        let sampled = generate_user_follows(10, 5, &mut rng, test_base_time());

        assert!(sampled.len() <= 10);
        let pairs: HashSet<_> = sampled
            .rows
            .iter()
            .map(|r| (r.user_id, r.follow_user_id))
            .collect();
        assert_eq!(pairs.len(), sampled.len());
        for row in &sampled.rows {
            assert_ne!(row.user_id, row.follow_user_id);
            assert!((1..=5).contains(&row.user_id));
            assert!((1..=5).contains(&row.follow_user_id));
        }
    }

    #[test]
    fn test_follows_with_single_user_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let sampled = generate_user_follows(10, 1, &mut rng, test_base_time());
        assert!(sampled.is_empty());
        assert!(sampled.is_short());
    }

    #[test]
    fn test_movie_languages_are_distinct_and_first_is_primary() {
        let mut rng = StdRng::seed_from_u64(7);
        let movies = movies();
        let sampled = generate_movie_languages(
            30,
            &movies,
            15,
            PrimaryFlagPolicy::Loose,
            &mut rng,
            test_base_time(),
        );

        assert_eq!(sampled.len(), 30);
        assert!(sampled.rows[0].is_primary);
        let pairs: HashSet<_> = sampled
            .rows
            .iter()
            .map(|r| (r.movie_id, r.language_id))
            .collect();
        assert_eq!(pairs.len(), 30);
        assert!(sampled
            .rows
            .iter()
            .all(|r| movies.as_slice().contains(&r.movie_id) && (1..=15).contains(&r.language_id)));
    }

    #[test]
    fn test_one_primary_per_group() {
        let mut rng = StdRng::seed_from_u64(3);
        let sampled = generate_movie_list_tags(
            120,
            20,
            30,
            PrimaryFlagPolicy::OnePerGroup,
            &mut rng,
            test_base_time(),
        );

        let mut primaries: HashMap<i64, usize> = HashMap::new();
        let mut groups: HashSet<i64> = HashSet::new();
        for row in &sampled.rows {
            groups.insert(row.movie_list_id);
            if row.is_primary {
                *primaries.entry(row.movie_list_id).or_default() += 1;
            }
        }
        assert_eq!(primaries.len(), groups.len());
        assert!(primaries.values().all(|&n| n == 1));
    }

    #[test]
    fn test_movie_links_use_population() {
        let mut rng = StdRng::seed_from_u64(9);
        let movies = movies();
        let base = test_base_time();

        let studios = generate_movie_studios(20, &movies, 10, &mut rng, base);
        let releases = generate_movie_releases(20, &movies, 10, &mut rng, base);
        let list_movies = generate_movie_list_movies(20, 10, &movies, &mut rng, base);

        assert!(studios.rows.iter().all(|r| movies.as_slice().contains(&r.movie_id)));
        assert!(releases.rows.iter().all(|r| movies.as_slice().contains(&r.movie_id)));
        assert!(list_movies
            .rows
            .iter()
            .all(|r| movies.as_slice().contains(&r.movie_id) && (1..=10).contains(&r.movie_list_id)));

        let distinct: HashSet<_> = list_movies
            .rows
            .iter()
            .map(|r| (r.movie_list_id, r.movie_id))
            .collect();
        assert_eq!(distinct.len(), list_movies.len());
    }

    #[test]
    fn test_missing_parent_yields_short_result() {
        let mut rng = StdRng::seed_from_u64(2);
        let sampled = generate_movie_studios(50, &movies(), 0, &mut rng, test_base_time());
        assert!(sampled.is_empty());
        assert!(sampled.is_short());
    }
}
