//! # Seed Orchestration
//!
//! Runs every section in dependency order against one seeded RNG, feeding
//! each section the number of rows its parents actually produced, and
//! collects the rendered statements into a [`SeedScript`].

pub mod section;

pub use section::Section;

use std::path::Path;

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::SeedConfig;
use crate::error::{Result, SeedError};
use crate::generate::entities;
use crate::generate::record::Record;
use crate::generate::relationships::{self, PrimaryFlagPolicy};
use crate::generate::sampler::Sampled;
use crate::graph::dag::DependencyGraph;
use crate::graph::topo::insertion_order;
use crate::movies::MovieIds;
use crate::output::sql;

/// Resolved settings for a single run.
#[derive(Debug, Clone, Copy)]
pub struct SeedSettings {
    pub seed: u64,
    /// Every generated timestamp lies at or before this instant.
    pub base_time: NaiveDateTime,
    pub transactional: bool,
    pub primary_flags: PrimaryFlagPolicy,
}

impl SeedSettings {
    /// Settings from the config file. Missing seed and base time fall back to
    /// the given values, normally derived from the wall clock by the caller.
    pub fn from_config(config: &SeedConfig, fallback_seed: u64, now: NaiveDateTime) -> Self {
        let generate = &config.generate;
        Self {
            seed: generate.seed.unwrap_or(fallback_seed),
            base_time: generate.base_time.unwrap_or(now),
            transactional: generate.transaction,
            primary_flags: generate.primary_flags,
        }
    }
}

/// One section of a rendered script.
#[derive(Debug, Clone)]
pub struct RenderedSection {
    pub section: Section,
    pub requested: usize,
    pub produced: usize,
    /// A single INSERT statement, or a `-- No data for` comment.
    pub sql: String,
}

impl RenderedSection {
    pub fn is_short(&self) -> bool {
        self.produced < self.requested
    }
}

/// A complete seed script, ready to be written out.
#[derive(Debug, Clone)]
pub struct SeedScript {
    pub generated_at: NaiveDateTime,
    pub transactional: bool,
    pub sections: Vec<RenderedSection>,
}

impl SeedScript {
    /// The full script text.
    pub fn render(&self) -> Result<String> {
        let mut buf = Vec::new();
        sql::write_script(&mut buf, self)?;
        String::from_utf8(buf).map_err(|e| SeedError::Output {
            message: "rendered script is not valid UTF-8".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        sql::write_script_file(self, path)
    }

    pub fn total_rows(&self) -> usize {
        self.sections.iter().map(|s| s.produced).sum()
    }

    pub fn section(&self, section: Section) -> Option<&RenderedSection> {
        self.sections.iter().find(|s| s.section == section)
    }
}

/// A section as it will run, before any rows exist.
#[derive(Debug, Clone)]
pub struct PlannedSection {
    pub section: Section,
    pub requested: usize,
    /// Row cap imposed by a vocabulary, if any.
    pub vocabulary_limit: Option<usize>,
}

impl PlannedSection {
    /// Rows the section can produce at most, ignoring parent populations.
    pub fn expected(&self) -> usize {
        match self.vocabulary_limit {
            Some(limit) => self.requested.min(limit),
            None => self.requested,
        }
    }
}

/// Sections in execution order with their requested counts.
pub fn plan(config: &SeedConfig) -> Result<Vec<PlannedSection>> {
    let graph = DependencyGraph::from_sections(&Section::ALL);
    let order = insertion_order(&graph)?;
    Ok(order
        .into_iter()
        .map(|section| PlannedSection {
            section,
            requested: section.requested(config),
            vocabulary_limit: section.vocabulary_limit(config),
        })
        .collect())
}

/// Generate every section and collect the rendered statements.
///
/// Output is a pure function of the config, the settings and the movie id
/// population: the same inputs always yield the same script.
///
/// `progress` is called after each section with the section's table name,
/// the rows produced so far, and the total rows requested.
pub fn generate(
    config: &SeedConfig,
    settings: &SeedSettings,
    movies: &MovieIds,
    progress: Option<&dyn Fn(&str, usize, usize)>,
) -> Result<SeedScript> {
    let planned = plan(config)?;
    let total_requested: usize = planned.iter().map(|p| p.requested).sum();
    let editions = config.vocabulary.festival_editions();

    let mut rng = StdRng::seed_from_u64(settings.seed);
    let mut produced: IndexMap<Section, usize> = IndexMap::with_capacity(planned.len());
    let mut sections = Vec::with_capacity(planned.len());
    let mut rows_done = 0usize;

    debug!(
        "Generating {} sections with seed {} anchored at {}",
        planned.len(),
        settings.seed,
        settings.base_time
    );

    for step in &planned {
        if let Some(limit) = step.vocabulary_limit {
            if step.requested > limit {
                warn!(
                    "{}: requested {} rows but the vocabulary has {}; clamping",
                    step.section, step.requested, limit
                );
            }
        }

        let ctx = SectionContext {
            config,
            settings,
            movies,
            editions: &editions,
            produced: &produced,
        };
        let (count, statement) = ctx.run(step.section, &mut rng)?;

        info!("{}: {} of {} rows", step.section, count, step.requested);

        produced.insert(step.section, count);
        rows_done += count;
        sections.push(RenderedSection {
            section: step.section,
            requested: step.requested,
            produced: count,
            sql: statement,
        });

        if let Some(cb) = progress {
            cb(step.section.table(), rows_done, total_requested);
        }
    }

    Ok(SeedScript {
        generated_at: settings.base_time,
        transactional: settings.transactional,
        sections,
    })
}

/// Everything a single section needs to run.
struct SectionContext<'a> {
    config: &'a SeedConfig,
    settings: &'a SeedSettings,
    movies: &'a MovieIds,
    editions: &'a [String],
    produced: &'a IndexMap<Section, usize>,
}

impl SectionContext<'_> {
    /// Rows produced by an earlier section; zero if it has not run.
    fn count_of(&self, section: Section) -> usize {
        self.produced.get(&section).copied().unwrap_or(0)
    }

    fn run<R: Rng>(&self, section: Section, rng: &mut R) -> Result<(usize, String)> {
        let counts = &self.config.counts;
        let vocab = &self.config.vocabulary;
        let base = self.settings.base_time;
        let policy = self.settings.primary_flags;

        match section {
            Section::Users => render(&entities::generate_users(counts.users, rng, base)),
            Section::UserFollows => render_sampled(
                section,
                relationships::generate_user_follows(
                    counts.user_follows,
                    self.count_of(Section::Users),
                    rng,
                    base,
                ),
            ),
            Section::Languages => render(&entities::generate_languages(
                counts.languages,
                &vocab.languages,
                rng,
                base,
            )),
            Section::Countries => render(&entities::generate_countries(
                counts.countries,
                &vocab.countries,
            )),
            Section::Studios => render(&entities::generate_studios(counts.studios, rng, base)),
            Section::MovieLanguages => render_sampled(
                section,
                relationships::generate_movie_languages(
                    counts.movie_languages,
                    self.movies,
                    self.count_of(Section::Languages),
                    policy,
                    rng,
                    base,
                ),
            ),
            Section::MovieStudios => render_sampled(
                section,
                relationships::generate_movie_studios(
                    counts.movie_studios,
                    self.movies,
                    self.count_of(Section::Studios),
                    rng,
                    base,
                ),
            ),
            Section::Events => render(&entities::generate_events(
                counts.events,
                self.editions,
                rng,
                base,
            )),
            Section::Releases => render(&entities::generate_releases(
                counts.releases,
                self.count_of(Section::Events),
                self.count_of(Section::Countries),
                &vocab.release_types,
                rng,
                base,
            )),
            Section::MovieReleases => render_sampled(
                section,
                relationships::generate_movie_releases(
                    counts.movie_releases,
                    self.movies,
                    self.count_of(Section::Releases),
                    rng,
                    base,
                ),
            ),
            Section::Tags => render(&entities::generate_tags(counts.tags, &vocab.tags, rng, base)),
            Section::MovieLists => render(&entities::generate_movie_lists(
                counts.movie_lists,
                self.count_of(Section::Users),
                rng,
                base,
            )),
            Section::MovieListsMovie => render_sampled(
                section,
                relationships::generate_movie_list_movies(
                    counts.movie_lists_movie,
                    self.count_of(Section::MovieLists),
                    self.movies,
                    rng,
                    base,
                ),
            ),
            Section::MovieListsTags => render_sampled(
                section,
                relationships::generate_movie_list_tags(
                    counts.movie_lists_tags,
                    self.count_of(Section::MovieLists),
                    self.count_of(Section::Tags),
                    policy,
                    rng,
                    base,
                ),
            ),
            Section::Watches => render(&entities::generate_watches(
                counts.watches,
                self.movies,
                self.count_of(Section::Users),
                rng,
                base,
            )),
            Section::WatchComments => render(&entities::generate_watch_comments(
                counts.watch_comments,
                self.count_of(Section::Users),
                self.count_of(Section::Watches),
                rng,
                base,
            )),
        }
    }
}

fn render<T: Record>(rows: &[T]) -> Result<(usize, String)> {
    Ok((rows.len(), sql::build_insert(rows)?))
}

fn render_sampled<T: Record>(section: Section, sampled: Sampled<T>) -> Result<(usize, String)> {
    if sampled.is_short() {
        warn!(
            "{}: produced {} of {} requested rows ({} distinct pairs available, {} attempts)",
            section,
            sampled.len(),
            sampled.requested,
            sampled.capacity,
            sampled.attempts
        );
    }
    render(&sampled.into_rows())
}
