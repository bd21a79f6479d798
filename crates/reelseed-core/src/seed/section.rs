use crate::config::SeedConfig;

/// One block of the seed script, producing rows for a single table.
///
/// Variants are declared in the order sections appear in the script; the
/// dependency sort only reorders when a parent is declared after its child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Users,
    UserFollows,
    Languages,
    Countries,
    Studios,
    MovieLanguages,
    MovieStudios,
    Events,
    Releases,
    MovieReleases,
    Tags,
    MovieLists,
    MovieListsMovie,
    MovieListsTags,
    Watches,
    WatchComments,
}

impl Section {
    pub const ALL: [Section; 16] = [
        Section::Users,
        Section::UserFollows,
        Section::Languages,
        Section::Countries,
        Section::Studios,
        Section::MovieLanguages,
        Section::MovieStudios,
        Section::Events,
        Section::Releases,
        Section::MovieReleases,
        Section::Tags,
        Section::MovieLists,
        Section::MovieListsMovie,
        Section::MovieListsTags,
        Section::Watches,
        Section::WatchComments,
    ];

    /// Human-readable name used in the script banner.
    pub fn banner(self) -> &'static str {
        match self {
            Section::Users => "Users",
            Section::UserFollows => "User Follows",
            Section::Languages => "Languages",
            Section::Countries => "Countries",
            Section::Studios => "Studios",
            Section::MovieLanguages => "Movie Languages",
            Section::MovieStudios => "Movie Studios",
            Section::Events => "Events",
            Section::Releases => "Releases",
            Section::MovieReleases => "Movie Releases",
            Section::Tags => "Tags",
            Section::MovieLists => "Movie Lists",
            Section::MovieListsMovie => "Movie Lists Movies",
            Section::MovieListsTags => "Movie Lists Tags",
            Section::Watches => "Watches",
            Section::WatchComments => "Watch Comments",
        }
    }

    pub fn table(self) -> &'static str {
        match self {
            Section::Users => "users",
            Section::UserFollows => "user_follows",
            Section::Languages => "languages",
            Section::Countries => "countries",
            Section::Studios => "studios",
            Section::MovieLanguages => "movie_languages",
            Section::MovieStudios => "movie_studios",
            Section::Events => "events",
            Section::Releases => "releases",
            Section::MovieReleases => "movie_releases",
            Section::Tags => "tags",
            Section::MovieLists => "movie_lists",
            Section::MovieListsMovie => "movie_lists_movie",
            Section::MovieListsTags => "movie_lists_tags",
            Section::Watches => "watches",
            Section::WatchComments => "watch_comments",
        }
    }

    /// Sections whose generated ids this section references. The movie id
    /// population is external and not listed.
    pub fn depends_on(self) -> &'static [Section] {
        match self {
            Section::UserFollows => &[Section::Users],
            Section::MovieLanguages => &[Section::Languages],
            Section::MovieStudios => &[Section::Studios],
            Section::Releases => &[Section::Events, Section::Countries],
            Section::MovieReleases => &[Section::Releases],
            Section::MovieLists => &[Section::Users],
            Section::MovieListsMovie => &[Section::MovieLists],
            Section::MovieListsTags => &[Section::MovieLists, Section::Tags],
            Section::Watches => &[Section::Users],
            Section::WatchComments => &[Section::Watches, Section::Users],
            Section::Users
            | Section::Languages
            | Section::Countries
            | Section::Studios
            | Section::Events
            | Section::Tags => &[],
        }
    }

    /// Requested row count from the config.
    pub fn requested(self, config: &SeedConfig) -> usize {
        let c = &config.counts;
        match self {
            Section::Users => c.users,
            Section::UserFollows => c.user_follows,
            Section::Languages => c.languages,
            Section::Countries => c.countries,
            Section::Studios => c.studios,
            Section::MovieLanguages => c.movie_languages,
            Section::MovieStudios => c.movie_studios,
            Section::Events => c.events,
            Section::Releases => c.releases,
            Section::MovieReleases => c.movie_releases,
            Section::Tags => c.tags,
            Section::MovieLists => c.movie_lists,
            Section::MovieListsMovie => c.movie_lists_movie,
            Section::MovieListsTags => c.movie_lists_tags,
            Section::Watches => c.watches,
            Section::WatchComments => c.watch_comments,
        }
    }

    /// Size of the vocabulary backing this section, if it has one.
    pub fn vocabulary_limit(self, config: &SeedConfig) -> Option<usize> {
        let v = &config.vocabulary;
        match self {
            Section::Languages => Some(v.languages.len()),
            Section::Countries => Some(v.countries.len()),
            Section::Tags => Some(v.tags.len()),
            Section::Events => Some(v.festival_editions().len()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.banner())
    }
}
