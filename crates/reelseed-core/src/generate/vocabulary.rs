//! Built-in reference vocabularies. Each can be replaced from the
//! `[vocabulary]` section of `reelseed.toml`.

pub const LANGUAGES: &[&str] = &[
    "English",
    "Spanish",
    "French",
    "German",
    "Japanese",
    "Korean",
    "Mandarin",
    "Hindi",
    "Portuguese",
    "Italian",
    "Russian",
    "Arabic",
    "Dutch",
    "Swedish",
    "Polish",
];

pub const COUNTRIES: &[&str] = &[
    "United States",
    "United Kingdom",
    "France",
    "Germany",
    "Japan",
    "South Korea",
    "China",
    "India",
    "Brazil",
    "Italy",
    "Spain",
    "Canada",
    "Australia",
    "Mexico",
    "Russia",
    "Netherlands",
    "Sweden",
    "Norway",
    "Denmark",
    "Finland",
];

pub const RELEASE_TYPES: &[&str] = &["theatrical", "digital", "dvd", "festival"];

pub const FESTIVALS: &[&str] = &[
    "Cannes Film Festival",
    "Venice Film Festival",
    "Sundance Film Festival",
    "Toronto Film Festival",
    "Berlin Film Festival",
    "Tribeca Film Festival",
];

pub const TAG_NAMES: &[&str] = &[
    "Favorites",
    "Must Watch",
    "Award Winners",
    "Hidden Gems",
    "Classic",
    "Underrated",
    "Overrated",
    "Feel Good",
    "Mind Bending",
    "Tearjerker",
    "Date Night",
    "Family Friendly",
    "Guilty Pleasure",
    "Cult Classic",
    "Foreign Films",
    "Indie",
    "Blockbuster",
    "Slow Burn",
    "Fast Paced",
    "Visually Stunning",
    "Great Soundtrack",
    "Plot Twist",
    "Based on True Story",
    "Book Adaptation",
    "Remake",
    "Sequel",
    "Prequel",
    "Anthology",
    "Short Films",
    "Silent Films",
];

/// First edition year of every festival.
pub const FIRST_EDITION_YEAR: i32 = 2010;

/// Number of yearly editions per festival.
pub const EDITION_YEARS: i32 = 15;

/// Expand festivals into their yearly editions ("Cannes Film Festival 2010",
/// ...), year-major. This is the vocabulary backing the events table.
pub fn festival_editions(festivals: &[String]) -> Vec<String> {
    (FIRST_EDITION_YEAR..FIRST_EDITION_YEAR + EDITION_YEARS)
        .flat_map(|year| festivals.iter().map(move |f| format!("{} {}", f, year)))
        .collect()
}

pub fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_festival_editions_are_year_major() {
        let festivals = to_owned_list(&["Cannes", "Venice"]);
        let editions = festival_editions(&festivals);
        assert_eq!(editions.len(), 2 * EDITION_YEARS as usize);
        assert_eq!(editions[0], "Cannes 2010");
        assert_eq!(editions[1], "Venice 2010");
        assert_eq!(editions[2], "Cannes 2011");
        assert_eq!(editions.last().map(String::as_str), Some("Venice 2024"));
    }
}
