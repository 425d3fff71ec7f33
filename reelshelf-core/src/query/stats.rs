//! Collection overview: counts and value distributions across live films.

use std::collections::{BTreeMap, HashSet};

use reelshelf_model::MediaRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub films_count: usize,
    pub genres: Vec<Bucket>,
    pub directors: Vec<Bucket>,
    pub languages: Vec<Bucket>,
    pub decades: Vec<Bucket>,
}

impl CatalogStats {
    /// Aggregate over `records`, skipping soft-deleted and non-film entries.
    ///
    /// Name distributions are alphabetical. A value listed twice on the same
    /// record counts once for that record. Decades are labelled like
    /// `"1990s"` in chronological order; non-positive years are ignored.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a MediaRecord>) -> Self {
        let mut films_count = 0;
        let mut genres = Tally::default();
        let mut directors = Tally::default();
        let mut languages = Tally::default();
        let mut decades: BTreeMap<i32, usize> = BTreeMap::new();

        for record in records {
            if !record.is_film() || record.is_deleted() {
                continue;
            }
            films_count += 1;

            let attributes = &record.attributes;
            genres.add_all(attributes.genres().iter().map(String::as_str));
            directors.add_all(attributes.directors().iter().map(String::as_str));
            languages.add_all(attributes.languages().iter().filter_map(|lang| lang.label()));

            if record.year > 0 {
                *decades.entry(record.year - record.year % 10).or_default() += 1;
            }
        }

        Self {
            films_count,
            genres: genres.into_buckets(),
            directors: directors.into_buckets(),
            languages: languages.into_buckets(),
            decades: decades
                .into_iter()
                .map(|(decade, count)| Bucket {
                    name: format!("{decade}s"),
                    count,
                })
                .collect(),
        }
    }
}

#[derive(Default)]
struct Tally(BTreeMap<String, usize>);

impl Tally {
    fn add_all<'a>(&mut self, values: impl Iterator<Item = &'a str>) {
        let mut seen = HashSet::new();
        for value in values.map(str::trim).filter(|value| !value.is_empty()) {
            if seen.insert(value) {
                *self.0.entry(value.to_owned()).or_default() += 1;
            }
        }
    }

    fn into_buckets(self) -> Vec<Bucket> {
        self.0
            .into_iter()
            .map(|(name, count)| Bucket { name, count })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use reelshelf_model::{CodeName, FilmAttributes, MediaCategory, MediaFormat};

    use super::*;

    fn bucket(name: &str, count: usize) -> Bucket {
        Bucket {
            name: name.to_string(),
            count,
        }
    }

    #[test]
    fn aggregates_live_films() {
        let matrix = MediaRecord::film(1, "The Matrix", MediaFormat::BluRay, 1999).with_attributes(
            FilmAttributes::default()
                .with_genres(["Sci-Fi", "Action"])
                .with_directors(["Lana Wachowski", "Lilly Wachowski"])
                .with_languages(vec![CodeName::new("en", "English")]),
        );
        let alien = MediaRecord::film(2, "Alien", MediaFormat::Dvd, 1979).with_attributes(
            FilmAttributes::default()
                .with_genres(["Sci-Fi", "Horror", "Sci-Fi"])
                .with_languages(vec![CodeName::new("en", ""), CodeName::new("", "")]),
        );
        let mut gone = MediaRecord::film(3, "Deleted", MediaFormat::Vhs, 1985)
            .with_attributes(FilmAttributes::default().with_genres(["Drama"]));
        gone.soft_delete(Utc::now());
        let show = MediaRecord::film(4, "A Show", MediaFormat::Dvd, 2010)
            .with_category(MediaCategory::Tv);
        let undated = MediaRecord::film(5, "Undated", MediaFormat::Dvd, 0);

        let stats = CatalogStats::from_records(&[matrix, alien, gone, show, undated]);

        assert_eq!(stats.films_count, 3);
        assert_eq!(
            stats.genres,
            vec![bucket("Action", 1), bucket("Horror", 1), bucket("Sci-Fi", 2)]
        );
        assert_eq!(
            stats.directors,
            vec![bucket("Lana Wachowski", 1), bucket("Lilly Wachowski", 1)]
        );
        assert_eq!(stats.languages, vec![bucket("English", 1), bucket("en", 1)]);
        assert_eq!(stats.decades, vec![bucket("1970s", 1), bucket("1990s", 1)]);
    }

    #[test]
    fn empty_catalog_is_all_zero() {
        let stats = CatalogStats::from_records(&Vec::<MediaRecord>::new());
        assert_eq!(stats, CatalogStats::default());
    }
}
