use std::collections::BTreeSet;

use reelshelf_model::MediaRecord;

/// Every distinct director across live films, trimmed, non-empty and sorted
/// lexicographically. Independent of any active filter.
pub fn distinct_directors<'a>(records: impl IntoIterator<Item = &'a MediaRecord>) -> Vec<String> {
    records
        .into_iter()
        .filter(|record| record.is_film() && !record.is_deleted())
        .flat_map(|record| record.attributes.directors())
        .map(|director| director.trim())
        .filter(|director| !director.is_empty())
        .map(str::to_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use reelshelf_model::{FilmAttributes, MediaCategory, MediaFormat};

    use super::*;

    fn film(id: i64, directors: &[&str]) -> MediaRecord {
        MediaRecord::film(id, format!("Film {id}"), MediaFormat::Dvd, 2000)
            .with_attributes(FilmAttributes::default().with_directors(directors.iter().copied()))
    }

    #[test]
    fn trims_dedups_and_sorts() {
        let records = vec![
            film(1, &["Ridley Scott", "  Lana Wachowski "]),
            film(2, &["Lana Wachowski", "", "   "]),
            film(3, &["Denis Villeneuve"]),
            MediaRecord::film(4, "No directors", MediaFormat::Vhs, 1990),
        ];

        assert_eq!(
            distinct_directors(&records),
            vec!["Denis Villeneuve", "Lana Wachowski", "Ridley Scott"]
        );
    }

    #[test]
    fn skips_deleted_and_non_film_records() {
        let mut deleted = film(1, &["Ghost Director"]);
        deleted.soft_delete(Utc::now());
        let series = film(2, &["Series Showrunner"]).with_category(MediaCategory::Tv);
        let live = film(3, &["Agnès Varda"]);

        assert_eq!(distinct_directors(&[deleted, series, live]), vec!["Agnès Varda"]);
    }

    #[test]
    fn empty_catalog_has_no_directors() {
        assert!(distinct_directors(&Vec::<MediaRecord>::new()).is_empty());
    }
}
