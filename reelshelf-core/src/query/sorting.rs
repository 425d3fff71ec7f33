use std::cmp::Ordering;

use reelshelf_model::MediaRecord;

use super::types::{SortDirection, SortField};

/// Compare two records on the primary key only.
fn compare_primary(a: &MediaRecord, b: &MediaRecord, field: SortField) -> Ordering {
    match field {
        SortField::Title => a.orderable_title().cmp(b.orderable_title()),
        SortField::Year => a.year.cmp(&b.year),
    }
}

/// Total order used for result lists.
///
/// The direction applies to the primary key; ties are always broken by id
/// ascending so repeated queries page identically.
pub fn compare_records(
    a: &MediaRecord,
    b: &MediaRecord,
    field: SortField,
    direction: SortDirection,
) -> Ordering {
    let primary = compare_primary(a, b, field);
    let primary = match direction {
        SortDirection::Asc => primary,
        SortDirection::Desc => primary.reverse(),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

pub fn sort_records(records: &mut [MediaRecord], field: SortField, direction: SortDirection) {
    records.sort_by(|a, b| compare_records(a, b, field, direction));
}
