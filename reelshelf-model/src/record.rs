use crate::{
    attributes::FilmAttributes,
    chrono::{DateTime, Utc},
    ids::MediaId,
    media_format::{MediaCategory, MediaFormat},
    titles::orderable_title,
};

/// Catalog entry as persisted by the store.
///
/// `orderable_title` is derived from `title` and cannot be set directly:
/// every constructor and [`MediaRecord::set_title`] recompute it, so
/// `record.orderable_title() == orderable_title(&record.title)` holds for
/// any value of this type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(rename_all = "camelCase", from = "StoredMediaRecord")
)]
pub struct MediaRecord {
    pub id: MediaId,
    pub title: String,
    orderable_title: String,
    pub category: MediaCategory,
    pub format: MediaFormat,
    pub year: i32,
    pub attributes: FilmAttributes,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub poster_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl MediaRecord {
    /// Materialize a record for a freshly allocated id.
    pub fn from_new(id: MediaId, new: NewMediaRecord, now: DateTime<Utc>) -> Self {
        Self::restore(id, new, now, now, None)
    }

    /// Rebuild a record from stored columns. Any stored sort key is ignored.
    pub fn restore(
        id: MediaId,
        new: NewMediaRecord,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Self {
        let NewMediaRecord {
            title,
            category,
            format,
            year,
            attributes,
            poster_path,
        } = new;

        Self {
            id,
            orderable_title: orderable_title(&title),
            title,
            category,
            format,
            year,
            attributes,
            poster_path,
            created_at,
            updated_at,
            deleted_at,
        }
    }

    /// Convenience constructor for a film with an empty attribute bag.
    pub fn film(id: i64, title: impl Into<String>, format: MediaFormat, year: i32) -> Self {
        let new = NewMediaRecord::film(title, format, year);
        Self::from_new(MediaId(id), new, Utc::now())
    }

    pub fn with_attributes(mut self, attributes: FilmAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_category(mut self, category: MediaCategory) -> Self {
        self.category = category;
        self
    }

    pub fn orderable_title(&self) -> &str {
        &self.orderable_title
    }

    /// Replace the display title and recompute the sort key.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.orderable_title = orderable_title(&self.title);
    }

    pub fn is_film(&self) -> bool {
        self.category == MediaCategory::Film
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn soft_delete(&mut self, now: DateTime<Utc>) {
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Wire shape accepted when decoding a record. The sort key is ignored and
/// rebuilt from the title so a stale serialized value can never leak in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredMediaRecord {
    id: MediaId,
    title: String,
    #[serde(default)]
    category: MediaCategory,
    format: MediaFormat,
    year: i32,
    #[serde(default)]
    attributes: FilmAttributes,
    #[serde(default)]
    poster_path: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    deleted_at: Option<DateTime<Utc>>,
}

#[cfg(feature = "serde")]
impl From<StoredMediaRecord> for MediaRecord {
    fn from(stored: StoredMediaRecord) -> Self {
        Self {
            id: stored.id,
            orderable_title: orderable_title(&stored.title),
            title: stored.title,
            category: stored.category,
            format: stored.format,
            year: stored.year,
            attributes: stored.attributes,
            poster_path: stored.poster_path,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
            deleted_at: stored.deleted_at,
        }
    }
}

/// Values for a record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct NewMediaRecord {
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: MediaCategory,
    pub format: MediaFormat,
    pub year: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: FilmAttributes,
    #[cfg_attr(feature = "serde", serde(default))]
    pub poster_path: Option<String>,
}

impl NewMediaRecord {
    pub fn film(title: impl Into<String>, format: MediaFormat, year: i32) -> Self {
        Self {
            title: title.into(),
            category: MediaCategory::Film,
            format,
            year,
            attributes: FilmAttributes::default(),
            poster_path: None,
        }
    }

    pub fn with_attributes(mut self, attributes: FilmAttributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// Projection maintained by the search collaborator for every record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchIndexEntry {
    pub id: MediaId,
    pub title: String,
    pub year: i32,
}

impl From<&MediaRecord> for SearchIndexEntry {
    fn from(record: &MediaRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            year: record.year,
        }
    }
}
