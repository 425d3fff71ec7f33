//! Semi-structured descriptive metadata attached to a catalog record.
//!
//! Every key is optional. `None` means the value is unknown, which is
//! different from a known-empty list: filters treat both as "no match", but
//! statistics and editors keep the distinction.

/// A `{code, name}` pair as used for countries (`"US"`, `"United States"`)
/// and spoken languages (`"en"`, `"English"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CodeName {
    pub code: String,
    pub name: String,
}

impl CodeName {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// True when `term` equals either the code or the name, case-exact.
    pub fn matches(&self, term: &str) -> bool {
        self.code == term || self.name == term
    }

    /// Display label: the name when present, the code otherwise.
    pub fn label(&self) -> Option<&str> {
        if !self.name.is_empty() {
            Some(self.name.as_str())
        } else if !self.code.is_empty() {
            Some(self.code.as_str())
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct FilmAttributes {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub genres: Option<Vec<String>>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub directors: Option<Vec<String>>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub tagline: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub countries: Option<Vec<CodeName>>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub languages: Option<Vec<CodeName>>,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none", alias = "run_time")
    )]
    pub run_time: Option<u32>,
}

impl FilmAttributes {
    pub fn is_empty(&self) -> bool {
        self == &FilmAttributes::default()
    }

    pub fn genres(&self) -> &[String] {
        self.genres.as_deref().unwrap_or_default()
    }

    pub fn directors(&self) -> &[String] {
        self.directors.as_deref().unwrap_or_default()
    }

    pub fn countries(&self) -> &[CodeName] {
        self.countries.as_deref().unwrap_or_default()
    }

    pub fn languages(&self) -> &[CodeName] {
        self.languages.as_deref().unwrap_or_default()
    }

    pub fn with_directors<I, S>(mut self, directors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directors = Some(directors.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = Some(genres.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_languages(mut self, languages: Vec<CodeName>) -> Self {
        self.languages = Some(languages);
        self
    }

    pub fn with_countries(mut self, countries: Vec<CodeName>) -> Self {
        self.countries = Some(countries);
        self
    }
}

#[cfg(feature = "serde")]
impl FilmAttributes {
    /// Decode an attribute bag read from an untyped JSON column.
    ///
    /// Keys are decoded independently; a key whose value has the wrong shape
    /// is dropped instead of failing the whole record. Inside a list, each
    /// malformed element is dropped on its own. A non-object document
    /// (including JSON `null`) yields an empty bag.
    pub fn from_json_value(value: &serde_json::Value) -> Self {
        use serde::de::DeserializeOwned;
        use serde_json::{Map, Value};

        fn lookup<'v>(object: &'v Map<String, Value>, keys: &[&str]) -> Option<&'v Value> {
            keys.iter()
                .filter_map(|key| object.get(*key))
                .find(|value| !value.is_null())
        }

        fn field<T: DeserializeOwned>(object: &Map<String, Value>, keys: &[&str]) -> Option<T> {
            lookup(object, keys).and_then(|value| T::deserialize(value).ok())
        }

        fn list<T: DeserializeOwned>(object: &Map<String, Value>, key: &str) -> Option<Vec<T>> {
            let items = lookup(object, &[key])?.as_array()?;
            Some(
                items
                    .iter()
                    .filter_map(|item| T::deserialize(item).ok())
                    .collect(),
            )
        }

        let Some(object) = value.as_object() else {
            return Self::default();
        };

        Self {
            genres: list(object, "genres"),
            directors: list(object, "directors"),
            description: field(object, &["description"]),
            tagline: field(object, &["tagline"]),
            countries: list(object, "countries"),
            languages: list(object, "languages"),
            run_time: field(object, &["runTime", "run_time"]),
        }
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(self)
            .unwrap_or_else(|_| serde_json::Value::Object(Default::default()))
    }
}
