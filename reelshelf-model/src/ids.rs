use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Store-assigned identifier of a catalog record.
///
/// Identifiers are allocated by the persistence layer on insert and never
/// change afterwards. Every ordering the query engine produces breaks ties by
/// ascending id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct MediaId(pub i64);

impl MediaId {
    pub fn new(raw: i64) -> Self {
        MediaId(raw)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for MediaId {
    fn from(value: i64) -> Self {
        MediaId(value)
    }
}

impl FromStr for MediaId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(MediaId).map_err(|_| {
            ModelError::InvalidRecord(format!("media id `{s}` is not an integer"))
        })
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer_ids() {
        assert_eq!("42".parse::<MediaId>(), Ok(MediaId(42)));
        assert_eq!(" 7 ".parse::<MediaId>(), Ok(MediaId(7)));
        assert!("abc".parse::<MediaId>().is_err());
    }

    #[test]
    fn orders_numerically() {
        let mut ids = vec![MediaId(10), MediaId(2), MediaId(33)];
        ids.sort();
        assert_eq!(ids, vec![MediaId(2), MediaId(10), MediaId(33)]);
    }
}
