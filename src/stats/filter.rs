use std::fmt::Display;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer};

use super::row::StatRow;

/// Narrows a row sequence before aggregation.
///
/// Report variants (one pole, one axis) are expressed as a filter on the
/// input rows so that every dashboard shares the same aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RowFilter {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub pole_id: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub axis_id: Option<i64>,
}

/// Query-string number where an empty value (`?pole_id=`, as HTML forms send
/// unset fields) means "not given".
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

impl RowFilter {
    pub fn is_empty(&self) -> bool {
        self.pole_id.is_none() && self.axis_id.is_none()
    }

    pub fn matches(&self, row: &StatRow) -> bool {
        let pole_ok = match self.pole_id {
            Some(pole_id) => row.pole_id == Some(pole_id),
            None => true,
        };
        let axis_ok = match self.axis_id {
            Some(axis_id) => row.axis_id == axis_id,
            None => true,
        };
        pole_ok && axis_ok
    }

    pub fn apply<'a>(&'a self, rows: &'a [StatRow]) -> impl Iterator<Item = &'a StatRow> + 'a {
        rows.iter().filter(move |row| self.matches(row))
    }
}
