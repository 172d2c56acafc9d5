//! Types shared by the domain stores

use crate::error::ParseVariantError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Set of item identifiers (documents, results, tags)
///
/// Persistent set: every update returns a new value that shares structure
/// with the old one, so earlier snapshots are never modified.
pub type IdSet = im::OrdSet<String>;

/// Display preference of a list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Dense rows
    #[default]
    List,

    /// Card grid
    Grid,

    /// List with inline preview pane
    Preview,
}

impl ViewMode {
    /// All variants in display order
    pub const ALL: [ViewMode; 3] = [ViewMode::List, ViewMode::Grid, ViewMode::Preview];

    /// Stable name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ViewMode::List => "list",
            ViewMode::Grid => "grid",
            ViewMode::Preview => "preview",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseVariantError::new("view mode", s))
    }
}

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first
    Asc,

    /// Largest first
    #[default]
    Desc,
}

impl SortDirection {
    /// Opposite direction
    #[inline]
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Stable name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Inclusive date window; open ends are unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included
    pub from: Option<NaiveDate>,
    /// Last day included
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Create range
    #[inline]
    #[must_use]
    pub const fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Whether neither end is set
    #[inline]
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Whether `date` falls inside the range
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn view_mode_parses_case_insensitively() {
        assert_eq!("Grid".parse::<ViewMode>().unwrap(), ViewMode::Grid);
        assert_eq!(" preview ".parse::<ViewMode>().unwrap(), ViewMode::Preview);
        assert!("table".parse::<ViewMode>().is_err());
    }

    #[test]
    fn sort_direction_toggles() {
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggled().toggled(), SortDirection::Desc);
    }

    #[test]
    fn date_range_bounds_are_inclusive() {
        let range = DateRange::new(Some(day(5)), Some(day(10)));
        assert!(range.contains(day(5)));
        assert!(range.contains(day(10)));
        assert!(!range.contains(day(11)));
        assert!(DateRange::default().contains(day(1)));
        assert!(DateRange::default().is_unbounded());
    }
}
