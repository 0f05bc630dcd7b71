use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::table::{Column, ColumnKind, JobListing, Schema};

/// Which boolean values a flag predicate lets through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagMode {
    #[default]
    Any,
    TrueOnly,
    FalseOnly,
}

/// A single row test. Predicates are combined by conjunction only.
///
/// Build predicates through the constructors rather than the variants: they
/// consult the table's schema and collapse to `Always` when the target column
/// is absent or has the wrong kind, or when the parameter is the "no
/// constraint" value.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Always,
    /// Case-insensitive substring test; `needle` is stored lower-cased
    Contains { column: Column, needle: String },
    /// Value must be one of `allowed`; an empty set matches nothing
    OneOf {
        column: Column,
        allowed: BTreeSet<String>,
    },
    /// Value must be known and at least `threshold`
    AtLeast { column: Column, threshold: f64 },
    /// Flag must equal `value`
    FlagIs { column: Column, value: bool },
}

fn usable(schema: &Schema, column: Column, kind: ColumnKind) -> bool {
    if column.kind() != kind {
        tracing::debug!("Column '{}' is not {:?}, predicate ignored", column, kind);
        return false;
    }
    if !schema.has(column) {
        tracing::debug!("Column '{}' not in dataset, predicate ignored", column);
        return false;
    }
    true
}

impl Predicate {
    /// Text search. An empty query matches everything.
    pub fn text_contains(schema: &Schema, column: Column, query: &str) -> Self {
        if query.is_empty() || !usable(schema, column, ColumnKind::Text) {
            return Predicate::Always;
        }
        Predicate::Contains {
            column,
            needle: query.to_lowercase(),
        }
    }

    /// Set membership. An empty `allowed` set is an explicit "nothing
    /// selected" and matches no row.
    pub fn one_of<I, S>(schema: &Schema, column: Column, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !usable(schema, column, ColumnKind::Text) {
            return Predicate::Always;
        }
        Predicate::OneOf {
            column,
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Numeric minimum. A threshold of zero or below matches every row,
    /// including rows where the value is unknown.
    pub fn at_least(schema: &Schema, column: Column, threshold: f64) -> Self {
        if threshold.is_nan() || threshold <= 0.0 || !usable(schema, column, ColumnKind::Number) {
            return Predicate::Always;
        }
        Predicate::AtLeast { column, threshold }
    }

    pub fn flag(schema: &Schema, column: Column, mode: FlagMode) -> Self {
        let value = match mode {
            FlagMode::Any => return Predicate::Always,
            FlagMode::TrueOnly => true,
            FlagMode::FalseOnly => false,
        };
        if !usable(schema, column, ColumnKind::Flag) {
            return Predicate::Always;
        }
        Predicate::FlagIs { column, value }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Predicate::Always)
    }

    pub fn matches(&self, listing: &JobListing) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::Contains { column, needle } => listing
                .text(*column)
                .is_some_and(|value| value.to_lowercase().contains(needle.as_str())),
            Predicate::OneOf { column, allowed } => listing
                .text(*column)
                .is_some_and(|value| allowed.contains(value)),
            Predicate::AtLeast { column, threshold } => listing
                .number(*column)
                .is_some_and(|value| value >= *threshold),
            Predicate::FlagIs { column, value } => listing.flag(*column) == Some(*value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema::new([
            Column::Title,
            Column::ScheduleType,
            Column::WorkFromHome,
            Column::SalaryYearly,
        ])
    }

    fn listing(title: Option<&str>, salary: Option<f64>, remote: bool) -> JobListing {
        JobListing {
            title: title.map(str::to_string),
            schedule_type: Some("Full-time".to_string()),
            salary_yearly: salary,
            work_from_home: remote,
            ..Default::default()
        }
    }

    #[test]
    fn test_text_contains_is_case_insensitive() {
        let p = Predicate::text_contains(&schema(), Column::Title, "data ANALYST");
        assert!(p.matches(&listing(Some("Senior Data Analyst"), None, false)));
        assert!(!p.matches(&listing(Some("Data Engineer"), None, false)));
        assert!(!p.matches(&listing(None, None, false)), "missing text never matches");
    }

    #[test]
    fn test_empty_query_is_noop() {
        assert!(Predicate::text_contains(&schema(), Column::Title, "").is_noop());
    }

    #[test]
    fn test_absent_or_mistyped_column_is_noop() {
        assert!(Predicate::text_contains(&schema(), Column::Location, "Berlin").is_noop());
        assert!(Predicate::one_of(&schema(), Column::Via, ["via LinkedIn"]).is_noop());
        assert!(Predicate::text_contains(&schema(), Column::SalaryYearly, "5").is_noop());
        assert!(Predicate::at_least(&schema(), Column::Title, 10.0).is_noop());
        assert!(Predicate::flag(&Schema::default(), Column::WorkFromHome, FlagMode::TrueOnly).is_noop());
    }

    #[test]
    fn test_one_of_with_empty_set_matches_nothing() {
        let p = Predicate::one_of(&schema(), Column::ScheduleType, Vec::<String>::new());
        assert!(!p.is_noop());
        assert!(!p.matches(&listing(Some("Analyst"), None, false)));
    }

    #[test]
    fn test_one_of_membership() {
        let p = Predicate::one_of(&schema(), Column::ScheduleType, ["Full-time", "Contractor"]);
        assert!(p.matches(&listing(Some("Analyst"), None, false)));

        let p = Predicate::one_of(&schema(), Column::ScheduleType, ["Part-time"]);
        assert!(!p.matches(&listing(Some("Analyst"), None, false)));
    }

    #[test]
    fn test_at_least_threshold() {
        let p = Predicate::at_least(&schema(), Column::SalaryYearly, 60000.0);
        assert!(p.matches(&listing(None, Some(60000.0), false)));
        assert!(!p.matches(&listing(None, Some(59999.0), false)));
        assert!(!p.matches(&listing(None, None, false)));

        assert!(Predicate::at_least(&schema(), Column::SalaryYearly, 0.0).is_noop());
        assert!(Predicate::at_least(&schema(), Column::SalaryYearly, -5.0).is_noop());
        assert!(Predicate::at_least(&schema(), Column::SalaryYearly, f64::NAN).is_noop());
    }

    #[test]
    fn test_flag_modes() {
        let remote = listing(None, None, true);
        let onsite = listing(None, None, false);

        assert!(Predicate::flag(&schema(), Column::WorkFromHome, FlagMode::Any).is_noop());

        let p = Predicate::flag(&schema(), Column::WorkFromHome, FlagMode::TrueOnly);
        assert!(p.matches(&remote));
        assert!(!p.matches(&onsite));

        let p = Predicate::flag(&schema(), Column::WorkFromHome, FlagMode::FalseOnly);
        assert!(!p.matches(&remote));
        assert!(p.matches(&onsite));
    }
}
