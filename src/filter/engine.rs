use serde::Serialize;
use std::collections::BTreeSet;

use super::aggregate::distinct_values;
use super::predicate::{FlagMode, Predicate};
use crate::table::{Column, JobListing, JobTable, Schema};

/// Dashboard filter state.
///
/// Categorical selections are `Option`s: `None` means the control is off and
/// contributes no constraint, `Some(set)` restricts to the set (an empty set
/// matches nothing).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSpec {
    pub title_query: String,
    pub company_query: String,
    pub schedule_types: Option<BTreeSet<String>>,
    pub platforms: Option<BTreeSet<String>>,
    pub locations: Option<BTreeSet<String>>,
    pub min_salary: f64,
    pub work_mode: FlagMode,
}

impl FilterSpec {
    /// Initial dashboard state: every schedule type present in the table is
    /// selected, everything else is off.
    pub fn dashboard_defaults(table: &JobTable) -> Self {
        let schedule_types = table
            .schema()
            .has(Column::ScheduleType)
            .then(|| distinct_values(&FilterEngine::new(table).all(), Column::ScheduleType));

        Self {
            schedule_types,
            ..Default::default()
        }
    }

    pub fn predicates(&self, schema: &Schema) -> Vec<Predicate> {
        let mut predicates = vec![
            Predicate::text_contains(schema, Column::Title, &self.title_query),
            Predicate::text_contains(schema, Column::CompanyName, &self.company_query),
        ];

        let categorical = [
            (Column::ScheduleType, &self.schedule_types),
            (Column::Via, &self.platforms),
            (Column::Location, &self.locations),
        ];
        for (column, selection) in categorical {
            if let Some(allowed) = selection {
                predicates.push(Predicate::one_of(schema, column, allowed.iter().cloned()));
            }
        }

        predicates.push(Predicate::at_least(schema, Column::SalaryYearly, self.min_salary));
        predicates.push(Predicate::flag(schema, Column::WorkFromHome, self.work_mode));

        predicates.retain(|p| !p.is_noop());
        predicates
    }
}

/// Applies predicate conjunctions to a table it borrows but never mutates.
#[derive(Debug, Clone, Copy)]
pub struct FilterEngine<'t> {
    table: &'t JobTable,
}

impl<'t> FilterEngine<'t> {
    pub fn new(table: &'t JobTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'t JobTable {
        self.table
    }

    /// View over every row.
    pub fn all(&self) -> View<'t> {
        View {
            table: self.table,
            rows: (0..self.table.len()).collect(),
        }
    }

    /// Rows satisfying every predicate. An empty slice selects everything.
    pub fn apply(&self, predicates: &[Predicate]) -> View<'t> {
        self.all().refine(predicates)
    }

    pub fn filter(&self, spec: &FilterSpec) -> View<'t> {
        let predicates = spec.predicates(self.table.schema());
        tracing::debug!("Filtering with {} active predicate(s)", predicates.len());
        self.apply(&predicates)
    }
}

/// A read-only selection of rows of a `JobTable`, in table order.
#[derive(Debug, Clone)]
pub struct View<'t> {
    table: &'t JobTable,
    rows: Vec<usize>,
}

impl<'t> View<'t> {
    pub fn schema(&self) -> &'t Schema {
        self.table.schema()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Positions of the selected rows in the underlying table.
    pub fn row_ids(&self) -> &[usize] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'t JobListing> + '_ {
        let records = self.table.records();
        self.rows.iter().map(move |&i| &records[i])
    }

    /// Narrow this view further. Never widens it.
    pub fn refine(&self, predicates: &[Predicate]) -> View<'t> {
        let records = self.table.records();
        let rows = self
            .rows
            .iter()
            .copied()
            .filter(|&i| predicates.iter().all(|p| p.matches(&records[i])))
            .collect();

        View {
            table: self.table,
            rows,
        }
    }
}
