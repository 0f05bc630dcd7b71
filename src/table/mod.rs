//! Job-listing dataset model and its on-disk CSV form.
//!
//! A dataset lives in two stages: the raw table (`RawListing`, carrying the
//! free-text `description`) and the augmented table (`JobListing`, carrying
//! the extracted `required_skills` instead). Only the augmented table is
//! queried.

pub mod cache;
pub mod format;
pub mod io;
pub mod record;
pub mod sample;
pub mod schema;

pub use cache::SharedTable;
pub use io::{RawTable, read_job_table, read_raw_table, write_job_table};
pub use record::{JobListing, RawListing};
pub use schema::{Column, ColumnKind, Schema};

/// An augmented dataset held in memory. Immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct JobTable {
    schema: Schema,
    records: Vec<JobListing>,
}

impl JobTable {
    pub fn new(schema: Schema, records: Vec<JobListing>) -> Self {
        Self { schema, records }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[JobListing] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
