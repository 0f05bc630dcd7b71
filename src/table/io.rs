//! CSV reading and writing for raw and augmented datasets.
//!
//! Only whole-file problems (cannot open, missing required column, I/O
//! failure mid-read) are errors. A row the CSV decoder rejects is skipped with
//! a warning, and every cell is parsed leniently through `table::format`.

use csv::{ErrorKind, ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use super::format::{
    format_flag, format_number, format_timestamp, join_skills, parse_flag, parse_number,
    parse_timestamp, split_skills,
};
use super::record::{JobListing, RawListing};
use super::schema::{Column, Schema};
use super::JobTable;
use crate::error::DatasetError;

/// Columns the extraction step cannot run without.
pub const RAW_REQUIRED_COLUMNS: &[Column] = &[Column::Description];

/// Raw dataset as read from disk.
#[derive(Debug, Default)]
pub struct RawTable {
    pub schema: Schema,
    pub rows: Vec<RawListing>,
    pub skipped_rows: usize,
    /// Decoded rows dropped by sampling
    pub sampled_out: usize,
}

impl RawTable {
    /// Data rows the file held: kept, sampled out and undecodable.
    pub fn rows_read(&self) -> usize {
        self.rows.len() + self.sampled_out + self.skipped_rows
    }
}

/// Maps known columns to their position in the header row.
struct HeaderIndex {
    positions: Vec<(Column, usize)>,
}

impl HeaderIndex {
    fn new(headers: &StringRecord) -> Self {
        let mut positions: Vec<(Column, usize)> = Vec::new();
        for (position, name) in headers.iter().enumerate() {
            if let Some(column) = Column::from_name(name) {
                // First occurrence wins on duplicate header names
                if !positions.iter().any(|(c, _)| *c == column) {
                    positions.push((column, position));
                }
            }
        }
        Self { positions }
    }

    fn schema(&self) -> Schema {
        Schema::new(self.positions.iter().map(|(c, _)| *c))
    }

    fn cell<'r>(&self, record: &'r StringRecord, column: Column) -> Option<&'r str> {
        self.positions
            .iter()
            .find(|(c, _)| *c == column)
            .and_then(|(_, position)| record.get(*position))
    }

    fn text(&self, record: &StringRecord, column: Column) -> Option<String> {
        self.cell(record, column)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn raw_listing(&self, record: &StringRecord) -> RawListing {
        RawListing {
            title: self.text(record, Column::Title),
            company_name: self.text(record, Column::CompanyName),
            location: self.text(record, Column::Location),
            via: self.text(record, Column::Via),
            schedule_type: self.text(record, Column::ScheduleType),
            work_from_home: parse_flag(self.cell(record, Column::WorkFromHome)),
            date_time: parse_timestamp(self.cell(record, Column::DateTime)),
            salary_yearly: parse_number(self.cell(record, Column::SalaryYearly)),
            description: self.text(record, Column::Description),
        }
    }

    fn job_listing(&self, record: &StringRecord) -> JobListing {
        let required_skills = self
            .cell(record, Column::RequiredSkills)
            .map(split_skills)
            .unwrap_or_default();
        self.raw_listing(record).into_listing(required_skills)
    }
}

fn open(path: &Path) -> Result<File, DatasetError> {
    File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode every row of `reader`, skipping rows the decoder rejects.
fn decode_rows<R, T, F>(
    reader: &mut csv::Reader<R>,
    source: &Path,
    mut decode: F,
) -> Result<(Vec<T>, usize), DatasetError>
where
    R: Read,
    F: FnMut(&StringRecord) -> T,
{
    let mut rows = Vec::new();
    let mut skipped = 0;

    for (index, result) in reader.records().enumerate() {
        match result {
            Ok(record) => rows.push(decode(&record)),
            Err(e) if matches!(e.kind(), ErrorKind::Io(_)) => return Err(e.into()),
            Err(e) => {
                // Header is line 1, so data row N is on line N + 2
                tracing::warn!("Skipping row {} of {}: {}", index + 2, source.display(), e);
                skipped += 1;
            }
        }
    }

    Ok((rows, skipped))
}

fn reader_for<R: Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new().flexible(true).from_reader(input)
}

/// Read a pre-extraction dataset. Fails if the `description` column is absent.
pub fn read_raw_table(path: &Path) -> Result<RawTable, DatasetError> {
    read_raw_from(open(path)?, path)
}

pub fn read_raw_from<R: Read>(input: R, source: &Path) -> Result<RawTable, DatasetError> {
    let mut reader = reader_for(input);
    let index = HeaderIndex::new(reader.headers()?);
    let schema = index.schema();

    let missing = schema.missing(RAW_REQUIRED_COLUMNS);
    if !missing.is_empty() {
        return Err(DatasetError::MissingColumns {
            path: source.to_path_buf(),
            columns: missing.iter().map(|c| c.name()).collect::<Vec<_>>().join(", "),
        });
    }

    let (rows, skipped_rows) = decode_rows(&mut reader, source, |r| index.raw_listing(r))?;
    tracing::debug!(
        "Read {} raw rows from {} ({} skipped)",
        rows.len(),
        source.display(),
        skipped_rows
    );

    Ok(RawTable {
        schema,
        rows,
        skipped_rows,
        sampled_out: 0,
    })
}

/// Read an augmented dataset. No column is required; absent ones are simply
/// missing from the table's schema.
pub fn read_job_table(path: &Path) -> Result<JobTable, DatasetError> {
    read_job_table_from(open(path)?, path)
}

pub fn read_job_table_from<R: Read>(input: R, source: &Path) -> Result<JobTable, DatasetError> {
    let mut reader = reader_for(input);
    let index = HeaderIndex::new(reader.headers()?);
    let schema = index.schema();

    let (records, skipped) = decode_rows(&mut reader, source, |r| index.job_listing(r))?;
    if skipped > 0 {
        tracing::warn!("{} row(s) of {} could not be decoded", skipped, source.display());
    }
    tracing::debug!("Loaded {} listings from {}", records.len(), source.display());

    Ok(JobTable::new(schema, records))
}

fn cell(listing: &JobListing, column: Column) -> String {
    match column {
        Column::WorkFromHome => format_flag(listing.work_from_home).to_string(),
        Column::DateTime => format_timestamp(listing.date_time),
        Column::SalaryYearly => format_number(listing.salary_yearly),
        Column::RequiredSkills => join_skills(&listing.required_skills),
        other => listing.text(other).unwrap_or_default().to_string(),
    }
}

/// Write listings in the augmented format. `schema` decides which columns are
/// written; `description` is never written and `required_skills` always is.
pub fn write_job_table<'a>(
    path: &Path,
    schema: &Schema,
    listings: impl IntoIterator<Item = &'a JobListing>,
) -> Result<(), DatasetError> {
    let file = File::create(path).map_err(|source| DatasetError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_job_table_to(file, schema, listings)
}

pub fn write_job_table_to<'a, W: Write>(
    output: W,
    schema: &Schema,
    listings: impl IntoIterator<Item = &'a JobListing>,
) -> Result<(), DatasetError> {
    let columns: Vec<Column> = schema.after_extraction().columns().collect();
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(columns.iter().map(|c| c.name()))?;
    for listing in listings {
        writer.write_record(columns.iter().map(|c| cell(listing, *c)))?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const RAW_CSV: &str = "\
title,company_name,location,via,schedule_type,work_from_home,date_time,salary_yearly,description,job_id
Data Analyst,Acme,Remote,via LinkedIn,Full-time,True,2023-01-05 10:00:00,85000.0,\"Python, SQL and Tableau\",1
BI Developer,Globex,\"Austin, TX\",via Indeed,Contractor,,not a date,,Power BI dashboards,2
";

    #[test]
    fn test_read_raw_table_parses_cells() {
        let table = read_raw_from(RAW_CSV.as_bytes(), Path::new("raw.csv")).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.skipped_rows, 0);
        assert!(table.schema.has(Column::Description));

        let first = &table.rows[0];
        assert_eq!(first.title.as_deref(), Some("Data Analyst"));
        assert!(first.work_from_home);
        assert!(first.date_time.is_some());
        assert_eq!(first.salary_yearly, Some(85000.0));

        let second = &table.rows[1];
        assert_eq!(second.location.as_deref(), Some("Austin, TX"));
        assert!(!second.work_from_home);
        assert!(second.date_time.is_none());
        assert!(second.salary_yearly.is_none());
        assert_eq!(second.description.as_deref(), Some("Power BI dashboards"));
    }

    #[test]
    fn test_undecodable_rows_are_skipped() {
        let mut csv = b"title,description\nGood,python\n".to_vec();
        csv.extend_from_slice(b"Bad\xff\xfe,sql\n");
        csv.extend_from_slice(b"Also good,sql\n");

        let table = read_raw_from(csv.as_slice(), Path::new("mixed.csv")).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.skipped_rows, 1);
        assert_eq!(table.rows_read(), 3);
        assert_eq!(table.rows[1].title.as_deref(), Some("Also good"));
    }

    #[test]
    fn test_unknown_headers_are_ignored() {
        let csv = "title,job_id, via ,salary_yearly\nAnalyst,7,via Indeed,50000\n";
        let table = read_job_table_from(csv.as_bytes(), Path::new("extra.csv")).unwrap();
        let schema = table.schema();
        assert!(schema.has(Column::Title));
        assert!(schema.has(Column::Via));
        assert!(schema.has(Column::SalaryYearly));
        assert!(!schema.has(Column::Location));
        assert_eq!(schema.columns().count(), 3);
        assert_eq!(table.records()[0].via.as_deref(), Some("via Indeed"));
    }

    #[test]
    fn test_read_raw_table_requires_description() {
        let csv = "title,via\nAnalyst,via Indeed\n";
        let err = read_raw_from(csv.as_bytes(), Path::new("nodesc.csv")).unwrap_err();
        match err {
            DatasetError::MissingColumns { columns, .. } => assert_eq!(columns, "description"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_missing_file_reports_path() {
        let err = read_raw_table(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Open { .. }));
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }

    #[test]
    fn test_short_rows_have_missing_cells() {
        let csv = "title,location,required_skills\nAnalyst\nEngineer,Berlin,\"sql, python\"\n";
        let table = read_job_table_from(csv.as_bytes(), Path::new("short.csv")).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.records()[0].location.is_none());
        assert!(table.records()[0].required_skills.is_empty());
        assert_eq!(table.records()[1].required_skills, vec!["sql", "python"]);
    }

    #[test]
    fn test_write_then_read_augmented_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lite.csv");

        let raw = read_raw_from(RAW_CSV.as_bytes(), Path::new("raw.csv")).unwrap();
        let listings: Vec<JobListing> = raw
            .rows
            .into_iter()
            .map(|r| r.into_listing(vec!["python".to_string(), "sql".to_string()]))
            .collect();

        write_job_table(&path, &raw.schema, &listings).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let header = written.lines().next().unwrap();
        assert_eq!(
            header,
            "title,company_name,location,via,schedule_type,work_from_home,date_time,salary_yearly,required_skills"
        );
        assert!(!written.contains("Tableau"), "description must not be persisted");

        let table = read_job_table(&path).unwrap();
        assert_eq!(table.records(), listings.as_slice());
        assert!(table.schema().has(Column::RequiredSkills));
        assert!(!table.schema().has(Column::Description));
    }

    #[test]
    fn test_write_only_present_columns() {
        let schema = Schema::new([Column::Title, Column::Description]);
        let listing = JobListing {
            title: Some("Analyst".to_string()),
            ..Default::default()
        };
        let mut out = Vec::new();
        write_job_table_to(&mut out, &schema, [&listing]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "title,required_skills\nAnalyst,\n");
    }
}
