use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Known dataset columns, in the canonical order used when writing files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Title,
    CompanyName,
    Location,
    Via,
    ScheduleType,
    WorkFromHome,
    DateTime,
    SalaryYearly,
    Description,
    RequiredSkills,
}

/// What kind of value a column holds; predicates are only built against the
/// kind they understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Flag,
    Timestamp,
    Number,
    Tags,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::Title,
        Column::CompanyName,
        Column::Location,
        Column::Via,
        Column::ScheduleType,
        Column::WorkFromHome,
        Column::DateTime,
        Column::SalaryYearly,
        Column::Description,
        Column::RequiredSkills,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::Title => "title",
            Column::CompanyName => "company_name",
            Column::Location => "location",
            Column::Via => "via",
            Column::ScheduleType => "schedule_type",
            Column::WorkFromHome => "work_from_home",
            Column::DateTime => "date_time",
            Column::SalaryYearly => "salary_yearly",
            Column::Description => "description",
            Column::RequiredSkills => "required_skills",
        }
    }

    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.name() == name.trim())
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Column::Title
            | Column::CompanyName
            | Column::Location
            | Column::Via
            | Column::ScheduleType
            | Column::Description => ColumnKind::Text,
            Column::WorkFromHome => ColumnKind::Flag,
            Column::DateTime => ColumnKind::Timestamp,
            Column::SalaryYearly => ColumnKind::Number,
            Column::RequiredSkills => ColumnKind::Tags,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of known columns a table was loaded with.
///
/// Builds of the dataset do not always carry the same columns, so consumers
/// ask `has` before relying on a field instead of assuming it exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    columns: BTreeSet<Column>,
}

impl Schema {
    pub fn new(columns: impl IntoIterator<Item = Column>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    pub fn has(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Present columns in canonical order.
    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.columns.iter().copied()
    }

    pub fn missing(&self, required: &[Column]) -> Vec<Column> {
        required.iter().copied().filter(|c| !self.has(*c)).collect()
    }

    /// Schema of the augmented table produced from this one by extraction.
    pub fn after_extraction(&self) -> Schema {
        let mut columns = self.columns.clone();
        columns.remove(&Column::Description);
        columns.insert(Column::RequiredSkills);
        Schema { columns }
    }
}
