use chrono::NaiveDateTime;
use serde::Serialize;

use super::schema::Column;

/// A listing as read from the raw dataset, before skill extraction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawListing {
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub location: Option<String>,
    pub via: Option<String>,
    pub schedule_type: Option<String>,
    pub work_from_home: bool,
    pub date_time: Option<NaiveDateTime>,
    pub salary_yearly: Option<f64>,
    pub description: Option<String>,
}

impl RawListing {
    /// Finish extraction for this row: attach the tags and drop the free text.
    pub fn into_listing(self, required_skills: Vec<String>) -> JobListing {
        JobListing {
            title: self.title,
            company_name: self.company_name,
            location: self.location,
            via: self.via,
            schedule_type: self.schedule_type,
            work_from_home: self.work_from_home,
            date_time: self.date_time,
            salary_yearly: self.salary_yearly,
            required_skills,
        }
    }
}

/// A listing in the augmented dataset. Never mutated once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobListing {
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub location: Option<String>,
    pub via: Option<String>,
    pub schedule_type: Option<String>,
    pub work_from_home: bool,
    pub date_time: Option<NaiveDateTime>,
    pub salary_yearly: Option<f64>,
    pub required_skills: Vec<String>,
}

impl JobListing {
    /// Value of a text column, `None` when missing or when `column` is not text.
    pub fn text(&self, column: Column) -> Option<&str> {
        match column {
            Column::Title => self.title.as_deref(),
            Column::CompanyName => self.company_name.as_deref(),
            Column::Location => self.location.as_deref(),
            Column::Via => self.via.as_deref(),
            Column::ScheduleType => self.schedule_type.as_deref(),
            _ => None,
        }
    }

    pub fn number(&self, column: Column) -> Option<f64> {
        match column {
            Column::SalaryYearly => self.salary_yearly,
            _ => None,
        }
    }

    pub fn flag(&self, column: Column) -> Option<bool> {
        match column {
            Column::WorkFromHome => Some(self.work_from_home),
            _ => None,
        }
    }

    /// Yearly salary when it carries information (strictly positive).
    pub fn salary(&self) -> Option<f64> {
        self.salary_yearly.filter(|s| *s > 0.0)
    }
}
