//! Text and JSON rendering of dashboard reports

use anyhow::Result;
use console::style;

use super::args::ReportFormat;
use super::output::{Output, truncate};
use crate::filter::aggregate::{Count, Histogram};
use crate::filter::{FilterSpec, FlagMode};
use crate::report::DashboardReport;
use crate::table::JobListing;

const NO_DATA: &str = "No data for the current filters";
const BAR_WIDTH: usize = 40;

pub fn render(report: &DashboardReport, format: ReportFormat, output: &Output) -> Result<()> {
    match format {
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        ReportFormat::Text => render_text(report, output),
    }
    Ok(())
}

/// `85000` -> `$85,000`
pub fn format_money(amount: f64) -> String {
    let whole = amount.round().abs() as u64;
    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}")
}

fn or_na<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

pub fn describe_filters(filters: &FilterSpec) -> Vec<(String, String)> {
    let set = |values: &Option<std::collections::BTreeSet<String>>| match values {
        None => "off".to_string(),
        Some(v) if v.is_empty() => "(none selected)".to_string(),
        Some(v) => v.iter().cloned().collect::<Vec<_>>().join(", "),
    };
    let text = |query: &str| {
        if query.is_empty() {
            "off".to_string()
        } else {
            format!("\"{query}\"")
        }
    };

    vec![
        ("Title search".to_string(), text(&filters.title_query)),
        ("Company search".to_string(), text(&filters.company_query)),
        ("Schedule types".to_string(), set(&filters.schedule_types)),
        ("Platforms".to_string(), set(&filters.platforms)),
        ("Locations".to_string(), set(&filters.locations)),
        (
            "Minimum salary".to_string(),
            if filters.min_salary > 0.0 {
                format_money(filters.min_salary)
            } else {
                "off".to_string()
            },
        ),
        (
            "Work mode".to_string(),
            match filters.work_mode {
                FlagMode::Any => "any",
                FlagMode::TrueOnly => "remote",
                FlagMode::FalseOnly => "on-site",
            }
            .to_string(),
        ),
    ]
}

fn ranked(output: &Output, title: &str, counts: &[Count]) {
    output.section_header(title);
    let Some(max) = counts.first().map(|c| c.count) else {
        output.placeholder(NO_DATA);
        return;
    };
    for entry in counts {
        output.bar_row(&entry.value, entry.count, max, BAR_WIDTH);
    }
}

fn histogram(output: &Output, histogram: Option<&Histogram>) {
    let Some(histogram) = histogram else {
        output.section_header("Salary distribution");
        output.placeholder("No salary data for the current filters");
        return;
    };
    output.section_header(&format!("Salary distribution ({} listings)", histogram.total()));
    let peak = histogram.peak();
    for bin in &histogram.bins {
        let label = format!("{} - {}", format_money(bin.lower), format_money(bin.upper));
        output.bar_row(&label, bin.count, peak, BAR_WIDTH);
    }
}

fn preview_row(listing: &JobListing) -> String {
    let cell = |value: &Option<String>, width: usize| {
        format!("{:<width$}", truncate(value.as_deref().unwrap_or("-"), width))
    };
    format!(
        "{} {} {} {} {:>10} {}",
        cell(&listing.title, 30),
        cell(&listing.company_name, 20),
        cell(&listing.location, 20),
        cell(&listing.via, 16),
        listing.salary().map_or_else(|| "-".to_string(), format_money),
        listing.required_skills.join(", ")
    )
}

fn render_text(report: &DashboardReport, output: &Output) {
    output.header("Job Market Dashboard");

    output.section_header("Filters");
    for (name, value) in describe_filters(&report.filters) {
        output.key_value(&name, &value, value != "off");
    }

    let overview = &report.overview;
    output.section_header("Overview");
    output.key_value("Listings", &overview.total_listings.to_string(), true);
    output.key_value(
        "Remote share",
        &or_na(overview.remote_share_pct.map(|p| format!("{p:.1}%"))),
        false,
    );
    output.key_value("Top platform", &or_na(overview.top_platform.as_deref()), false);
    output.key_value("Companies", &or_na(overview.distinct_companies), false);
    output.key_value(
        "Average salary",
        &or_na(overview.average_salary.map(format_money)),
        false,
    );

    ranked(output, "Top locations", &report.top_locations);
    ranked(output, "Top companies", &report.top_companies);
    ranked(output, "Platforms", &report.platforms);

    output.section_header("Remote vs on-site");
    match report.work_mode {
        Some(split) => {
            let max = split.true_count.max(split.false_count);
            output.bar_row("Remote", split.true_count, max, BAR_WIDTH);
            output.bar_row("On-site", split.false_count, max, BAR_WIDTH);
        }
        None => output.placeholder(NO_DATA),
    }

    ranked(output, "Schedule types", &report.schedule_types);
    ranked(output, "Top skills", &report.top_skills);

    output.section_header("Salary summary");
    match &report.salary {
        Some(summary) => {
            output.key_value("Listings with salary", &summary.count.to_string(), false);
            output.key_value("Mean", &format_money(summary.mean), true);
            output.key_value("Median", &format_money(summary.median), false);
            output.key_value("Min", &format_money(summary.min), false);
            output.key_value("Max", &format_money(summary.max), false);
        }
        None => output.placeholder("No salary data for the current filters"),
    }
    histogram(output, report.salary_histogram.as_ref());

    output.section_header(&format!("Preview (first {} rows)", report.preview.len()));
    if report.preview.is_empty() {
        output.placeholder(NO_DATA);
    } else if !output.is_quiet() {
        println!(
            "{}",
            style(format!(
                "{:<30} {:<20} {:<20} {:<16} {:>10} {}",
                "Title", "Company", "Location", "Platform", "Salary", "Skills"
            ))
            .bold()
        );
        for listing in &report.preview {
            println!("{}", preview_row(listing));
        }
    }
}
