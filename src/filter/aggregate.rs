//! Read-only summaries over a filtered `View`.
//!
//! Every aggregate returns `None` (or an empty list) rather than failing when
//! the view is empty or the column is not in the table.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use super::engine::View;
use crate::table::Column;

/// A value and how many rows carried it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Count {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<Bin>,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn peak(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// Counts of true and false values of a flag column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlagSplit {
    pub true_count: usize,
    pub false_count: usize,
}

/// Counter that remembers first-occurrence order, so a stable sort by count
/// breaks ties by whichever value showed up first.
#[derive(Default)]
struct Tally<'a> {
    slots: HashMap<&'a str, usize>,
    counts: Vec<(&'a str, usize)>,
}

impl<'a> Tally<'a> {
    fn add(&mut self, value: &'a str) {
        match self.slots.get(value) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.slots.insert(value, self.counts.len());
                self.counts.push((value, 1));
            }
        }
    }

    fn ranked(mut self, n: usize) -> Vec<Count> {
        self.counts.sort_by(|a, b| b.1.cmp(&a.1));
        self.counts
            .into_iter()
            .take(n)
            .map(|(value, count)| Count {
                value: value.to_string(),
                count,
            })
            .collect()
    }
}

fn text_values<'t>(view: &View<'t>, column: Column) -> Vec<&'t str> {
    if !view.schema().has(column) {
        return Vec::new();
    }
    view.iter().filter_map(|r| r.text(column)).collect()
}

/// The `n` most frequent non-null values of a text column.
pub fn top_n(view: &View, column: Column, n: usize) -> Vec<Count> {
    let mut tally = Tally::default();
    for value in text_values(view, column) {
        tally.add(value);
    }
    tally.ranked(n)
}

/// Every non-null value of a text column with its count, most frequent first.
pub fn value_counts(view: &View, column: Column) -> Vec<Count> {
    top_n(view, column, usize::MAX)
}

/// Most frequent value; the lexicographically smallest wins a tie.
pub fn mode(view: &View, column: Column) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in text_values(view, column) {
        *counts.entry(value).or_default() += 1;
    }

    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(value, _)| value.to_string())
}

pub fn distinct_values(view: &View, column: Column) -> BTreeSet<String> {
    text_values(view, column)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Number of distinct non-null values, `None` when the column is absent.
pub fn distinct_count(view: &View, column: Column) -> Option<usize> {
    if !view.schema().has(column) {
        return None;
    }
    let distinct: BTreeSet<&str> = text_values(view, column).into_iter().collect();
    Some(distinct.len())
}

/// The `n` skills required by the most listings. A skill counts once per
/// listing even if the tag list repeats it.
pub fn skill_frequency(view: &View, n: usize) -> Vec<Count> {
    if !view.schema().has(Column::RequiredSkills) {
        return Vec::new();
    }

    let mut tally = Tally::default();
    for listing in view.iter() {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for skill in &listing.required_skills {
            if seen.insert(skill.as_str()) {
                tally.add(skill.as_str());
            }
        }
    }
    tally.ranked(n)
}

fn numeric_values<F>(view: &View, column: Column, valid: F) -> Vec<f64>
where
    F: Fn(f64) -> bool,
{
    if !view.schema().has(column) {
        return Vec::new();
    }
    view.iter()
        .filter_map(|r| r.number(column))
        .filter(|v| v.is_finite() && valid(*v))
        .collect()
}

/// Summary of the values of a numeric column that pass `valid`.
pub fn numeric_summary<F>(view: &View, column: Column, valid: F) -> Option<NumericSummary>
where
    F: Fn(f64) -> bool,
{
    let mut values = numeric_values(view, column, valid);
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let count = values.len();
    let mid = count / 2;
    let median = if count % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    };

    Some(NumericSummary {
        count,
        mean: values.iter().sum::<f64>() / count as f64,
        median,
        min: values[0],
        max: values[count - 1],
    })
}

/// Salary summary over listings with a strictly positive salary.
pub fn salary_summary(view: &View) -> Option<NumericSummary> {
    numeric_summary(view, Column::SalaryYearly, |s| s > 0.0)
}

/// Equal-width histogram of the valid values of a numeric column.
pub fn histogram<F>(view: &View, column: Column, valid: F, bins: usize) -> Option<Histogram>
where
    F: Fn(f64) -> bool,
{
    let values = numeric_values(view, column, valid);
    let min = values.iter().copied().reduce(f64::min)?;
    let max = values.iter().copied().reduce(f64::max)?;

    let width = (max - min) / bins.max(1) as f64;
    if width <= 0.0 {
        return Some(Histogram {
            bins: vec![Bin {
                lower: min,
                upper: max,
                count: values.len(),
            }],
        });
    }

    let mut counts = vec![0usize; bins.max(1)];
    let last = counts.len() - 1;
    for value in &values {
        let slot = ((value - min) / width).floor() as usize;
        counts[slot.min(last)] += 1;
    }

    Some(Histogram {
        bins: counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| Bin {
                lower: min + width * i as f64,
                upper: if i == last { max } else { min + width * (i + 1) as f64 },
                count,
            })
            .collect(),
    })
}

pub fn salary_histogram(view: &View, bins: usize) -> Option<Histogram> {
    histogram(view, Column::SalaryYearly, |s| s > 0.0, bins)
}

/// True/false counts, `None` for an empty view or an absent column.
pub fn flag_split(view: &View, column: Column) -> Option<FlagSplit> {
    if view.is_empty() || !view.schema().has(column) {
        return None;
    }
    let true_count = view.iter().filter(|r| r.flag(column) == Some(true)).count();
    Some(FlagSplit {
        true_count,
        false_count: view.len() - true_count,
    })
}

/// Fraction of rows whose flag is true.
pub fn flag_share(view: &View, column: Column) -> Option<f64> {
    let split = flag_split(view, column)?;
    let total = split.true_count + split.false_count;
    (total > 0).then(|| split.true_count as f64 / total as f64)
}
