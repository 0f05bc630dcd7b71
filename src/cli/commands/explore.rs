//! Line-oriented exploration session over a loaded dataset.
//!
//! Each command adjusts one dashboard filter and reports how many listings
//! still match. Bad input prints a message and the session carries on.

use anyhow::Result;
use clap::{Args, ValueEnum};
use console::style;
use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};

use crate::cli::Output;
use crate::cli::args::{DatasetArgs, ReportFormat, WorkMode};
use crate::cli::render;
use crate::config::JobscopeConfig;
use crate::filter::aggregate::{distinct_values, value_counts};
use crate::filter::{FilterEngine, FilterSpec, View};
use crate::report::DashboardReport;
use crate::table::{Column, JobTable, SharedTable};

#[derive(Args, Debug, Default)]
pub struct ExploreArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,
}

const HELP: &[(&str, &str)] = &[
    ("search <text>", "title contains text (no text clears)"),
    ("company <text>", "company name contains text (no text clears)"),
    ("schedule <a,b|all|none|off>", "schedule types to keep"),
    ("via <a,b|all|none|off>", "source platforms to keep"),
    ("location <a,b|all|none|off>", "locations to keep"),
    ("min-salary <amount>", "minimum yearly salary (0 clears)"),
    ("remote <any|remote|onsite>", "remote-work filter"),
    ("reset", "restore the initial filters"),
    ("show", "current filters and match count"),
    ("report", "full dashboard for the current filters"),
    ("options <column>", "values of schedule, via, location or company"),
    ("help", "this list"),
    ("quit", "leave the session"),
];

#[derive(Debug, Clone, PartialEq)]
enum Selection {
    Values(BTreeSet<String>),
    All,
    Nothing,
    Off,
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Search(String),
    Company(String),
    Select(Column, Selection),
    MinSalary(f64),
    Remote(WorkMode),
    Reset,
    Show,
    Report,
    Options(Column),
    Help,
    Quit,
}

fn categorical_column(name: &str) -> Option<Column> {
    match name {
        "schedule" | "schedule_type" => Some(Column::ScheduleType),
        "via" | "platform" => Some(Column::Via),
        "location" => Some(Column::Location),
        "company" | "company_name" => Some(Column::CompanyName),
        _ => None,
    }
}

fn parse_selection(arg: &str) -> Result<Selection, String> {
    match arg.to_lowercase().as_str() {
        "" => Err("Expected a comma-separated list, 'all', 'none' or 'off'".to_string()),
        "all" => Ok(Selection::All),
        "none" => Ok(Selection::Nothing),
        "off" => Ok(Selection::Off),
        _ => Ok(Selection::Values(
            arg.split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect(),
        )),
    }
}

impl Command {
    /// `Ok(None)` for a blank line.
    fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, arg) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "search" => Command::Search(arg.to_string()),
            "company" => Command::Company(arg.to_string()),
            "schedule" => Command::Select(Column::ScheduleType, parse_selection(arg)?),
            "via" => Command::Select(Column::Via, parse_selection(arg)?),
            "location" => Command::Select(Column::Location, parse_selection(arg)?),
            "min-salary" => {
                let amount = arg
                    .replace(['$', ','], "")
                    .parse::<f64>()
                    .ok()
                    .filter(|a| a.is_finite())
                    .ok_or_else(|| format!("Not a salary amount: '{arg}'"))?;
                Command::MinSalary(amount)
            }
            "remote" => Command::Remote(WorkMode::from_str(arg, true)?),
            "reset" => Command::Reset,
            "show" => Command::Show,
            "report" => Command::Report,
            "options" => Command::Options(
                categorical_column(&arg.to_lowercase())
                    .ok_or_else(|| format!("No options for '{arg}'; try schedule, via, location or company"))?,
            ),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(format!("Unknown command '{other}'; type 'help' for a list")),
        };
        Ok(Some(command))
    }
}

/// Filter state of one exploration session
struct Session<'t> {
    engine: FilterEngine<'t>,
    spec: FilterSpec,
}

impl<'t> Session<'t> {
    fn new(table: &'t JobTable) -> Self {
        Self {
            engine: FilterEngine::new(table),
            spec: FilterSpec::dashboard_defaults(table),
        }
    }

    fn view(&self) -> View<'t> {
        self.engine.filter(&self.spec)
    }

    fn known_values(&self, column: Column) -> BTreeSet<String> {
        distinct_values(&self.engine.all(), column)
    }

    /// Apply a filter command. Returns values that do not occur in the data.
    fn update(&mut self, command: Command) -> Vec<String> {
        match command {
            Command::Search(text) => self.spec.title_query = text,
            Command::Company(text) => self.spec.company_query = text,
            Command::MinSalary(amount) => self.spec.min_salary = amount,
            Command::Remote(mode) => self.spec.work_mode = mode.into(),
            Command::Reset => self.spec = FilterSpec::dashboard_defaults(self.engine.table()),
            Command::Select(column, selection) => {
                let known = self.known_values(column);
                let (resolved, unknown) = match selection {
                    Selection::All => (Some(known), Vec::new()),
                    Selection::Nothing => (Some(BTreeSet::new()), Vec::new()),
                    Selection::Off => (None, Vec::new()),
                    Selection::Values(values) => {
                        let unknown = values.difference(&known).cloned().collect();
                        (Some(values), unknown)
                    }
                };
                match column {
                    Column::ScheduleType => self.spec.schedule_types = resolved,
                    Column::Via => self.spec.platforms = resolved,
                    Column::Location => self.spec.locations = resolved,
                    _ => {}
                }
                return unknown;
            }
            Command::Show | Command::Report | Command::Options(_) | Command::Help | Command::Quit => {}
        }
        Vec::new()
    }
}

fn print_help(output: &Output) {
    output.section_header("Commands");
    for (usage, description) in HELP {
        output.key_value(usage, description, false);
    }
}

fn print_match_count(session: &Session, output: &Output) {
    let matched = session.view().len();
    let total = session.engine.table().len();
    output.info(&format!("{matched} of {total} listings match"));
}

fn run_command(
    session: &mut Session,
    command: Command,
    config: &JobscopeConfig,
    output: &Output,
) -> Result<()> {
    match command {
        Command::Help => print_help(output),
        Command::Show => {
            output.section_header("Filters");
            for (name, value) in render::describe_filters(&session.spec) {
                output.key_value(&name, &value, value != "off");
            }
            print_match_count(session, output);
        }
        Command::Report => {
            let view = session.view();
            let report = DashboardReport::build(&view, &session.spec, &config.report);
            render::render(&report, ReportFormat::Text, output)?;
        }
        Command::Options(column) => {
            output.section_header(&format!("{column} values"));
            let counts = value_counts(&session.engine.all(), column);
            if counts.is_empty() {
                output.placeholder("No values in this dataset");
            }
            let max = counts.first().map_or(0, |c| c.count);
            for entry in &counts {
                output.bar_row(&entry.value, entry.count, max, 30);
            }
        }
        filter => {
            let unknown = session.update(filter);
            if !unknown.is_empty() {
                output.warning(&format!("Not found in the data: {}", unknown.join(", ")));
            }
            print_match_count(session, output);
        }
    }
    Ok(())
}

pub fn execute(args: ExploreArgs, config: &JobscopeConfig, output: &Output) -> Result<()> {
    let shared = SharedTable::new(args.dataset.path(config));
    let table = shared.get()?;
    let mut session = Session::new(&table);

    output.header(&format!("jobscope {} explore", crate::VERSION));
    output.info(&format!(
        "Loaded {} listings from {}. Type 'help' for commands.",
        table.len(),
        shared.path().display()
    ));
    print_match_count(&session, output);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{} ", style("jobscope>").cyan().bold());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        match Command::parse(&line?) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => run_command(&mut session, command, config, output)?,
            Err(message) => output.error(&message),
        }
    }

    Ok(())
}
