//! Integration tests for the jobscope CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const RAW_CSV: &str = "\
title,company_name,location,via,schedule_type,work_from_home,date_time,salary_yearly,description,job_id
Data Analyst,Acme,Anywhere,via LinkedIn,Full-time,True,2023-01-05 10:00:00,85000.0,\"Your SQL and Python skills are required\",1
BI Developer,Globex,\"Austin, TX\",via Indeed,Contractor,False,2023-01-06 09:30:00,,\"Build Power BI dashboards, Excel\",2
Data Engineer,Initech,\"Austin, TX\",via LinkedIn,Full-time,,not a date,120000,Spark and Scala on Databricks,3
Office Manager,Acme,Anywhere,via Indeed,Part-time,False,,0,,4
";

const LITE_CSV: &str = "\
title,company_name,location,via,schedule_type,work_from_home,salary_yearly,required_skills
Data Analyst,Acme,Anywhere,via LinkedIn,Full-time,true,85000,\"python, sql\"
Senior Data Analyst,Globex,\"Austin, TX\",via Indeed,Full-time,false,95000,\"sql, excel, tableau\"
BI Developer,Globex,\"Austin, TX\",via Indeed,Contractor,false,,power bi
Analyst Intern,Initech,Anywhere,via LinkedIn,,true,0,
";

fn jobscope(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("jobscope").unwrap();
    cmd.current_dir(dir).env("NO_COLOR", "1");
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout should be a JSON document")
}

#[test]
fn test_cli_help() {
    let temp_dir = TempDir::new().unwrap();
    jobscope(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Skill tag extraction"))
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("explore"));
}

#[test]
fn test_cli_version() {
    let temp_dir = TempDir::new().unwrap();
    jobscope(temp_dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("jobscope"));
}

#[test]
fn test_invalid_subcommand() {
    let temp_dir = TempDir::new().unwrap();
    jobscope(temp_dir.path())
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_extract_writes_augmented_dataset() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("gsearch_jobs.csv"), RAW_CSV).unwrap();

    jobscope(temp_dir.path())
        .arg("extract")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote gsearch_jobs_lite.csv"));

    let written = fs::read_to_string(temp_dir.path().join("gsearch_jobs_lite.csv")).unwrap();
    let mut lines = written.lines();
    assert_eq!(
        lines.next(),
        Some("title,company_name,location,via,schedule_type,work_from_home,date_time,salary_yearly,required_skills")
    );
    assert_eq!(
        lines.next(),
        Some("Data Analyst,Acme,Anywhere,via LinkedIn,Full-time,true,2023-01-05 10:00:00,85000,\"python, sql\"")
    );
    assert!(written.contains("\"excel, power bi\""));
    assert!(written.contains("\"spark, scala, databricks\""));
    assert!(written.contains("Office Manager,Acme,Anywhere,via Indeed,Part-time,false,,0,\n"));
    assert!(!written.contains("dashboards"), "descriptions must not be persisted");
}

#[test]
fn test_extract_json_stats_and_sampling() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("raw.csv"), RAW_CSV).unwrap();

    let report = json_stdout(jobscope(temp_dir.path()).args([
        "extract",
        "--input",
        "raw.csv",
        "--output",
        "out.csv",
        "--sample-size",
        "2",
        "--json",
    ]));

    assert_eq!(report["rows_loaded"], 4);
    assert_eq!(report["stats"]["rows_read"], 4);
    assert_eq!(report["stats"]["rows_sampled_out"], 2);
    assert_eq!(report["stats"]["rows_processed"], 2);
    assert!(report["file_size_mb"].as_f64().unwrap() > 0.0);

    let written = fs::read_to_string(temp_dir.path().join("out.csv")).unwrap();
    assert_eq!(written.lines().count(), 3);
}

#[test]
fn test_extract_skips_undecodable_rows() {
    let temp_dir = TempDir::new().unwrap();
    let mut raw = b"title,description\nGood,python\n".to_vec();
    raw.extend_from_slice(b"Bad\xff\xfe,sql\n");
    raw.extend_from_slice(b"Also good,sql\n");
    fs::write(temp_dir.path().join("mixed.csv"), raw).unwrap();

    let report = json_stdout(jobscope(temp_dir.path()).args([
        "extract", "--input", "mixed.csv", "--output", "out.csv", "--json",
    ]));

    assert_eq!(report["stats"]["rows_read"], 3);
    assert_eq!(report["stats"]["rows_skipped"], 1);
    assert_eq!(report["stats"]["rows_processed"], 2);

    let written = fs::read_to_string(temp_dir.path().join("out.csv")).unwrap();
    assert_eq!(written, "title,required_skills\nGood,python\nAlso good,sql\n");
}

#[test]
fn test_extract_requires_description_column() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("raw.csv"), "title,via\nAnalyst,via Indeed\n").unwrap();

    jobscope(temp_dir.path())
        .args(["extract", "--input", "raw.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("description"));

    assert!(!temp_dir.path().join("gsearch_jobs_lite.csv").exists());
}

#[test]
fn test_extract_missing_input_fails() {
    let temp_dir = TempDir::new().unwrap();
    jobscope(temp_dir.path())
        .args(["extract", "--input", "nope.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.csv"));
}

#[test]
fn test_query_json_report() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("lite.csv"), LITE_CSV).unwrap();

    let report = json_stdout(jobscope(temp_dir.path()).args([
        "query", "--data", "lite.csv", "--search", "analyst", "--format", "json",
    ]));

    // The intern listing has no schedule type, so the default selection drops it
    assert_eq!(report["overview"]["total_listings"], 2);
    assert_eq!(report["overview"]["average_salary"], 90000.0);
    assert_eq!(report["overview"]["distinct_companies"], 2);
    assert_eq!(report["top_skills"][0]["value"], "sql");
    assert_eq!(report["top_skills"][0]["count"], 2);
    assert_eq!(report["filters"]["title_query"], "analyst");
}

#[test]
fn test_query_empty_result_has_null_sections() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("lite.csv"), LITE_CSV).unwrap();

    let report = json_stdout(jobscope(temp_dir.path()).args([
        "query",
        "--data",
        "lite.csv",
        "--schedule",
        "Seasonal",
        "--format",
        "json",
    ]));

    assert_eq!(report["overview"]["total_listings"], 0);
    assert!(report["overview"]["top_platform"].is_null());
    assert!(report["salary"].is_null());
    assert!(report["salary_histogram"].is_null());
}

#[test]
fn test_query_text_report_and_export() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("lite.csv"), LITE_CSV).unwrap();

    jobscope(temp_dir.path())
        .args([
            "query", "--data", "lite.csv", "--via", "via Indeed", "--remote", "onsite", "--export",
            "indeed.csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Job Market Dashboard"))
        .stdout(predicate::str::contains("Top skills"))
        .stderr(predicate::str::contains("Exported 2 listings"));

    let exported = fs::read_to_string(temp_dir.path().join("indeed.csv")).unwrap();
    assert_eq!(exported.lines().count(), 3);
    assert!(exported.contains("Senior Data Analyst"));
    assert!(!exported.contains("Analyst Intern"));
}

#[test]
fn test_quiet_query_export_prints_no_status() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("lite.csv"), LITE_CSV).unwrap();

    jobscope(temp_dir.path())
        .args(["-q", "query", "--data", "lite.csv", "--export", "all.csv"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Exported").not());

    assert!(temp_dir.path().join("all.csv").exists());
}

#[test]
fn test_query_missing_dataset_fails() {
    let temp_dir = TempDir::new().unwrap();
    jobscope(temp_dir.path())
        .arg("query")
        .assert()
        .failure()
        .stderr(predicate::str::contains("gsearch_jobs_lite.csv"));
}

#[test]
fn test_explore_session_survives_bad_commands() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("lite.csv"), LITE_CSV).unwrap();

    jobscope(temp_dir.path())
        .args(["explore", "--data", "lite.csv"])
        .write_stdin("search analyst\nfrobnicate\nmin-salary lots\nremote remote\nshow\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 of 4 listings match"))
        .stdout(predicate::str::contains("2 of 4 listings match"))
        .stdout(predicate::str::contains("1 of 4 listings match"))
        .stderr(predicate::str::contains("Unknown command 'frobnicate'"))
        .stderr(predicate::str::contains("Not a salary amount"));
}

#[test]
fn test_skills_extracts_from_text() {
    let temp_dir = TempDir::new().unwrap();
    let skills = json_stdout(jobscope(temp_dir.path()).args([
        "skills",
        "--text",
        "Your SQL and Python skills are required",
        "--json",
    ]));
    assert_eq!(skills, serde_json::json!(["python", "sql"]));
}

#[test]
fn test_config_file_extends_vocabulary() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("custom.toml"),
        "[extract]\nextra_keywords = [\"Rust\"]\n",
    )
    .unwrap();

    let skills = json_stdout(jobscope(temp_dir.path()).args([
        "--config",
        "custom.toml",
        "skills",
        "--text",
        "Rust and SQL",
        "--json",
    ]));
    assert_eq!(skills, serde_json::json!(["sql", "rust"]));
}

#[test]
fn test_config_show_json() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("jobscope.toml"), "[report]\ntop_n = 4\n").unwrap();

    let config = json_stdout(jobscope(temp_dir.path()).args(["config", "show", "--format", "json"]));
    assert_eq!(config["report"]["top_n"], 4);
    assert_eq!(config["dataset"]["sample_size"], 50000);
    assert_eq!(config["extract"]["mode"], "auto");
}
