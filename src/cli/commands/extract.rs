use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use crate::cli::Output;
use crate::config::JobscopeConfig;
use crate::extractor::{SkillExtractor, SkillVocabulary, extract_table};
use crate::parallel::{ExecutionMode, ExecutionStrategy};
use crate::table::{read_raw_table, write_job_table};

#[derive(Args, Debug, Default)]
pub struct ExtractArgs {
    /// Raw CSV with a description column [default: dataset.input from config]
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Where to write the augmented CSV [default: dataset.output from config]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Keep at most N randomly sampled rows (0 keeps all)
    #[arg(long, value_name = "N")]
    pub sample_size: Option<usize>,

    /// Seed for row sampling
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Processing mode
    #[arg(long, value_enum)]
    pub mode: Option<ExecutionMode>,

    /// Print run statistics as JSON
    #[arg(long)]
    pub json: bool,
}

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

pub fn execute(args: ExtractArgs, config: &JobscopeConfig, output: &Output) -> Result<()> {
    let input = args.input.unwrap_or_else(|| config.dataset.input.clone());
    let output_path = args.output.unwrap_or_else(|| config.dataset.output.clone());
    let sample_size = args.sample_size.unwrap_or(config.dataset.sample_size);
    let seed = args.seed.unwrap_or(config.dataset.sample_seed);
    let mode = args.mode.unwrap_or(config.extract.mode);

    // Keep stdout clean for the JSON document
    let silent = Output::new(false, true);
    let output = if args.json { &silent } else { output };

    output.header("Skill extraction");
    output.info(&format!("Reading {}", input.display()));

    let raw = read_raw_table(&input)?;
    let rows_loaded = raw.rows.len();
    let raw = raw.sample(sample_size, seed);
    if raw.sampled_out > 0 {
        output.info(&format!(
            "Sampled {} of {} rows (seed {})",
            raw.rows.len(),
            rows_loaded,
            seed
        ));
    }
    if raw.skipped_rows > 0 {
        output.warning(&format!("Skipped {} undecodable row(s)", raw.skipped_rows));
    }

    let vocabulary = SkillVocabulary::from_config(&config.extract);
    output.verbose(&format!("Vocabulary: {}", vocabulary.keywords().join(", ")));
    let extractor = SkillExtractor::new(vocabulary)?;

    let strategy = ExecutionStrategy::for_mode(
        mode,
        raw.rows.len(),
        config.extract.min_rows_for_parallel,
        config.extract.max_threads,
        config.extract.thread_percentage,
    );
    output.verbose(&format!("Execution strategy: {strategy:?}"));

    let progress = output.progress_bar(raw.rows.len() as u64, "rows tagged")?;
    let reporter = {
        let progress = progress.clone();
        move |done: usize, _total: usize| progress.set_position(done as u64)
    };
    let result = extract_table(&extractor, raw, &strategy, Some(reporter))?;
    progress.finish_and_clear();

    write_job_table(&output_path, &result.schema, &result.listings)?;
    let size_mb = fs::metadata(&output_path)
        .with_context(|| format!("Failed to stat {}", output_path.display()))?
        .len() as f64
        / BYTES_PER_MB;

    let stats = &result.stats;
    if args.json {
        let report = serde_json::json!({
            "input": input,
            "output": output_path,
            "rows_loaded": rows_loaded,
            "stats": stats,
            "file_size_mb": size_mb,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output.section_header("Summary");
    output.key_value("Rows read", &stats.rows_read.to_string(), false);
    output.key_value("Rows skipped", &stats.rows_skipped.to_string(), false);
    output.key_value("Sampled out", &stats.rows_sampled_out.to_string(), false);
    output.key_value("Rows processed", &stats.rows_processed.to_string(), false);
    output.key_value(
        "Without description",
        &stats.rows_without_description.to_string(),
        false,
    );
    output.key_value("With skills", &stats.rows_with_skills.to_string(), true);
    output.key_value("Tags extracted", &stats.total_tags.to_string(), false);
    output.key_value("Duration", &format!("{}ms", stats.duration_ms), false);
    output.key_value("File size", &format!("{size_mb:.2} MB"), false);
    output.success(&format!("Wrote {}", output_path.display()));

    Ok(())
}
