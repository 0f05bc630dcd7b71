use anyhow::Result;
use clap::Args;

use crate::cli::Output;
use crate::config::JobscopeConfig;
use crate::extractor::{SkillExtractor, SkillVocabulary};

#[derive(Args, Debug, Default)]
pub struct SkillsArgs {
    /// Extract skills from TEXT instead of listing the vocabulary
    #[arg(short, long, value_name = "TEXT")]
    pub text: Option<String>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: SkillsArgs, config: &JobscopeConfig, output: &Output) -> Result<()> {
    let vocabulary = SkillVocabulary::from_config(&config.extract);

    let Some(text) = &args.text else {
        if args.json {
            println!("{}", serde_json::to_string_pretty(vocabulary.keywords())?);
            return Ok(());
        }
        output.header(&format!("Skill vocabulary ({} keywords)", vocabulary.len()));
        for keyword in vocabulary.keywords() {
            output.list_item(keyword);
        }
        return Ok(());
    };

    let skills = SkillExtractor::new(vocabulary)?.extract(Some(text));
    if args.json {
        println!("{}", serde_json::to_string_pretty(&skills)?);
    } else if skills.is_empty() {
        output.warning("No known skills found in the text");
    } else {
        output.success(&format!("Found {} skill(s)", skills.len()));
        for skill in &skills {
            output.list_item(skill);
        }
    }
    Ok(())
}
