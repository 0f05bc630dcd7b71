use anyhow::{Context, Result};
use regex::RegexSet;

use super::vocabulary::SkillVocabulary;

/// Whole-word keyword matcher over free-text job descriptions.
///
/// Every keyword compiles to one pattern that requires a non-word character
/// (or the start/end of the text) on both sides, so `r` matches in "R and
/// SQL" but not in "your", and `power bi` only matches the contiguous phrase.
/// All patterns run as a single `RegexSet` pass over the lower-cased text.
#[derive(Debug, Clone)]
pub struct SkillExtractor {
    vocabulary: SkillVocabulary,
    matchers: RegexSet,
}

impl SkillExtractor {
    pub fn new(vocabulary: SkillVocabulary) -> Result<Self> {
        let patterns = vocabulary.keywords().iter().map(|k| keyword_pattern(k));
        let matchers = RegexSet::new(patterns).context("Failed to compile skill vocabulary")?;

        tracing::debug!("Compiled {} skill keywords", vocabulary.len());
        Ok(Self {
            vocabulary,
            matchers,
        })
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    /// Skills mentioned in `description`, in vocabulary order, each at most once.
    pub fn extract(&self, description: Option<&str>) -> Vec<String> {
        let Some(text) = description else {
            return Vec::new();
        };
        if text.trim().is_empty() {
            return Vec::new();
        }

        let text = text.to_lowercase();
        self.matchers
            .matches(&text)
            .into_iter()
            .map(|index| self.vocabulary.keywords()[index].clone())
            .collect()
    }
}

fn keyword_pattern(keyword: &str) -> String {
    format!(r"(?:^|\W){}(?:\W|$)", regex::escape(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor(keywords: &[&str]) -> SkillExtractor {
        SkillExtractor::new(SkillVocabulary::new(keywords)).unwrap()
    }

    #[test]
    fn test_single_letter_keyword_needs_word_boundary() {
        let ex = extractor(&["python", "sql", "r"]);
        assert_eq!(
            ex.extract(Some("Your SQL and Python skills are required")),
            vec!["python", "sql"]
        );
        assert_eq!(ex.extract(Some("Experience with R, SQL")), vec!["sql", "r"]);
    }

    #[test]
    fn test_vocabulary_order_wins_over_text_order() {
        let ex = extractor(&["sql", "python"]);
        assert_eq!(ex.extract(Some("need python and sql")), vec!["sql", "python"]);
    }

    #[test]
    fn test_absent_and_blank_descriptions() {
        let ex = extractor(&["sql"]);
        assert!(ex.extract(None).is_empty());
        assert!(ex.extract(Some("")).is_empty());
        assert!(ex.extract(Some("   \n")).is_empty());
    }

    #[test]
    fn test_keyword_reported_once_regardless_of_case_and_punctuation() {
        let ex = extractor(&["sql", "excel"]);
        let skills = ex.extract(Some("SQL! sql, (Sql) and sql.\nEXCEL/excel"));
        assert_eq!(skills, vec!["sql", "excel"]);
    }

    #[test]
    fn test_substring_of_longer_word_does_not_match() {
        let ex = extractor(&["java", "spark", "r"]);
        assert!(ex.extract(Some("JavaScript developer, sparkling water, ruby")).is_empty());
    }

    #[test]
    fn test_multi_word_keyword_is_an_exact_phrase() {
        let ex = extractor(&["power bi", "machine learning"]);
        assert_eq!(
            ex.extract(Some("Dashboards in Power BI; applied Machine Learning.")),
            vec!["power bi", "machine learning"]
        );
        assert!(ex.extract(Some("power-hungry bi-weekly learning machine")).is_empty());
        assert!(ex.extract(Some("powerbi")).is_empty());
    }

    #[test]
    fn test_overlapping_keywords_match_independently() {
        let ex = extractor(&["google cloud", "cloud"]);
        assert_eq!(
            ex.extract(Some("Deploy on Google Cloud")),
            vec!["google cloud", "cloud"]
        );
    }

    #[test]
    fn test_keywords_with_regex_metacharacters() {
        let ex = extractor(&["c++", "c#", ".net"]);
        assert_eq!(
            ex.extract(Some("C++ and C# on .NET core")),
            vec!["c++", "c#", ".net"]
        );
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let ex = SkillExtractor::new(SkillVocabulary::default()).unwrap();
        let text = Some("Python, SQL, Tableau and AWS; some Databricks");
        assert_eq!(ex.extract(text), ex.extract(text));
        assert_eq!(
            ex.extract(text),
            vec!["python", "sql", "tableau", "aws", "databricks"]
        );
    }

    #[test]
    fn test_empty_vocabulary_matches_nothing() {
        let ex = SkillExtractor::new(SkillVocabulary::new(Vec::<String>::new())).unwrap();
        assert!(ex.extract(Some("python sql")).is_empty());
    }
}
