use crate::config::ExtractConfig;

/// Keywords detected when no vocabulary is configured.
pub const DEFAULT_SKILL_KEYWORDS: &[&str] = &[
    "python",
    "sql",
    "excel",
    "tableau",
    "power bi",
    "aws",
    "azure",
    "google cloud",
    "machine learning",
    "spark",
    "hadoop",
    "java",
    "scala",
    "r",
    "sas",
    "looker",
    "snowflake",
    "databricks",
];

/// Ordered list of canonical skill keywords.
///
/// Keywords are trimmed and lower-cased; empty entries and repeats are
/// dropped, with the first occurrence keeping its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillVocabulary {
    keywords: Vec<String>,
}

impl SkillVocabulary {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if keyword.is_empty() || normalized.contains(&keyword) {
                continue;
            }
            normalized.push(keyword);
        }
        Self {
            keywords: normalized,
        }
    }

    /// Vocabulary described by the `extract` config section: the configured
    /// list (or the built-in one) followed by any extra keywords.
    pub fn from_config(config: &ExtractConfig) -> Self {
        let base: Vec<&str> = match &config.vocabulary {
            Some(list) => list.iter().map(String::as_str).collect(),
            None => DEFAULT_SKILL_KEYWORDS.to_vec(),
        };
        Self::new(
            base.into_iter()
                .chain(config.extra_keywords.iter().map(String::as_str)),
        )
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_SKILL_KEYWORDS)
    }
}
