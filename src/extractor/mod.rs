//! Skill extraction: free-text descriptions in, ordered skill tags out.

pub mod batch;
pub mod core;
pub mod types;
pub mod vocabulary;

pub use batch::extract_table;
pub use self::core::SkillExtractor;
pub use types::{ExtractionResult, ExtractionStats};
pub use vocabulary::{DEFAULT_SKILL_KEYWORDS, SkillVocabulary};
