//! Vacancy Search Common Library
//!
//! 辞書コンパイルと照合エンジン（ファイルI/Oなし）

pub mod types;
pub mod error;
pub mod pattern;
pub mod dictionary;
pub mod matcher;

pub use types::{Requirement, SkillDictionary, SkillMatch, SkillTable, UniqueList};
pub use error::{Error, Result};
pub use pattern::{compile_pattern, Pattern, RegexTemplates};
pub use dictionary::{compile_dictionaries, dictionaries_to_json, IdentityCleaner, TextCleaner};
pub use matcher::{annotate, annotate_with_progress, Annotation, SkillColumns, SkillSummary};
