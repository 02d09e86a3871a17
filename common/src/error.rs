//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed pattern `{raw}`: {reason}")]
    MalformedPattern { raw: String, reason: String },

    #[error("Invalid regex `{expression}`: {source}")]
    InvalidRegex {
        expression: String,
        #[source]
        source: regex::Error,
    },

    #[error("Skill `{skill}` has no `requirement` column")]
    MissingRequirementColumn { skill: String },

    #[error("Template error: {0}")]
    Template(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn malformed(raw: &str, reason: impl Into<String>) -> Self {
        Error::MalformedPattern {
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_malformed() {
        let error = Error::malformed("[a,b,c,d];(1,3)", "expected 2 or 3 words, found 4");
        let display = format!("{}", error);
        assert!(display.contains("[a,b,c,d];(1,3)"));
        assert!(display.contains("found 4"));
    }

    #[test]
    fn test_error_display_invalid_regex() {
        let regex_error = regex::Regex::new("(unclosed").unwrap_err();
        let error = Error::InvalidRegex {
            expression: "(unclosed".to_string(),
            source: regex_error,
        };
        let display = format!("{}", error);
        assert!(display.starts_with("Invalid regex `(unclosed`"));
    }

    #[test]
    fn test_error_display_missing_requirement() {
        let error = Error::MissingRequirementColumn { skill: "technical".to_string() };
        assert_eq!(format!("{}", error), "Skill `technical` has no `requirement` column");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Template("word1がありません".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Template"));
        assert!(debug.contains("word1"));
    }
}
