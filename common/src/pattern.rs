//! 検索パターンモジュール
//!
//! 辞書セルの文字列を照合用パターンに変換する。
//!
//! ## 書式
//! - 通常のキーワード: そのまま部分一致（大文字小文字を区別しない）
//! - 近接指定: `[word1,word2];(min,max)` または `[word1,word2,word3];(min,max)`
//!   単語間に min〜max 語を挟んで出現する場合に一致する

use crate::error::{Error, Result};
use regex::{Captures, Regex, RegexBuilder};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

/// 2語用テンプレート（デフォルト）
pub const DEFAULT_TWO_WORD_TEMPLATE: &str = r"\bword1\W+(?:\w+\W+){a,b}?word2\b";
/// 3語用テンプレート（デフォルト）
pub const DEFAULT_THREE_WORD_TEMPLATE: &str =
    r"\bword1\W+(?:\w+\W+){a,b}?word2\b\W+(?:\w+\W+){a,b}?word3\b";

lazy_static::lazy_static! {
    // `[...]` の直後に `;` が続くものだけを近接指定とみなす
    static ref SHORTHAND_RE: Regex = Regex::new(r"^\[([^\[\]]*)\]\s*;(.*)$").unwrap();
    static ref GAP_RE: Regex = Regex::new(r"^\s*\(\s*(\d+)\s*,\s*(\d+)\s*\)\s*$").unwrap();
    static ref PLACEHOLDER_RE: Regex = Regex::new(r"word[123]|\{a|b\}").unwrap();
}

/// 近接パターンのテンプレート
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegexTemplates {
    pub two_word: String,
    pub three_word: String,
}

impl Default for RegexTemplates {
    fn default() -> Self {
        Self {
            two_word: DEFAULT_TWO_WORD_TEMPLATE.to_string(),
            three_word: DEFAULT_THREE_WORD_TEMPLATE.to_string(),
        }
    }
}

impl RegexTemplates {
    /// 必須プレースホルダが揃っているか検証
    pub fn validate(&self) -> Result<()> {
        check_placeholders("two_word", &self.two_word, &["word1", "word2", "{a", "b}"])?;
        check_placeholders(
            "three_word",
            &self.three_word,
            &["word1", "word2", "word3", "{a", "b}"],
        )
    }

    fn for_word_count(&self, count: usize) -> Option<&str> {
        match count {
            2 => Some(&self.two_word),
            3 => Some(&self.three_word),
            _ => None,
        }
    }
}

fn check_placeholders(name: &str, template: &str, required: &[&str]) -> Result<()> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|p| !template.contains(p))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::Template(format!(
            "{} template is missing {}",
            name,
            missing.join(", ")
        )))
    }
}

/// 照合パターン
#[derive(Debug, Clone)]
pub enum Pattern {
    /// 部分一致キーワード（小文字化済み）
    Literal { text: String },
    /// 近接指定から生成した正規表現
    Near {
        source: String,
        expression: String,
        regex: Regex,
    },
}

impl Pattern {
    /// 辞書に書かれた元の文字列
    pub fn source(&self) -> &str {
        match self {
            Pattern::Literal { text } => text,
            Pattern::Near { source, .. } => source,
        }
    }

    /// 生成した正規表現（Literalの場合はNone）
    pub fn expression(&self) -> Option<&str> {
        match self {
            Pattern::Literal { .. } => None,
            Pattern::Near { expression, .. } => Some(expression),
        }
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, Pattern::Near { .. })
    }

    /// 小文字化済みテキストに対して照合
    pub fn is_match(&self, lowered_text: &str) -> bool {
        match self {
            Pattern::Literal { text } => lowered_text.contains(text.as_str()),
            Pattern::Near { regex, .. } => regex.is_match(lowered_text),
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source() == other.source() && self.expression() == other.expression()
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Pattern", 3)?;
        state.serialize_field("kind", if self.is_regex() { "near" } else { "literal" })?;
        state.serialize_field("source", self.source())?;
        state.serialize_field("expression", &self.expression())?;
        state.end()
    }
}

/// 辞書セルの文字列をパターンに変換する
///
/// `[...]` の直後に `;` が続く場合のみ近接指定として解釈し、
/// それ以外は括弧を含んでいても通常のキーワードとして扱う。
/// 通常のキーワードは小文字化のみで、空白は削らない。
pub fn compile_pattern(raw: &str, templates: &RegexTemplates) -> Result<Pattern> {
    let trimmed = raw.trim();

    // 通常キーワードは前後の空白も含めて照合する（" r " で単語単位の一致）
    let Some(caps) = SHORTHAND_RE.captures(trimmed) else {
        return Ok(Pattern::Literal {
            text: raw.to_lowercase(),
        });
    };

    let words: Vec<&str> = caps[1].split(',').map(str::trim).collect();
    if words.iter().any(|w| w.is_empty()) {
        return Err(Error::malformed(trimmed, "empty word in bracket list"));
    }
    let template = templates.for_word_count(words.len()).ok_or_else(|| {
        Error::malformed(
            trimmed,
            format!("expected 2 or 3 words, found {}", words.len()),
        )
    })?;

    let (min, max) = parse_gap(trimmed, &caps[2])?;
    let expression = instantiate(template, &words, min, max);

    let regex = RegexBuilder::new(&expression)
        .case_insensitive(true)
        .build()
        .map_err(|source| Error::InvalidRegex {
            expression: expression.clone(),
            source,
        })?;

    Ok(Pattern::Near {
        source: trimmed.to_string(),
        expression,
        regex,
    })
}

fn parse_gap(raw: &str, gap: &str) -> Result<(u32, u32)> {
    let caps = GAP_RE
        .captures(gap)
        .ok_or_else(|| Error::malformed(raw, "gap must be written as (min,max)"))?;
    let min: u32 = caps[1]
        .parse()
        .map_err(|_| Error::malformed(raw, "gap bound out of range"))?;
    let max: u32 = caps[2]
        .parse()
        .map_err(|_| Error::malformed(raw, "gap bound out of range"))?;
    if min > max {
        return Err(Error::malformed(
            raw,
            format!("gap minimum {} exceeds maximum {}", min, max),
        ));
    }
    Ok((min, max))
}

/// プレースホルダを一度の走査で置換
///
/// 単語自体に `word2` 等が含まれていても再置換されない。
fn instantiate(template: &str, words: &[&str], min: u32, max: u32) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            let token = &caps[0];
            match token {
                "{a" => format!("{{{}", min),
                "b}" => format!("{}}}", max),
                _ => {
                    let index = token.as_bytes()[4] - b'1';
                    words
                        .get(index as usize)
                        .map(|w| regex::escape(w))
                        .unwrap_or_else(|| token.to_string())
                }
            }
        })
        .into_owned()
}
