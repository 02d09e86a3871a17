//! クリーニング用の語リスト・文字変換表
//!
//! シートの各列が言語に対応する（列順→行順に読み込む）。

use crate::error::{Result, VacancyError};
use crate::sheet::Sheet;

/// 除去する語のリスト（ストップワード・その他）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn from_sheet(sheet: &Sheet) -> Self {
        let words = (0..sheet.columns.len())
            .flat_map(|col| sheet.non_empty_values(col))
            .map(|w| w.trim().to_string())
            .collect();
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// 前後が空白の語を空白1つに置換
    pub fn remove_from(&self, text: &str) -> String {
        let mut result = text.to_string();
        for word in &self.words {
            let needle = format!(" {} ", word);
            if result.contains(&needle) {
                result = result.replace(&needle, " ");
            }
        }
        result
    }
}

/// 特殊文字の変換表（`old, new` 形式）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharMapping {
    pairs: Vec<(String, String)>,
}

impl CharMapping {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    pub fn from_sheet(sheet: &Sheet) -> Result<Self> {
        let mut pairs = Vec::new();
        for col in 0..sheet.columns.len() {
            for entry in sheet.non_empty_values(col) {
                let (old, new) = entry.split_once(", ").ok_or_else(|| {
                    VacancyError::InvalidCleaningEntry {
                        sheet: sheet.name.clone(),
                        entry: entry.to_string(),
                    }
                })?;
                if old.is_empty() {
                    return Err(VacancyError::InvalidCleaningEntry {
                        sheet: sheet.name.clone(),
                        entry: entry.to_string(),
                    });
                }
                pairs.push((old.to_string(), new.to_string()));
            }
        }
        Ok(Self { pairs })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn apply(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (old, new) in &self.pairs {
            if result.contains(old.as_str()) {
                result = result.replace(old.as_str(), new);
            }
        }
        result
    }
}
