//! テキスト正規化モジュール
//!
//! 求人テキストを辞書と照合できる形にそろえる。
//!
//! ## 処理フロー
//! 1. 小文字化
//! 2. ストップワード除去
//! 3. 記号・数字の置換
//! 4. 特殊文字の変換
//! 5. その他の語の除去

pub mod punctuation;
pub mod word_list;

use crate::config::Config;
use crate::error::Result;
use crate::sheet;
use std::path::Path;
use vacancy_search_common::TextCleaner;
use word_list::{CharMapping, WordList};

/// 正規化ルール一式
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    pub stop_words: WordList,
    pub special_characters: CharMapping,
    pub others: WordList,
    pub replacement: String,
}

/// 読み込んだルールの件数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizerStats {
    pub stop_words: usize,
    pub special_characters: usize,
    pub others: usize,
}

impl Normalizer {
    /// ルールなし（小文字化と記号置換のみ）
    pub fn basic(replacement: &str) -> Self {
        Self {
            replacement: replacement.to_string(),
            ..Default::default()
        }
    }

    /// クリーニング用ブックから読み込む
    ///
    /// シートが無い場合はそのルールを空として扱う。
    pub fn from_workbook(path: &Path, config: &Config) -> Result<Self> {
        let stop_words = match sheet::read_optional_sheet(path, &config.stop_words_sheet)? {
            Some(s) => WordList::from_sheet(&s),
            None => {
                eprintln!("⚠ シート「{}」がありません", config.stop_words_sheet);
                WordList::default()
            }
        };
        let special_characters =
            match sheet::read_optional_sheet(path, &config.special_characters_sheet)? {
                Some(s) => CharMapping::from_sheet(&s)?,
                None => {
                    eprintln!("⚠ シート「{}」がありません", config.special_characters_sheet);
                    CharMapping::default()
                }
            };
        let others = match sheet::read_optional_sheet(path, &config.others_sheet)? {
            Some(s) => WordList::from_sheet(&s),
            None => {
                eprintln!("⚠ シート「{}」がありません", config.others_sheet);
                WordList::default()
            }
        };

        Ok(Self {
            stop_words,
            special_characters,
            others,
            replacement: config.replacement.clone(),
        })
    }

    pub fn stats(&self) -> NormalizerStats {
        NormalizerStats {
            stop_words: self.stop_words.len(),
            special_characters: self.special_characters.len(),
            others: self.others.len(),
        }
    }

    /// 求人テキスト1件を正規化
    pub fn normalize(&self, text: &str) -> String {
        let text = text.to_lowercase();
        let text = self.stop_words.remove_from(&text);
        let text = punctuation::replace_punctuation(&text, &self.replacement);
        let text = self.special_characters.apply(&text);
        self.others.remove_from(&text)
    }

    /// 列全体を正規化
    pub fn normalize_all(&self, texts: &[String]) -> Vec<String> {
        texts.iter().map(|t| self.normalize(t)).collect()
    }
}

/// 辞書セルには特殊文字変換のみ適用する（小文字化は辞書側で行う）
impl TextCleaner for Normalizer {
    fn clean(&self, text: &str) -> String {
        self.special_characters.apply(text)
    }
}

/// 複数列を連結して1つの検索用テキストにする
pub fn combine_columns(columns: &[Vec<String>]) -> Vec<String> {
    let rows = columns.first().map(|c| c.len()).unwrap_or(0);
    (0..rows)
        .map(|row| {
            columns
                .iter()
                .map(|c| c.get(row).map(|s| s.as_str()).unwrap_or_default())
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect()
}
