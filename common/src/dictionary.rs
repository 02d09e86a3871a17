//! スキル辞書コンパイルモジュール
//!
//! 辞書シート（requirement列＋言語別キーワード列）を読み、
//! スキル → 要件 → パターン一覧 に変換する。
//!
//! ## 処理フロー
//! 1. 要件ラベルと言語列（`requirement` と `*_old` 以外）のセルを正規化・小文字化
//! 2. 要件ごとにキーワードを集め、空セルを除いて重複排除
//! 3. 各キーワードをパターンにコンパイル

use crate::error::{Error, Result};
use crate::pattern::{compile_pattern, Pattern, RegexTemplates};
use crate::types::{Requirement, SkillDictionary, SkillTable, UniqueList};

pub const REQUIREMENT_COLUMN: &str = "requirement";
const LEGACY_SUFFIX: &str = "_old";

/// 辞書セルに適用するテキスト正規化
///
/// コーパス側と同じ特殊文字変換を辞書にもかけるためのフック。
pub trait TextCleaner: Sync {
    fn clean(&self, text: &str) -> String;
}

/// 小文字化のみ行うクリーナー
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCleaner;

impl TextCleaner for IdentityCleaner {
    fn clean(&self, text: &str) -> String {
        text.to_lowercase()
    }
}

/// 照合対象のキーワード列か判定
pub fn is_language_column(name: &str) -> bool {
    let name = name.trim();
    !name.eq_ignore_ascii_case(REQUIREMENT_COLUMN) && !name.to_lowercase().ends_with(LEGACY_SUFFIX)
}

/// 全辞書シートをコンパイル（シート順を保持）
pub fn compile_dictionaries(
    tables: &[SkillTable],
    templates: &RegexTemplates,
    cleaner: &dyn TextCleaner,
) -> Result<Vec<SkillDictionary>> {
    tables
        .iter()
        .map(|table| compile_skill(table, templates, cleaner))
        .collect()
}

/// 辞書シート1枚をコンパイル
pub fn compile_skill(
    table: &SkillTable,
    templates: &RegexTemplates,
    cleaner: &dyn TextCleaner,
) -> Result<SkillDictionary> {
    let req_col = table
        .column_index(REQUIREMENT_COLUMN)
        .ok_or_else(|| Error::MissingRequirementColumn {
            skill: table.name.clone(),
        })?;

    let language_cols: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .filter(|(_, name)| is_language_column(name))
        .map(|(i, _)| i)
        .collect();

    // 要件ラベル → 候補キーワード（出現順）
    let mut labels: Vec<String> = Vec::new();
    let mut candidates: Vec<UniqueList> = Vec::new();

    for row in 0..table.rows.len() {
        let label = match table.cell(row, req_col) {
            Some(raw) => cleaner.clean(raw).to_lowercase().trim().to_string(),
            None => continue,
        };
        if label.is_empty() {
            continue;
        }

        let slot = match labels.iter().position(|l| *l == label) {
            Some(i) => i,
            None => {
                labels.push(label);
                candidates.push(UniqueList::new());
                labels.len() - 1
            }
        };

        for &col in &language_cols {
            let Some(raw) = table.cell(row, col) else {
                continue;
            };
            // 前後の空白はキーワードの一部として残す
            let cleaned = cleaner.clean(raw).to_lowercase();
            if !cleaned.trim().is_empty() {
                candidates[slot].insert(&cleaned);
            }
        }
    }

    let mut requirements = Vec::with_capacity(labels.len());
    for (label, keys) in labels.into_iter().zip(candidates) {
        let patterns = keys
            .iter()
            .map(|key| compile_pattern(key, templates))
            .collect::<Result<Vec<Pattern>>>()
            .map_err(|e| match e {
                Error::MalformedPattern { raw, reason } => Error::MalformedPattern {
                    raw,
                    reason: format!("{} (skill `{}`, requirement `{}`)", reason, table.name, label),
                },
                other => other,
            })?;
        requirements.push(Requirement { label, patterns });
    }

    Ok(SkillDictionary {
        name: table.name.clone(),
        requirements,
    })
}

/// コンパイル結果をJSONに変換（辞書確認用）
pub fn dictionaries_to_json(dictionaries: &[SkillDictionary]) -> Result<String> {
    Ok(serde_json::to_string_pretty(dictionaries)?)
}
