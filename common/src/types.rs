//! 辞書と照合結果の型定義
//!
//! CLIと照合エンジンで共有される型:
//! - SkillTable: 辞書シート1枚分の生データ
//! - SkillDictionary: コンパイル済みのスキル辞書
//! - SkillMatch: 1求人×1スキルの照合結果

use crate::pattern::Pattern;
use serde::Serialize;
use std::collections::HashSet;

/// 辞書シート（スキル1つ分）の生データ
#[derive(Debug, Clone, Default)]
pub struct SkillTable {
    /// シート名 = スキル名
    pub name: String,
    /// ヘッダー行
    pub columns: Vec<String>,
    /// データ行（空セルはNone）
    pub rows: Vec<Vec<Option<String>>>,
}

impl SkillTable {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// 列名で列番号を検索（大文字小文字を区別しない）
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.trim().eq_ignore_ascii_case(name))
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|c| c.as_deref())
    }
}

/// 要件（スキルの下位項目）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Requirement {
    pub label: String,
    pub patterns: Vec<Pattern>,
}

/// コンパイル済みスキル辞書
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillDictionary {
    pub name: String,
    pub requirements: Vec<Requirement>,
}

impl SkillDictionary {
    pub fn pattern_count(&self) -> usize {
        self.requirements.iter().map(|r| r.patterns.len()).sum()
    }

    pub fn requirement(&self, label: &str) -> Option<&Requirement> {
        self.requirements.iter().find(|r| r.label == label)
    }
}

/// 挿入順を保持する重複なしリスト
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniqueList {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl UniqueList {
    pub fn new() -> Self {
        Self::default()
    }

    /// 未登録なら追加してtrueを返す
    pub fn insert(&mut self, value: &str) -> bool {
        if self.seen.contains(value) {
            return false;
        }
        self.seen.insert(value.to_string());
        self.items.push(value.to_string());
        true
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|s| s.as_str())
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

/// 1求人×1スキルの照合結果
///
/// requirements / keys の並び順は保証しない（集合として比較すること）。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillMatch {
    pub present: bool,
    pub requirements: Vec<String>,
    pub keys: Vec<String>,
}

impl SkillMatch {
    pub fn from_sets(requirements: UniqueList, keys: UniqueList) -> Self {
        Self {
            present: !requirements.is_empty(),
            requirements: requirements.into_vec(),
            keys: keys.into_vec(),
        }
    }

    /// `s_` 列の値（1/0）
    pub fn flag(&self) -> u8 {
        u8::from(self.present)
    }

    /// `req_` 列の値（|区切り）
    pub fn requirements_joined(&self) -> String {
        self.requirements.join("|")
    }

    /// `keys_` 列の値（|区切り）
    pub fn keys_joined(&self) -> String {
        self.keys.join("|")
    }
}
