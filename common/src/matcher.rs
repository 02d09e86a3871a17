//! 照合エンジン
//!
//! 正規化済みの求人テキスト列とコンパイル済み辞書を受け取り、
//! スキルごとに `s_` / `req_` / `keys_` の3列を計算する。
//!
//! スキル同士は状態を共有しないため、`parallel` feature 有効時は
//! rayonでスキル単位に並列処理し、最後に辞書順でまとめる。

use crate::types::{SkillDictionary, SkillMatch, UniqueList};
use serde::Serialize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// 1スキル分の照合結果（行順）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillColumns {
    pub skill: String,
    pub rows: Vec<SkillMatch>,
}

/// 全スキルの照合結果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Annotation {
    pub row_count: usize,
    pub skills: Vec<SkillColumns>,
}

/// スキル単位の集計
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillSummary {
    pub skill: String,
    /// スキルが検出された行数
    pub rows_present: usize,
    /// 要件ごとのヒット行数（辞書順）
    pub requirement_hits: Vec<(String, usize)>,
}

impl Annotation {
    /// 追加される列名（スキルごとに s_, req_, keys_）
    pub fn column_names(&self) -> Vec<String> {
        self.skills
            .iter()
            .flat_map(|s| {
                [
                    format!("s_{}", s.skill),
                    format!("req_{}", s.skill),
                    format!("keys_{}", s.skill),
                ]
            })
            .collect()
    }

    /// 指定行のスキル結果を列順に返す
    pub fn row(&self, index: usize) -> Vec<&SkillMatch> {
        self.skills.iter().filter_map(|s| s.rows.get(index)).collect()
    }

    /// 指定行の追加セル値（column_namesと同じ順）
    pub fn row_cells(&self, index: usize) -> Vec<String> {
        self.row(index)
            .into_iter()
            .flat_map(|m| {
                [
                    m.flag().to_string(),
                    m.requirements_joined(),
                    m.keys_joined(),
                ]
            })
            .collect()
    }

    pub fn skill(&self, name: &str) -> Option<&SkillColumns> {
        self.skills.iter().find(|s| s.skill == name)
    }

    pub fn summary(&self, dictionaries: &[SkillDictionary]) -> Vec<SkillSummary> {
        self.skills
            .iter()
            .map(|columns| {
                let requirement_hits = dictionaries
                    .iter()
                    .find(|d| d.name == columns.skill)
                    .map(|d| {
                        d.requirements
                            .iter()
                            .map(|r| {
                                let hits = columns
                                    .rows
                                    .iter()
                                    .filter(|m| m.requirements.contains(&r.label))
                                    .count();
                                (r.label.clone(), hits)
                            })
                            .collect::<Vec<_>>()
                    })
                    .unwrap_or_default();

                SkillSummary {
                    skill: columns.skill.clone(),
                    rows_present: columns.rows.iter().filter(|m| m.present).count(),
                    requirement_hits,
                }
            })
            .collect()
    }
}

/// コーパス全体を照合する
pub fn annotate<S>(texts: &[S], dictionaries: &[SkillDictionary]) -> Annotation
where
    S: AsRef<str> + Sync,
{
    annotate_with_progress(texts, dictionaries, |_| {})
}

/// 進捗コールバック付きで照合する（スキル完了ごとに呼ばれる）
pub fn annotate_with_progress<S, F>(
    texts: &[S],
    dictionaries: &[SkillDictionary],
    on_skill_done: F,
) -> Annotation
where
    S: AsRef<str> + Sync,
    F: Fn(&str) + Sync,
{
    // 小文字化は一度だけ行い、全スキルで共有
    let lowered: Vec<String> = texts.iter().map(|t| t.as_ref().to_lowercase()).collect();

    let run = |dict: &SkillDictionary| {
        let columns = match_skill(&lowered, dict);
        on_skill_done(&dict.name);
        columns
    };

    #[cfg(feature = "parallel")]
    let skills: Vec<SkillColumns> = dictionaries.par_iter().map(run).collect();
    #[cfg(not(feature = "parallel"))]
    let skills: Vec<SkillColumns> = dictionaries.iter().map(run).collect();

    Annotation {
        row_count: texts.len(),
        skills,
    }
}

/// 1スキル分を照合
pub fn match_skill(lowered_texts: &[String], dictionary: &SkillDictionary) -> SkillColumns {
    let rows = lowered_texts
        .iter()
        .map(|text| match_row(text, dictionary))
        .collect();

    SkillColumns {
        skill: dictionary.name.clone(),
        rows,
    }
}

/// 1行×1スキルを照合
pub fn match_row(lowered_text: &str, dictionary: &SkillDictionary) -> SkillMatch {
    let mut requirements = UniqueList::new();
    let mut keys = UniqueList::new();

    for requirement in &dictionary.requirements {
        for pattern in &requirement.patterns {
            if pattern.is_match(lowered_text) {
                requirements.insert(&requirement.label);
                keys.insert(pattern.source());
            }
        }
    }

    SkillMatch::from_sets(requirements, keys)
}
