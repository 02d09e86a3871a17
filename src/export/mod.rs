pub mod excel;

use crate::error::Result;
use std::path::{Path, PathBuf};
use vacancy_search_common::{dictionaries_to_json, SkillDictionary};

/// 出力先がディレクトリ（または拡張子なし）の場合はファイル名を補う
pub fn output_path_for(output: &Path, stem: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", stem, extension))
    } else {
        output.to_path_buf()
    }
}

/// 入力ファイル名から既定の出力ファイル名を作る（`xxx.xlsx` → `xxx_out.xlsx`）
pub fn default_output_path(input: &Path) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("vacancies");
    parent.join(format!("{}_out.xlsx", stem))
}

/// コンパイル済み辞書をJSONで保存
pub fn write_dictionaries_json(dictionaries: &[SkillDictionary], output_path: &Path) -> Result<()> {
    let json = dictionaries_to_json(dictionaries)?;
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, json)?;
    Ok(())
}
