//! 一括処理
//!
//! 読み込み → 正規化 → 辞書コンパイル → 照合 → 書き出し

use crate::config::Config;
use crate::error::{Result, VacancyError};
use crate::export;
use crate::normalizer::{self, Normalizer};
use crate::sheet::{self, Sheet};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use vacancy_search_common::{
    annotate_with_progress, compile_dictionaries, Annotation, IdentityCleaner, SkillDictionary,
    SkillSummary, SkillTable, TextCleaner,
};

/// 複数列を連結したときの列名
pub const COMBINED_COLUMN: &str = "ta_str";

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub sheet: Option<String>,
    pub dictionary: PathBuf,
    pub cleaning: Option<PathBuf>,
    pub output: PathBuf,
    /// 空ならConfig.text_columnを使用
    pub text_columns: Vec<String>,
    pub keep_duplicates: bool,
    pub show_progress: bool,
    pub verbose: bool,
}

/// 実行結果
#[derive(Debug, Clone)]
pub struct RunReport {
    pub rows: usize,
    pub duplicates_dropped: usize,
    pub skills: usize,
    pub patterns: usize,
    pub summary: Vec<SkillSummary>,
    pub output: PathBuf,
}

/// クリーニング用ブックがあれば読み込む
pub fn load_normalizer(cleaning: Option<&Path>, config: &Config) -> Result<Normalizer> {
    match cleaning {
        Some(path) => Normalizer::from_workbook(path, config),
        None => Ok(Normalizer::basic(&config.replacement)),
    }
}

/// 辞書ブックの全シートを読み込んでコンパイル
pub fn load_dictionaries(
    path: &Path,
    config: &Config,
    cleaner: &dyn TextCleaner,
) -> Result<Vec<SkillDictionary>> {
    let tables: Vec<SkillTable> = sheet::read_all_sheets(path)?
        .into_iter()
        .map(Sheet::into_skill_table)
        .collect();
    Ok(compile_dictionaries(&tables, &config.regex_templates, cleaner)?)
}

/// 検索対象列を決めて元テキストを取り出す
///
/// 複数列指定時は連結した列を `ta_str` として追加する。
fn select_text_column(sheet: &mut Sheet, columns: &[String], config: &Config) -> Result<String> {
    match columns {
        [] => {
            sheet.require_column(&config.text_column)?;
            Ok(config.text_column.clone())
        }
        [single] => {
            sheet.require_column(single)?;
            Ok(single.clone())
        }
        many => {
            let values = many
                .iter()
                .map(|name| sheet.require_column(name).map(|col| sheet.column_text(col)))
                .collect::<Result<Vec<_>>>()?;
            sheet.set_column(COMBINED_COLUMN, normalizer::combine_columns(&values));
            Ok(COMBINED_COLUMN.to_string())
        }
    }
}

/// 求人シートを正規化する（元テキストは `<列名>_old` に退避）
pub fn prepare_corpus(
    sheet: &mut Sheet,
    text_column: &str,
    normalizer: &Normalizer,
) -> Result<Vec<String>> {
    let col = sheet.require_column(text_column)?;
    let raw = sheet.column_text(col);
    let normalized = normalizer.normalize_all(&raw);

    sheet.set_column(&format!("{}_old", text_column), raw);
    sheet.set_column(text_column, normalized.clone());
    Ok(normalized)
}

/// 照合（スキルごとに進捗表示）
pub fn annotate_corpus(
    texts: &[String],
    dictionaries: &[SkillDictionary],
    show_progress: bool,
) -> Annotation {
    let progress = if show_progress {
        ProgressBar::new(dictionaries.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} {msg}") {
        progress.set_style(style.progress_chars("##-"));
    }

    let annotation = annotate_with_progress(texts, dictionaries, |skill| {
        progress.set_message(skill.to_string());
        progress.inc(1);
    });
    progress.finish_and_clear();
    annotation
}

pub fn run(options: &RunOptions, config: &Config) -> Result<RunReport> {
    // 1. 求人データ
    println!("[1/4] 求人データを読み込み中...");
    let mut corpus = sheet::read_sheet(&options.input, options.sheet.as_deref())?;
    let duplicates_dropped = if options.keep_duplicates {
        0
    } else {
        corpus.drop_duplicate_rows()
    };
    println!("✔ {}件の求人を検出\n", corpus.rows.len());
    if options.verbose && duplicates_dropped > 0 {
        println!("  重複行を{}件除去", duplicates_dropped);
    }

    // 2. 正規化
    println!("[2/4] テキストを正規化中...");
    let normalizer = load_normalizer(options.cleaning.as_deref(), config)?;
    if options.verbose {
        let stats = normalizer.stats();
        println!(
            "  ストップワード: {}語, 特殊文字: {}件, その他: {}語",
            stats.stop_words, stats.special_characters, stats.others
        );
    }
    let text_column = select_text_column(&mut corpus, &options.text_columns, config)?;
    let texts = prepare_corpus(&mut corpus, &text_column, &normalizer)?;
    println!("✔ 正規化完了（列: {}）\n", text_column);

    // 3. 辞書
    println!("[3/4] 辞書をコンパイル中...");
    let cleaner: &dyn TextCleaner = if options.cleaning.is_some() {
        &normalizer
    } else {
        &IdentityCleaner
    };
    let dictionaries = load_dictionaries(&options.dictionary, config, cleaner)?;
    if dictionaries.is_empty() {
        return Err(VacancyError::SheetNotFound(format!(
            "辞書シートがありません: {}",
            options.dictionary.display()
        )));
    }
    let patterns: usize = dictionaries.iter().map(|d| d.pattern_count()).sum();
    println!("✔ {}スキル / {}パターン\n", dictionaries.len(), patterns);
    if options.verbose {
        for dict in &dictionaries {
            println!(
                "  {}: {}要件, {}パターン",
                dict.name,
                dict.requirements.len(),
                dict.pattern_count()
            );
        }
    }

    // 4. 照合・書き出し
    println!("[4/4] 照合中...");
    let annotation = annotate_corpus(&texts, &dictionaries, options.show_progress);
    let output = export::output_path_for(&options.output, &config.output_sheet, "xlsx");
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    export::excel::write_annotated(&corpus, &annotation, &output, &config.output_sheet)?;
    println!("✔ 結果を保存: {}", output.display());

    Ok(RunReport {
        rows: corpus.rows.len(),
        duplicates_dropped,
        skills: dictionaries.len(),
        patterns,
        summary: annotation.summary(&dictionaries),
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Sheet {
        let mut sheet = Sheet::new(
            "sample",
            vec!["id".into(), "job_title".into(), "job_description".into()],
        );
        sheet.rows = vec![
            vec![Some("1".into()), Some("Sales".into()), Some("Team Player, 2 years".into())],
            vec![Some("2".into()), Some("Driver".into()), None],
        ];
        sheet
    }

    #[test]
    fn test_prepare_corpus_keeps_original() {
        let mut sheet = corpus();
        let texts = prepare_corpus(&mut sheet, "job_description", &Normalizer::basic(" ")).unwrap();

        assert_eq!(texts, vec!["team player    years", ""]);
        let old = sheet.column_index("job_description_old").unwrap();
        assert_eq!(sheet.cell(0, old), Some("Team Player, 2 years"));
        let col = sheet.column_index("job_description").unwrap();
        assert_eq!(sheet.cell(0, col), Some("team player    years"));
    }

    #[test]
    fn test_select_default_column() {
        let mut sheet = corpus();
        let column = select_text_column(&mut sheet, &[], &Config::default()).unwrap();
        assert_eq!(column, "job_description");
    }

    #[test]
    fn test_select_missing_column() {
        let mut sheet = corpus();
        let result = select_text_column(&mut sheet, &["description".into()], &Config::default());
        assert!(matches!(result, Err(VacancyError::ColumnNotFound(_))));
    }

    #[test]
    fn test_select_combined_columns() {
        let mut sheet = corpus();
        let columns = vec!["job_title".to_string(), "job_description".to_string()];
        let column = select_text_column(&mut sheet, &columns, &Config::default()).unwrap();

        assert_eq!(column, COMBINED_COLUMN);
        let col = sheet.column_index(COMBINED_COLUMN).unwrap();
        assert_eq!(sheet.cell(0, col), Some("Sales  Team Player, 2 years"));
        assert_eq!(sheet.cell(1, col), Some("Driver  "));
    }

    #[test]
    fn test_annotate_corpus_hidden_progress() {
        let annotation = annotate_corpus(&[], &[], false);
        assert_eq!(annotation.row_count, 0);
        assert!(annotation.skills.is_empty());
    }
}
