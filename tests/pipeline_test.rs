//! 読み込み〜照合〜Excel出力の統合テスト

use rust_xlsxwriter::Workbook;
use std::collections::HashSet;
use std::path::Path;
use tempfile::tempdir;
use vacancy_search::config::Config;
use vacancy_search::pipeline::{self, RunOptions};
use vacancy_search::sheet;

/// (シート名, 行) のリストからブックを作成（1行目がヘッダー）
fn write_workbook(path: &Path, sheets: &[(&str, Vec<Vec<&str>>)]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    worksheet.write_string(r as u32, c as u16, *value).unwrap();
                }
            }
        }
    }
    workbook.save(path).unwrap();
}

fn write_dictionary(path: &Path) {
    write_workbook(
        path,
        &[
            (
                "soft_skills",
                vec![
                    vec!["requirement", "key_en", "key_sq", "key_en_old"],
                    vec!["communication", "communication", "komunikim", "Communication"],
                    vec!["teamwork", "teamwork", "", ""],
                    vec!["teamwork", "[team,player];(0,2)", "", ""],
                ],
            ),
            (
                "technical",
                vec![
                    vec!["requirement", "key_en"],
                    vec!["excel", "Excel"],
                    vec!["java", "java"],
                ],
            ),
        ],
    );
}

fn options(dir: &Path, input: &Path, dictionary: &Path) -> RunOptions {
    RunOptions {
        input: input.to_path_buf(),
        sheet: None,
        dictionary: dictionary.to_path_buf(),
        cleaning: None,
        output: dir.join("out.xlsx"),
        text_columns: Vec::new(),
        keep_duplicates: false,
        show_progress: false,
        verbose: false,
    }
}

fn tokens(value: Option<&str>) -> HashSet<String> {
    value
        .unwrap_or_default()
        .split('|')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[test]
fn test_run_end_to_end() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("vacancies.xlsx");
    let dictionary = dir.path().join("dictionary.xlsx");

    write_workbook(
        &input,
        &[(
            "sample",
            vec![
                vec!["id", "job_description"],
                vec!["1", "Looking for candidate with strong Communication and teamwork skills"],
                vec!["2", "Looking for a driver"],
                vec!["3", "Advanced Excel, team oriented player"],
                vec!["3", "Advanced Excel, team oriented player"],
            ],
        )],
    );
    write_dictionary(&dictionary);

    let report = pipeline::run(&options(dir.path(), &input, &dictionary), &Config::default())
        .expect("処理に失敗");

    assert_eq!(report.rows, 3);
    assert_eq!(report.duplicates_dropped, 1);
    assert_eq!(report.skills, 2);
    assert!(report.output.exists(), "出力ファイルが作成されていない");

    let out = sheet::read_sheet(&report.output, Some("text_search")).expect("出力の読み込みに失敗");
    for column in [
        "id",
        "job_description",
        "job_description_old",
        "s_soft_skills",
        "req_soft_skills",
        "keys_soft_skills",
        "s_technical",
        "req_technical",
        "keys_technical",
    ] {
        assert!(out.column_index(column).is_some(), "列がない: {}", column);
    }

    let s_soft = out.column_index("s_soft_skills").unwrap();
    let req_soft = out.column_index("req_soft_skills").unwrap();
    let keys_soft = out.column_index("keys_soft_skills").unwrap();
    let s_tech = out.column_index("s_technical").unwrap();
    let keys_tech = out.column_index("keys_technical").unwrap();
    let old = out.column_index("job_description_old").unwrap();

    // 1行目: communication + teamwork
    assert_eq!(out.cell(0, s_soft), Some("1"));
    assert_eq!(
        tokens(out.cell(0, req_soft)),
        HashSet::from(["communication".to_string(), "teamwork".to_string()])
    );
    assert_eq!(
        tokens(out.cell(0, keys_soft)),
        HashSet::from(["communication".to_string(), "teamwork".to_string()])
    );
    assert_eq!(out.cell(0, s_tech), Some("0"));
    assert_eq!(
        out.cell(0, old),
        Some("Looking for candidate with strong Communication and teamwork skills")
    );

    // 2行目: 該当なし
    assert_eq!(out.cell(1, s_soft), Some("0"));
    assert_eq!(out.cell(1, req_soft), None);
    assert_eq!(out.cell(1, keys_soft), None);

    // 3行目: 近接パターンとExcel
    assert_eq!(out.cell(2, s_soft), Some("1"));
    assert_eq!(tokens(out.cell(2, req_soft)), HashSet::from(["teamwork".to_string()]));
    assert_eq!(
        tokens(out.cell(2, keys_soft)),
        HashSet::from(["[team,player];(0,2)".to_string()])
    );
    assert_eq!(out.cell(2, s_tech), Some("1"));
    assert_eq!(tokens(out.cell(2, keys_tech)), HashSet::from(["excel".to_string()]));

    let soft = report.summary.iter().find(|s| s.skill == "soft_skills").unwrap();
    assert_eq!(soft.rows_present, 2);
}

#[test]
fn test_run_empty_corpus() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("empty.xlsx");
    let dictionary = dir.path().join("dictionary.xlsx");

    write_workbook(&input, &[("sample", vec![vec!["id", "job_description"]])]);
    write_dictionary(&dictionary);

    let report = pipeline::run(&options(dir.path(), &input, &dictionary), &Config::default())
        .expect("空データでも成功するべき");
    assert_eq!(report.rows, 0);

    let out = sheet::read_sheet(&report.output, None).unwrap();
    assert!(out.rows.is_empty());
    assert!(out.column_index("s_soft_skills").is_some());
    assert!(out.column_index("keys_technical").is_some());
}

#[test]
fn test_run_with_cleaning_workbook() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("vacancies.xlsx");
    let dictionary = dir.path().join("dictionary.xlsx");
    let cleaning = dir.path().join("cleaning_import.xlsx");

    write_workbook(
        &input,
        &[(
            "sample",
            vec![
                vec!["id", "job_description"],
                vec!["1", "Aftësi të mira komunikimi"],
            ],
        )],
    );
    write_workbook(
        &dictionary,
        &[(
            "soft_skills",
            vec![
                vec!["requirement", "key_sq"],
                vec!["communication", "Komunikim"],
                vec!["languages", "gjuhë"],
            ],
        )],
    );
    write_workbook(
        &cleaning,
        &[
            ("stop_words", vec![vec!["sq"], vec!["të"]]),
            ("special_characters", vec![vec!["sq"], vec!["ë, e"]]),
            ("others", vec![vec!["sq"], vec!["mira"]]),
        ],
    );

    let mut opts = options(dir.path(), &input, &dictionary);
    opts.cleaning = Some(cleaning);
    let report = pipeline::run(&opts, &Config::default()).expect("処理に失敗");

    let out = sheet::read_sheet(&report.output, None).unwrap();
    let text = out.column_index("job_description").unwrap();
    assert_eq!(out.cell(0, text), Some("aftesi komunikimi"));

    let keys = out.column_index("keys_soft_skills").unwrap();
    assert_eq!(tokens(out.cell(0, keys)), HashSet::from(["komunikim".to_string()]));
}

#[test]
fn test_compile_dictionaries_from_workbook() {
    let dir = tempdir().expect("Failed to create temp dir");
    let dictionary = dir.path().join("dictionary.xlsx");
    write_dictionary(&dictionary);

    let dictionaries = pipeline::load_dictionaries(
        &dictionary,
        &Config::default(),
        &vacancy_search_common::IdentityCleaner,
    )
    .unwrap();

    let names: Vec<&str> = dictionaries.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["soft_skills", "technical"]);

    let teamwork = dictionaries[0].requirement("teamwork").unwrap();
    assert_eq!(teamwork.patterns.len(), 2);
    assert_eq!(teamwork.patterns.iter().filter(|p| p.is_regex()).count(), 1);

    // key_en_old の "Communication" は対象外
    let communication = dictionaries[0].requirement("communication").unwrap();
    assert_eq!(communication.patterns.len(), 2);

    let json_path = dir.path().join("compiled").join("dictionary.json");
    vacancy_search::export::write_dictionaries_json(&dictionaries, &json_path).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json[1]["name"], "technical");
}
