use anyhow::Context;
use clap::Parser;
use vacancy_search::{cli, config, export, pipeline};
use cli::{Cli, Commands};
use config::Config;
use vacancy_search_common::{dictionaries_to_json, IdentityCleaner, TextCleaner};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load().context("設定ファイルの読み込みに失敗しました")?;

    match cli.command {
        Commands::Run { input, dictionary, cleaning, output, sheet, text_columns, keep_duplicates, no_progress } => {
            println!("🔎 vacancy-search - 求人テキスト検索\n");
            let started = chrono::Local::now();

            let output = output.unwrap_or_else(|| export::default_output_path(&input));
            let options = pipeline::RunOptions {
                input,
                sheet,
                dictionary,
                cleaning,
                output,
                text_columns,
                keep_duplicates,
                show_progress: !no_progress,
                verbose: cli.verbose,
            };

            let report = pipeline::run(&options, &config)
                .with_context(|| format!("処理に失敗しました: {}", options.input.display()))?;

            println!("\nスキル別検出件数:");
            for skill in &report.summary {
                println!("  {}: {}/{}件", skill.skill, skill.rows_present, report.rows);
                if cli.verbose {
                    for (requirement, hits) in &skill.requirement_hits {
                        println!("    - {}: {}件", requirement, hits);
                    }
                }
            }

            let elapsed = chrono::Local::now() - started;
            println!(
                "\n✅ 完了 ({}件 × {}スキル, 経過時間 {:02}:{:02}:{:02})",
                report.rows,
                report.skills,
                elapsed.num_hours(),
                elapsed.num_minutes() % 60,
                elapsed.num_seconds() % 60
            );
        }

        Commands::Compile { dictionary, cleaning, output } => {
            let normalizer = pipeline::load_normalizer(cleaning.as_deref(), &config)?;
            let cleaner: &dyn TextCleaner = if cleaning.is_some() { &normalizer } else { &IdentityCleaner };

            let dictionaries = pipeline::load_dictionaries(&dictionary, &config, cleaner)
                .with_context(|| format!("辞書のコンパイルに失敗しました: {}", dictionary.display()))?;

            match output {
                Some(path) => {
                    export::write_dictionaries_json(&dictionaries, &path)?;
                    println!("✔ {}スキルをコンパイル: {}", dictionaries.len(), path.display());
                }
                None => println!("{}", dictionaries_to_json(&dictionaries)?),
            }
        }

        Commands::Config { init, show } => {
            if init {
                let path = config.save()?;
                println!("✔ 設定ファイルを作成しました: {}", path.display());
            }

            if show || !init {
                println!("設定:");
                println!("  検索列: {}", config.text_column);
                println!("  出力シート: {}", config.output_sheet);
                println!("  置換文字: {:?}", config.replacement);
                println!("  2語テンプレート: {}", config.regex_templates.two_word);
                println!("  3語テンプレート: {}", config.regex_templates.three_word);
                println!(
                    "  クリーニングシート: {} / {} / {}",
                    config.stop_words_sheet, config.special_characters_sheet, config.others_sheet
                );
            }
        }
    }

    Ok(())
}
