use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vacancy-search")]
#[command(about = "求人票テキストのスキル辞書検索ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 求人データを辞書で照合してExcelを出力
    Run {
        /// 求人データ（xlsx/xls/ods）
        #[arg(required = true)]
        input: PathBuf,

        /// スキル辞書ブック（1シート = 1スキル）
        #[arg(short, long)]
        dictionary: PathBuf,

        /// クリーニング用ブック（stop_words / special_characters / others）
        #[arg(short, long)]
        cleaning: Option<PathBuf>,

        /// 出力ファイル/ディレクトリ（デフォルト: 入力ファイル名_out.xlsx）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 求人データのシート名（省略時は先頭シート）
        #[arg(long)]
        sheet: Option<String>,

        /// 検索対象の列（複数指定で連結、省略時は設定値）
        #[arg(short = 't', long = "text-column")]
        text_columns: Vec<String>,

        /// 重複行を除去しない
        #[arg(long)]
        keep_duplicates: bool,

        /// 進捗バーを表示しない
        #[arg(long)]
        no_progress: bool,
    },

    /// 辞書をコンパイルしてJSONで確認
    Compile {
        /// スキル辞書ブック
        #[arg(required = true)]
        dictionary: PathBuf,

        /// クリーニング用ブック
        #[arg(short, long)]
        cleaning: Option<PathBuf>,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/初期化
    Config {
        /// 既定値で設定ファイルを作成
        #[arg(long)]
        init: bool,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
