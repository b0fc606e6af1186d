use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "image-search")]
#[command(about = "類似画像検索クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像をアップロードして類似画像を検索
    Search {
        /// 検索に使う画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// 出力形式 (text/json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// 結果を選んで商品詳細を表示
        #[arg(short, long)]
        interactive: bool,
    },

    /// 商品詳細を表示
    Product {
        /// 商品ID
        #[arg(required = true)]
        item_id: String,
    },

    /// 画像を検索インデックスに登録
    Add {
        /// 登録する画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// 画像サーバ上の保存パス（省略時はファイル名）
        #[arg(long)]
        image_path: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// 検索APIのベースURL
        #[arg(long)]
        search_url: Option<String>,

        /// 商品APIのベースURL
        #[arg(long)]
        product_url: Option<String>,

        /// 画像サーバのベースURL
        #[arg(long)]
        image_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use text or json", s)),
        }
    }
}
