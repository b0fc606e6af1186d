use anyhow::Context;
use clap::Parser;
use image_search_rust::{cli, client, config, output, picker, search, upload};
use cli::{Cli, Commands, OutputFormat};
use client::HttpClient;
use config::Config;
use std::cell::RefCell;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load().context("設定ファイルの読み込みに失敗")?;

    match cli.command {
        Commands::Search { image, format, interactive } => {
            let client = HttpClient::new(config.endpoints()?);
            let store = search::search_image(&client, &image).await?;

            {
                let store = store.borrow();
                match format {
                    OutputFormat::Text => {
                        println!("🔍 {}\n", image.display());
                        println!("{}", output::format_results(store.results(), client.endpoints()));
                    }
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(store.results())?);
                    }
                }
            }

            if interactive {
                picker::run_interactive_picker(&store, &client).await?;
            }
        }

        Commands::Product { item_id } => {
            let client = HttpClient::new(config.endpoints()?);
            let store = RefCell::new(search::TerminalStore::new());
            let detail = search::fetch_detail(&store, &client, Some(item_id)).await;
            println!("{}", output::format_detail(&detail));
        }

        Commands::Add { image, image_path } => {
            let client = HttpClient::new(config.endpoints()?);
            let file = upload::ImageFile::load(&image)?;

            let pb = output::spinner("Uploading...");
            let result = client.add_image(&file, image_path.as_deref()).await;
            pb.finish_and_clear();

            let response = result.with_context(|| format!("{} の登録に失敗", image.display()))?;
            println!("✔ {}", if response.message.is_empty() { "Image added" } else { response.message.as_str() });
            if let Some(id) = response.image_id {
                println!("  Image ID: {}", id);
            }
            if let Some(path) = response.image_path {
                println!("  Path:     {}", path);
            }
        }

        Commands::Config { search_url, product_url, image_url, show } => {
            let mut config = config;

            if config.set_urls(search_url, product_url, image_url)? {
                config.save()?;
                println!("✔ 接続先を保存しました");
            }

            if show {
                let effective = config.endpoints()?;
                println!("設定: {}", Config::config_path()?.display());
                println!("  検索API:  {}", effective.search_url);
                println!("  商品API:  {}", effective.product_url);
                println!("  画像:     {}", effective.image_url);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
