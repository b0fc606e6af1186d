//! ターミナル出力

use image_search_common::{Endpoints, ProductDetail, SearchResult};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// 通信中のスピナー
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// 検索結果1件分のブロック
pub fn format_result(index: usize, result: &SearchResult, endpoints: &Endpoints) -> String {
    format!(
        "#{}\n  Image ID: {}\n  Item ID:  {}\n  Image:    {}\n  Score:    {}",
        index + 1,
        result.image_id_label(),
        result.item_id_label(),
        endpoints.image_endpoint(&result.image_path),
        result.score_label(),
    )
}

pub fn format_results(results: &[SearchResult], endpoints: &Endpoints) -> String {
    if results.is_empty() {
        return "No results".to_string();
    }

    let blocks: Vec<String> = results
        .iter()
        .enumerate()
        .map(|(i, r)| format_result(i, r, endpoints))
        .collect();
    format!("Results:\n{}", blocks.join("\n"))
}

/// 対話選択用の1行ラベル
pub fn choice_label(index: usize, result: &SearchResult) -> String {
    format!(
        "{}. {} / {} ({})",
        index + 1,
        result.item_id_label(),
        result.image_id_label(),
        result.score_label()
    )
}

pub fn format_detail(detail: &ProductDetail) -> String {
    format!("Product JSON\n{}", detail.to_pretty_string())
}
