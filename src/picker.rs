//! 対話式の結果選択
//!
//! 検索結果から1件選ぶと商品詳細を表示する。Esc/qで終了。

use crate::client::HttpClient;
use crate::error::{ImageSearchError, Result};
use crate::output;
use crate::search::{fetch_detail, TerminalStore};
use dialoguer::Select;
use std::cell::RefCell;

/// 結果を選んで詳細を表示するループ
pub async fn run_interactive_picker(store: &RefCell<TerminalStore>, client: &HttpClient) -> Result<()> {
    let labels: Vec<String> = store
        .borrow()
        .results()
        .iter()
        .enumerate()
        .map(|(i, r)| output::choice_label(i, r))
        .collect();

    if labels.is_empty() {
        return Ok(());
    }

    let mut cursor = 0;
    loop {
        let Some(index) = prompt_result(&labels, cursor)? else {
            break;
        };
        cursor = index;

        let item_id = store.borrow().results().get(index).and_then(|r| r.item_id.clone());
        let detail = fetch_detail(store, client, item_id).await;
        println!("\n{}\n", output::format_detail(&detail));
    }

    Ok(())
}

fn prompt_result(labels: &[String], default: usize) -> Result<Option<usize>> {
    Select::new()
        .with_prompt("Open a result (Esc to quit)")
        .items(labels)
        .default(default)
        .interact_opt()
        .map_err(|e| ImageSearchError::Prompt(e.to_string()))
}
