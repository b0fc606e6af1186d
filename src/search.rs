//! ターミナル版の検索フロー
//!
//! 画像を選択 → 検索 → 結果を選んで詳細取得、の流れを共通ストアの遷移で進める。

use crate::client::HttpClient;
use crate::error::{ImageSearchError, Result};
use crate::output;
use crate::upload::{ImageFile, LocalPreview};
use image_search_common::{
    close_detail, open_detail, submit_search, NoticeKind, ProductDetail, SearchOutcome, SearchStore,
};
use std::cell::RefCell;
use std::path::Path;

pub type TerminalStore = SearchStore<ImageFile, LocalPreview>;

/// 画像を選択して検索する
///
/// 検索に失敗した場合は通知メッセージを `SearchFailed` として返す。
pub async fn search_image(client: &HttpClient, path: &Path) -> Result<RefCell<TerminalStore>> {
    let file = ImageFile::load(path)?;
    let store = RefCell::new(TerminalStore::new());
    store.borrow_mut().select_file(file, LocalPreview::new(path));

    let pb = output::spinner("Searching...");
    let outcome = submit_search(&store, client).await;
    pb.finish_and_clear();

    if outcome? == SearchOutcome::Failed {
        let message = store
            .borrow_mut()
            .take_notice()
            .map(|n| n.message)
            .unwrap_or_else(|| NoticeKind::SearchFailed.message().to_string());
        return Err(ImageSearchError::SearchFailed(message));
    }

    Ok(store)
}

/// 詳細を取得して返す（取得中はスピナー、失敗時はプレースホルダ）
pub async fn fetch_detail(
    store: &RefCell<TerminalStore>,
    client: &HttpClient,
    item_id: Option<String>,
) -> ProductDetail {
    let pb = output::spinner("Loading...");
    open_detail(store, client, item_id).await;
    pb.finish_and_clear();

    let detail = store
        .borrow()
        .modal()
        .detail()
        .cloned()
        .unwrap_or(ProductDetail::NotFound);
    close_detail(store);
    detail
}
