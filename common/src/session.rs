//! 検索セッション
//!
//! ストアの遷移とAPI呼び出しをつなぐ非同期処理。
//! WebではLeptosのシグナル、CLIではRefCellがストアの入れ物になる。

use std::cell::RefCell;
use serde_json::Value;
use crate::error::{Error, Result};
use crate::store::{PreviewHandle, SearchOutcome, SearchStore};
use crate::types::SearchResponse;

/// 検索バックエンド
#[allow(async_fn_in_trait)]
pub trait SearchApi {
    /// アップロードするファイルの型
    type File;

    /// `POST /search/` (multipart: file, top_k)
    async fn search(&self, file: &Self::File, top_k: u32) -> Result<SearchResponse>;

    /// `GET /products/{item_id}`
    async fn product_detail(&self, item_id: &str) -> Result<Value>;
}

/// ストアの入れ物
///
/// 入れ物が破棄済み（コンポーネントのアンマウント後など）なら `None` を返す。
pub trait StoreCell {
    type File;
    type Preview: PreviewHandle;

    fn update<R>(&self, f: impl FnOnce(&mut SearchStore<Self::File, Self::Preview>) -> R) -> Option<R>;
}

impl<F, P: PreviewHandle> StoreCell for RefCell<SearchStore<F, P>> {
    type File = F;
    type Preview = P;

    fn update<R>(&self, f: impl FnOnce(&mut SearchStore<F, P>) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// 選択中のファイルで検索する
///
/// 未選択の場合はリクエストを出さずに `Error::NoFileSelected` を返す。
/// 通信失敗は `SearchOutcome::Failed` としてストアに反映される。
pub async fn submit_search<C, A>(cell: &C, api: &A) -> Result<SearchOutcome>
where
    C: StoreCell,
    C::File: Clone,
    A: SearchApi<File = C::File>,
{
    let Some(ticket) = cell.update(|s| s.begin_search()) else {
        return Ok(SearchOutcome::Stale);
    };
    let ticket = ticket?;

    let response = api
        .search(&ticket.file, ticket.top_k)
        .await
        .map(|r| r.results);

    Ok(cell
        .update(|s| s.finish_search(ticket.generation, response))
        .unwrap_or(SearchOutcome::Stale))
}

/// 詳細モーダルを開いて商品情報を取得する
///
/// 反映されたら true。閉じられた・開き直された場合は false。
pub async fn open_detail<C, A>(cell: &C, api: &A, item_id: Option<String>) -> bool
where
    C: StoreCell,
    A: SearchApi,
{
    let Some(ticket) = cell.update(|s| s.open_detail(item_id)) else {
        return false;
    };

    let result = match &ticket.item_id {
        Some(id) => api.product_detail(id).await,
        None => Err(Error::MissingItemId),
    };

    cell.update(|s| s.finish_detail(ticket.generation, result))
        .unwrap_or(false)
}

/// 詳細モーダルを閉じる
pub fn close_detail<C: StoreCell>(cell: &C) {
    cell.update(|s| s.close_detail());
}
