//! 画面状態ストア
//!
//! 選択ファイル・プレビュー・検索中フラグ・検索結果・詳細モーダルを1か所で保持する。
//! 状態の変更は名前付きの遷移メソッド経由でのみ行う。
//!
//! モーダルの遷移: Closed → Loading → Open(取得成功 | プレースホルダ) → Closed
//!
//! 検索と詳細取得はそれぞれ世代番号を持ち、最新の世代以外の完了通知は捨てる。

use serde_json::Value;
use crate::error::{Error, Result};
use crate::types::{ProductDetail, SearchResult, SEARCH_TOP_K};

/// プレビュー用に確保したリソース
///
/// 実装側はDropでリソースを解放すること（ブラウザならrevokeObjectURL）。
pub trait PreviewHandle {
    fn url(&self) -> &str;
}

/// 選択中の画像とそのプレビュー
pub struct Selection<F, P> {
    file: F,
    preview: P,
}

impl<F, P: PreviewHandle> Selection<F, P> {
    pub fn new(file: F, preview: P) -> Self {
        Self { file, preview }
    }

    pub fn file(&self) -> &F {
        &self.file
    }

    pub fn preview_url(&self) -> &str {
        self.preview.url()
    }
}

/// ユーザーに見せる通知の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    NoFileSelected,
    SearchFailed,
}

impl NoticeKind {
    pub fn message(&self) -> &'static str {
        match self {
            NoticeKind::NoFileSelected => "Please select an image to search",
            NoticeKind::SearchFailed => "Failed to search. See console for details.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl From<NoticeKind> for Notice {
    fn from(kind: NoticeKind) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
        }
    }
}

/// 詳細モーダルの状態
#[derive(Debug, Clone, PartialEq)]
pub enum ModalState {
    Closed,
    Loading {
        generation: u64,
        item_id: Option<String>,
    },
    Open {
        item_id: Option<String>,
        detail: ProductDetail,
    },
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::Closed)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ModalState::Loading { .. })
    }

    pub fn item_id(&self) -> Option<&str> {
        match self {
            ModalState::Closed => None,
            ModalState::Loading { item_id, .. } | ModalState::Open { item_id, .. } => item_id.as_deref(),
        }
    }

    pub fn detail(&self) -> Option<&ProductDetail> {
        match self {
            ModalState::Open { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

/// 検索開始時に発行するチケット
#[derive(Debug, Clone)]
pub struct SearchTicket<F> {
    pub generation: u64,
    pub file: F,
    pub top_k: u32,
}

/// 詳細取得開始時に発行するチケット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    pub generation: u64,
    pub item_id: Option<String>,
}

/// 検索完了の反映結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// 結果を置き換えた（件数）
    Applied(usize),
    /// 失敗。既存の結果はそのまま
    Failed,
    /// 新しい検索が発行済みのため破棄
    Stale,
}

/// 画面状態
pub struct SearchStore<F, P> {
    selection: Option<Selection<F, P>>,
    results: Vec<SearchResult>,
    search_generation: u64,
    in_flight: Option<u64>,
    modal: ModalState,
    detail_generation: u64,
    notice: Option<Notice>,
}

impl<F, P> Default for SearchStore<F, P> {
    fn default() -> Self {
        Self {
            selection: None,
            results: Vec::new(),
            search_generation: 0,
            in_flight: None,
            modal: ModalState::Closed,
            detail_generation: 0,
            notice: None,
        }
    }
}

impl<F, P: PreviewHandle> SearchStore<F, P> {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- 参照 ----

    pub fn selection(&self) -> Option<&Selection<F, P>> {
        self.selection.as_ref()
    }

    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.selection.as_ref().map(|s| s.preview_url())
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn is_searching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    // ---- 選択 ----

    /// ファイルを選択する。以前のプレビューはここで解放される
    pub fn select_file(&mut self, file: F, preview: P) {
        self.selection = Some(Selection::new(file, preview));
    }

    /// 選択を解除してプレビューを解放する
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    // ---- 検索 ----

    /// 検索を開始する
    ///
    /// 未選択ならネットワークに出ずに通知を立てて `Error::NoFileSelected` を返す。
    pub fn begin_search(&mut self) -> Result<SearchTicket<F>>
    where
        F: Clone,
    {
        let Some(selection) = &self.selection else {
            self.notice = Some(NoticeKind::NoFileSelected.into());
            return Err(Error::NoFileSelected);
        };

        self.search_generation += 1;
        self.in_flight = Some(self.search_generation);

        Ok(SearchTicket {
            generation: self.search_generation,
            file: selection.file.clone(),
            top_k: SEARCH_TOP_K,
        })
    }

    /// 検索完了を反映する
    pub fn finish_search(
        &mut self,
        generation: u64,
        result: Result<Vec<SearchResult>>,
    ) -> SearchOutcome {
        if self.in_flight != Some(generation) {
            tracing::debug!(generation, latest = self.search_generation, "discarding stale search response");
            return SearchOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(results) => {
                let count = results.len();
                self.results = results;
                SearchOutcome::Applied(count)
            }
            Err(e) => {
                tracing::error!(error = %e, "search request failed");
                self.notice = Some(NoticeKind::SearchFailed.into());
                SearchOutcome::Failed
            }
        }
    }

    // ---- 詳細モーダル ----

    /// モーダルを開いてLoadingにする。前回のドキュメントは破棄
    pub fn open_detail(&mut self, item_id: Option<String>) -> DetailTicket {
        self.detail_generation += 1;
        self.modal = ModalState::Loading {
            generation: self.detail_generation,
            item_id: item_id.clone(),
        };
        DetailTicket {
            generation: self.detail_generation,
            item_id,
        }
    }

    /// 詳細取得の完了を反映する。閉じた後や開き直した後の完了は捨てて false を返す
    pub fn finish_detail(&mut self, generation: u64, result: Result<Value>) -> bool {
        let item_id = match &self.modal {
            ModalState::Loading { generation: current, item_id } if *current == generation => item_id.clone(),
            _ => {
                tracing::debug!(generation, "discarding stale product detail");
                return false;
            }
        };

        if let Err(e) = &result {
            tracing::warn!(error = %e, item_id = ?item_id, "product detail fetch failed");
        }

        self.modal = ModalState::Open {
            item_id,
            detail: ProductDetail::from_fetch(result),
        };
        true
    }

    /// モーダルを閉じる（取得中でも無条件）
    pub fn close_detail(&mut self) {
        self.modal = ModalState::Closed;
    }

    // ---- 通知 ----

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Debug, PartialEq)]
    struct TestFile(&'static str);

    struct TestPreview {
        url: String,
        released: Rc<Cell<usize>>,
    }

    impl PreviewHandle for TestPreview {
        fn url(&self) -> &str {
            &self.url
        }
    }

    impl Drop for TestPreview {
        fn drop(&mut self) {
            self.released.set(self.released.get() + 1);
        }
    }

    fn preview(name: &str, released: &Rc<Cell<usize>>) -> TestPreview {
        TestPreview {
            url: format!("blob:{}", name),
            released: released.clone(),
        }
    }

    fn result(id: &str, score: f64) -> SearchResult {
        SearchResult {
            image_id: Some(format!("i-{}", id)),
            item_id: Some(format!("p-{}", id)),
            image_path: format!("{}.jpg", id),
            score,
        }
    }

    fn store_with_file() -> SearchStore<TestFile, TestPreview> {
        let released = Rc::new(Cell::new(0));
        let mut store = SearchStore::new();
        store.select_file(TestFile("cat.jpg"), preview("cat", &released));
        store
    }

    // =============================================
    // 選択・プレビュー
    // =============================================

    #[test]
    fn test_select_file_sets_preview() {
        let released = Rc::new(Cell::new(0));
        let mut store: SearchStore<TestFile, TestPreview> = SearchStore::new();
        assert!(!store.has_selection());
        assert_eq!(store.preview_url(), None);

        store.select_file(TestFile("cat.jpg"), preview("cat", &released));
        assert!(store.has_selection());
        assert_eq!(store.preview_url(), Some("blob:cat"));
        assert_eq!(store.selection().map(|s| s.file().clone()), Some(TestFile("cat.jpg")));
        assert_eq!(released.get(), 0);
    }

    #[test]
    fn test_replacing_selection_releases_previous_preview() {
        let released = Rc::new(Cell::new(0));
        let mut store: SearchStore<TestFile, TestPreview> = SearchStore::new();

        store.select_file(TestFile("a.jpg"), preview("a", &released));
        store.select_file(TestFile("b.jpg"), preview("b", &released));

        assert_eq!(released.get(), 1);
        assert_eq!(store.preview_url(), Some("blob:b"));
    }

    #[test]
    fn test_clear_selection_releases_preview() {
        let released = Rc::new(Cell::new(0));
        let mut store: SearchStore<TestFile, TestPreview> = SearchStore::new();
        store.select_file(TestFile("a.jpg"), preview("a", &released));

        store.clear_selection();
        assert_eq!(released.get(), 1);
        assert_eq!(store.preview_url(), None);
    }

    #[test]
    fn test_dropping_store_releases_preview() {
        let released = Rc::new(Cell::new(0));
        {
            let mut store: SearchStore<TestFile, TestPreview> = SearchStore::new();
            store.select_file(TestFile("a.jpg"), preview("a", &released));
        }
        assert_eq!(released.get(), 1);
    }

    // =============================================
    // 検索
    // =============================================

    #[test]
    fn test_begin_search_without_file() {
        let mut store: SearchStore<TestFile, TestPreview> = SearchStore::new();

        let err = store.begin_search().unwrap_err();
        assert!(matches!(err, Error::NoFileSelected));
        assert!(!store.is_searching());

        let notice = store.take_notice().expect("通知が無い");
        assert_eq!(notice.kind, NoticeKind::NoFileSelected);
        assert_eq!(notice.message, "Please select an image to search");
        assert!(store.notice().is_none());
    }

    #[test]
    fn test_begin_search_issues_ticket() {
        let mut store = store_with_file();

        let ticket = store.begin_search().expect("検索開始失敗");
        assert_eq!(ticket.file, TestFile("cat.jpg"));
        assert_eq!(ticket.top_k, 5);
        assert!(store.is_searching());
    }

    #[test]
    fn test_finish_search_replaces_results_in_order() {
        let mut store = store_with_file();
        let ticket = store.begin_search().unwrap();

        let outcome = store.finish_search(
            ticket.generation,
            Ok(vec![result("b", 0.4), result("a", 0.9), result("c", 0.7)]),
        );

        assert_eq!(outcome, SearchOutcome::Applied(3));
        assert!(!store.is_searching());
        // クライアント側で並べ替えない
        let paths: Vec<&str> = store.results().iter().map(|r| r.image_path.as_str()).collect();
        assert_eq!(paths, vec!["b.jpg", "a.jpg", "c.jpg"]);
    }

    #[test]
    fn test_failed_search_keeps_previous_results() {
        let mut store = store_with_file();
        let first = store.begin_search().unwrap();
        store.finish_search(first.generation, Ok(vec![result("a", 0.9)]));

        let second = store.begin_search().unwrap();
        let outcome = store.finish_search(
            second.generation,
            Err(Error::Status { status: 500, url: "http://localhost:8000/search/".into() }),
        );

        assert_eq!(outcome, SearchOutcome::Failed);
        assert!(!store.is_searching());
        assert_eq!(store.results(), &[result("a", 0.9)]);
        assert_eq!(store.take_notice().map(|n| n.kind), Some(NoticeKind::SearchFailed));
    }

    #[test]
    fn test_stale_search_response_is_discarded() {
        let mut store = store_with_file();
        let first = store.begin_search().unwrap();
        let second = store.begin_search().unwrap();

        // 2回目が先に返る
        assert_eq!(
            store.finish_search(second.generation, Ok(vec![result("new", 0.8)])),
            SearchOutcome::Applied(1)
        );
        assert_eq!(
            store.finish_search(first.generation, Ok(vec![result("old", 0.9), result("old2", 0.1)])),
            SearchOutcome::Stale
        );
        assert_eq!(store.results(), &[result("new", 0.8)]);
    }

    #[test]
    fn test_stale_response_keeps_newer_request_in_flight() {
        let mut store = store_with_file();
        let first = store.begin_search().unwrap();
        let second = store.begin_search().unwrap();

        assert_eq!(
            store.finish_search(first.generation, Err(Error::Transport("reset".into()))),
            SearchOutcome::Stale
        );
        assert!(store.is_searching());
        assert!(store.notice().is_none());

        store.finish_search(second.generation, Ok(vec![]));
        assert!(!store.is_searching());
    }

    // =============================================
    // 詳細モーダル
    // =============================================

    #[test]
    fn test_open_detail_starts_loading() {
        let mut store = store_with_file();
        assert_eq!(store.modal(), &ModalState::Closed);

        let ticket = store.open_detail(Some("p1".to_string()));
        assert_eq!(ticket.item_id.as_deref(), Some("p1"));
        assert!(store.modal().is_open());
        assert!(store.modal().is_loading());
        assert_eq!(store.modal().item_id(), Some("p1"));
        assert!(store.modal().detail().is_none());
    }

    #[test]
    fn test_finish_detail_success() {
        let mut store = store_with_file();
        let ticket = store.open_detail(Some("p1".to_string()));

        assert!(store.finish_detail(ticket.generation, Ok(json!({"name": "Cat Toy"}))));
        assert!(!store.modal().is_loading());
        assert_eq!(
            store.modal().detail(),
            Some(&ProductDetail::Found(json!({"name": "Cat Toy"})))
        );
    }

    #[test]
    fn test_finish_detail_failure_shows_placeholder() {
        let mut store = store_with_file();
        let ticket = store.open_detail(Some("missing".to_string()));

        assert!(store.finish_detail(
            ticket.generation,
            Err(Error::Status { status: 404, url: "http://localhost:8000/products/missing".into() }),
        ));
        let detail = store.modal().detail().expect("詳細が無い");
        assert_eq!(detail.to_json(), json!({"error": "Product not found"}));
        // 詳細取得の失敗は通知しない
        assert!(store.notice().is_none());
    }

    #[test]
    fn test_close_detail_discards_late_response() {
        let mut store = store_with_file();
        let ticket = store.open_detail(Some("p1".to_string()));
        store.close_detail();

        assert!(!store.finish_detail(ticket.generation, Ok(json!({"name": "late"}))));
        assert_eq!(store.modal(), &ModalState::Closed);
    }

    #[test]
    fn test_reopen_discards_previous_document() {
        let mut store = store_with_file();
        let first = store.open_detail(Some("p1".to_string()));
        store.finish_detail(first.generation, Ok(json!({"name": "Cat Toy"})));
        store.close_detail();

        let second = store.open_detail(Some("p2".to_string()));
        // 開き直した直後は前のドキュメントが見えない
        assert!(store.modal().detail().is_none());
        assert_eq!(store.modal().item_id(), Some("p2"));

        // 古い取得の完了は反映されない
        assert!(!store.finish_detail(first.generation, Ok(json!({"name": "stale"}))));
        assert!(store.finish_detail(second.generation, Ok(json!({"name": "Dog Bed"}))));
        assert_eq!(
            store.modal().detail(),
            Some(&ProductDetail::Found(json!({"name": "Dog Bed"})))
        );
    }

    #[test]
    fn test_open_while_loading_supersedes() {
        let mut store = store_with_file();
        let first = store.open_detail(Some("p1".to_string()));
        let second = store.open_detail(Some("p2".to_string()));

        assert!(!store.finish_detail(first.generation, Ok(json!({"name": "p1"}))));
        assert!(store.modal().is_loading());
        assert!(store.finish_detail(second.generation, Ok(json!({"name": "p2"}))));
    }

    #[test]
    fn test_close_from_any_state() {
        let mut store = store_with_file();
        store.close_detail();
        assert_eq!(store.modal(), &ModalState::Closed);

        store.open_detail(None);
        store.close_detail();
        assert_eq!(store.modal(), &ModalState::Closed);
    }
}
