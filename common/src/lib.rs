//! Image Search Common Library
//!
//! CLIとWeb(WASM)で共有される型・状態ストア・セッション処理

pub mod types;
pub mod endpoints;
pub mod error;
pub mod store;
pub mod session;

pub use types::{SearchResult, SearchResponse, ProductDetail, format_score, display_or_na, SEARCH_TOP_K};
pub use endpoints::Endpoints;
pub use error::{Error, Result};
pub use store::{SearchStore, Selection, PreviewHandle, ModalState, Notice, NoticeKind, SearchTicket, DetailTicket, SearchOutcome};
pub use session::{SearchApi, StoreCell, submit_search, open_detail, close_detail};
