//! バックエンドAPI

mod fetch;

pub use fetch::FetchClient;
