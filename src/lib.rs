//! image-search-rust
//!
//! 類似画像検索バックエンドのターミナルクライアント

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod picker;
pub mod search;
pub mod upload;
