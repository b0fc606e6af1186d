//! UIコンポーネント

pub mod detail_modal;
pub mod header;
pub mod result_grid;
pub mod search_button;
pub mod spinner;
pub mod upload_area;
