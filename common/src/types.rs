//! 検索結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - SearchResult: 検索APIが返す1件分のヒット
//! - SearchResponse: 検索APIのレスポンス全体
//! - ProductDetail: 商品メタデータ（取得失敗時はプレースホルダ）

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// 検索時に要求する件数（固定）
pub const SEARCH_TOP_K: u32 = 5;

/// 値が無い場合の表示
pub const NOT_AVAILABLE: &str = "N/A";

/// 商品取得失敗時のエラーメッセージ
pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// 検索結果1件
///
/// ワイヤ形式はフラット: `{ image_id, item_id, image_path, score }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub image_id: Option<String>,

    #[serde(default)]
    pub item_id: Option<String>,

    /// 画像サーバ上の相対パス
    pub image_path: String,

    /// 類似度スコア
    pub score: f64,
}

impl SearchResult {
    pub fn image_id_label(&self) -> &str {
        display_or_na(self.image_id.as_deref())
    }

    pub fn item_id_label(&self) -> &str {
        display_or_na(self.item_id.as_deref())
    }

    pub fn score_label(&self) -> String {
        format_score(self.score)
    }
}

/// 検索APIレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

/// 商品詳細
#[derive(Debug, Clone, PartialEq)]
pub enum ProductDetail {
    /// APIが返したJSONドキュメント
    Found(Value),
    /// 取得失敗（`{"error": "Product not found"}` として表示）
    NotFound,
}

impl ProductDetail {
    /// 取得結果から詳細を作る。失敗はプレースホルダに置き換える
    pub fn from_fetch<E>(result: std::result::Result<Value, E>) -> Self {
        match result {
            Ok(value) => ProductDetail::Found(value),
            Err(_) => ProductDetail::NotFound,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ProductDetail::Found(_))
    }

    pub fn to_json(&self) -> Value {
        match self {
            ProductDetail::Found(value) => value.clone(),
            ProductDetail::NotFound => json!({ "error": PRODUCT_NOT_FOUND }),
        }
    }

    /// 2スペースインデントで整形したJSON
    pub fn to_pretty_string(&self) -> String {
        let value = self.to_json();
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
    }
}

/// スコアを小数点以下4桁で表示
pub fn format_score(score: f64) -> String {
    format!("{:.4}", score)
}

/// 空または欠落した値を "N/A" に置き換える
pub fn display_or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => NOT_AVAILABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_deserialize() {
        let json = r#"{
            "results": [
                {"image_id": "i1", "item_id": "p1", "image_path": "cat.jpg", "score": 0.98},
                {"image_id": "i2", "item_id": "p2", "image_path": "dog.jpg", "score": 0.75}
            ]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].image_id.as_deref(), Some("i1"));
        assert_eq!(response.results[0].item_id.as_deref(), Some("p1"));
        assert_eq!(response.results[0].image_path, "cat.jpg");
        assert_eq!(response.results[1].image_path, "dog.jpg");
    }

    #[test]
    fn test_search_result_missing_ids() {
        // item_idはバックエンド側でnullになることがある
        let json = r#"{"image_id": null, "image_path": "shoes/a.jpg", "score": 0.5}"#;

        let result: SearchResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.image_id, None);
        assert_eq!(result.item_id, None);
        assert_eq!(result.image_id_label(), "N/A");
        assert_eq!(result.item_id_label(), "N/A");
    }

    #[test]
    fn test_nested_image_path_is_rejected() {
        let json = r#"{
            "results": [{
                "image_path": {"image_id": "i1", "item_id": "p1", "image_path": "cat.jpg"},
                "score": 0.9
            }]
        }"#;

        assert!(serde_json::from_str::<SearchResponse>(json).is_err());
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.98), "0.9800");
        assert_eq!(format_score(1.0), "1.0000");
        assert_eq!(format_score(0.123456), "0.1235");
    }

    #[test]
    fn test_display_or_na() {
        assert_eq!(display_or_na(Some("p1")), "p1");
        assert_eq!(display_or_na(Some("")), "N/A");
        assert_eq!(display_or_na(None), "N/A");
    }

    #[test]
    fn test_product_detail_found_pretty() {
        let detail = ProductDetail::Found(json!({"name": "Cat Toy"}));
        assert!(detail.is_found());
        assert_eq!(detail.to_pretty_string(), "{\n  \"name\": \"Cat Toy\"\n}");
    }

    #[test]
    fn test_product_detail_placeholder() {
        let detail = ProductDetail::from_fetch::<&str>(Err("404"));
        assert!(!detail.is_found());
        assert_eq!(detail.to_json(), json!({"error": "Product not found"}));
        assert_eq!(detail.to_pretty_string(), "{\n  \"error\": \"Product not found\"\n}");
    }
}
