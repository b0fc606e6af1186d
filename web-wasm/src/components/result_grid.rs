//! 検索結果グリッドコンポーネント

use image_search_common::{Endpoints, SearchResult};
use leptos::prelude::*;

#[component]
pub fn ResultGrid<F>(
    results: Memo<Vec<SearchResult>>,
    endpoints: Endpoints,
    on_open: F,
) -> impl IntoView
where
    F: Fn(Option<String>) + 'static + Clone + Send + Sync,
{
    view! {
        <Show when=move || !results.get().is_empty()>
            <h3>"Results:"</h3>
        </Show>
        <div class="result-grid">
            <For
                each=move || results.get().into_iter().enumerate()
                key=|(index, result)| result_key(*index, result)
                children=move |(index, result)| {
                    let image_url = endpoints.image_endpoint(&result.image_path);
                    let on_open = on_open.clone();
                    view! {
                        <ResultCard
                            index=index
                            result=result
                            image_url=image_url
                            on_open=on_open
                        />
                    }
                }
            />
        </div>
    }
}

#[component]
fn ResultCard<F>(index: usize, result: SearchResult, image_url: String, on_open: F) -> impl IntoView
where
    F: Fn(Option<String>) + 'static + Clone + Send + Sync,
{
    view! {
        <div
            class="result-card"
            on:click={
                let item_id = result.item_id.clone();
                move |_| on_open(item_id.clone())
            }
        >
            <img src=image_url alt=format!("Result {}", index + 1) />
            <div class="result-info">
                <p><strong>"Image ID: "</strong>{result.image_id_label().to_string()}</p>
                <p><strong>"Item ID: "</strong>{result.item_id_label().to_string()}</p>
                <p><strong>"Score: "</strong>{result.score_label()}</p>
            </div>
        </div>
    }
}

/// 検索のたびに結果が入れ替わるので、順位だけでなく中身もキーに含める
fn result_key(index: usize, result: &SearchResult) -> String {
    format!("{}:{}:{}", index, result.image_path, result.score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(path: &str, score: f64) -> SearchResult {
        SearchResult {
            image_id: None,
            item_id: None,
            image_path: path.to_string(),
            score,
        }
    }

    #[test]
    fn test_result_key_changes_with_new_results() {
        let before = result_key(0, &result("cat.jpg", 0.98));
        let after = result_key(0, &result("dog.jpg", 0.91));
        assert_ne!(before, after);
    }

    #[test]
    fn test_result_key_is_stable_for_same_result() {
        assert_eq!(
            result_key(2, &result("cat.jpg", 0.5)),
            result_key(2, &result("cat.jpg", 0.5))
        );
    }
}
