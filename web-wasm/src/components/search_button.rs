//! 検索ボタンコンポーネント

use leptos::prelude::*;

#[component]
pub fn SearchButton<F>(is_searching: Memo<bool>, on_search: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone,
{
    view! {
        <div class="search-actions">
            <button
                class="btn btn-primary"
                disabled=move || is_searching.get()
                on:click={
                    let on_search = on_search.clone();
                    move |_| on_search(())
                }
            >
                {move || if is_searching.get() { "Searching..." } else { "Search" }}
            </button>
        </div>
    }
}
