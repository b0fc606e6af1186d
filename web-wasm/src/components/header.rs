//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Image Similarity Search"</h1>
            <p class="text-muted">"Upload an image to find visually similar products"</p>
        </header>
    }
}
