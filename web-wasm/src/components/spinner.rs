//! 読み込み中表示

use leptos::prelude::*;

#[component]
pub fn Spinner(#[prop(into)] label: String) -> impl IntoView {
    view! {
        <div class="spinner-container">
            <div class="spinner" />
            <p class="spinner-text">{label}</p>
        </div>
    }
}
