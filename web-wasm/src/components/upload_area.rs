//! アップロードエリアコンポーネント
//!
//! 画像を1枚選ぶとプレビューを表示する。選択を取り消すと `None` を通知。

use leptos::prelude::*;
use web_sys::{Event, File, HtmlInputElement};

#[component]
pub fn UploadArea<F>(preview_url: Memo<Option<String>>, on_select: F) -> impl IntoView
where
    F: Fn(Option<File>) + 'static + Clone,
{
    let on_change = {
        let on_select = on_select.clone();
        move |ev: Event| {
            let input: HtmlInputElement = event_target(&ev);
            let file = input.files().and_then(|files| files.get(0));
            on_select(file);
        }
    };

    view! {
        <div class="upload-area">
            <label class="upload-label">
                <div class="upload-icon">"📷"</div>
                <p>"Select an image"</p>
                <input type="file" accept="image/*" on:change=on_change />
            </label>

            <Show when=move || preview_url.get().is_some()>
                <div class="preview">
                    <p class="text-muted">"Preview:"</p>
                    <img
                        class="preview-image"
                        src=move || preview_url.get().unwrap_or_default()
                        alt="Selected image preview"
                    />
                </div>
            </Show>
        </div>
    }
}
