//! 商品詳細モーダルコンポーネント

use image_search_common::ModalState;
use leptos::prelude::*;
use crate::components::spinner::Spinner;

#[component]
pub fn DetailModal<F>(modal: Memo<ModalState>, on_close: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    let detail_text = move || modal.with(|m| m.detail().map(|d| d.to_pretty_string()));

    view! {
        <Show when=move || modal.with(ModalState::is_open)>
            <div
                class="modal-backdrop"
                on:click={
                    let on_close = on_close.clone();
                    move |_| on_close(())
                }
            >
                <div class="modal" on:click=|ev| ev.stop_propagation()>
                    <div class="modal-header">
                        <h2>"Product JSON"</h2>
                        <button
                            class="btn btn-small btn-tertiary"
                            on:click={
                                let on_close = on_close.clone();
                                move |_| on_close(())
                            }
                        >
                            "Close"
                        </button>
                    </div>
                    {move || match detail_text() {
                        Some(text) => view! { <pre class="product-json">{text}</pre> }.into_any(),
                        None => view! { <Spinner label="Loading..." /> }.into_any(),
                    }}
                </div>
            </div>
        </Show>
    }
}
