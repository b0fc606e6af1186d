//! メインアプリケーションコンポーネント

use image_search_common::{close_detail, open_detail, submit_search, StoreCell};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::File;
use crate::api::FetchClient;
use crate::components::{
    detail_modal::DetailModal,
    header::Header,
    result_grid::ResultGrid,
    search_button::SearchButton,
    upload_area::UploadArea,
};
use crate::config;
use crate::store::{AppStore, ObjectUrl};

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let store = AppStore::new();
    let api = FetchClient::new(config::endpoints());

    // 表示用の派生値（変化したときだけ再描画）
    let preview_url = Memo::new(move |_| store.with(|s| s.preview_url().map(str::to_string)));
    let is_searching = Memo::new(move |_| store.with(|s| s.is_searching()));
    let results = Memo::new(move |_| store.with(|s| s.results().to_vec()));
    let modal = Memo::new(move |_| store.with(|s| s.modal().clone()));

    // ファイル選択ハンドラ
    let on_select = move |file: Option<File>| {
        let Some(file) = file else {
            store.update(|s| s.clear_selection());
            return;
        };
        match ObjectUrl::create(&file) {
            Ok(preview) => {
                store.update(|s| s.select_file(file, preview));
            }
            Err(e) => {
                gloo::console::error!("Failed to create preview:", e);
                store.update(|s| s.clear_selection());
            }
        }
    };

    // 検索ハンドラ
    let on_search = {
        let api = api.clone();
        move |_: ()| {
            let api = api.clone();
            spawn_local(async move {
                // 未選択・失敗はストアの通知で知らせる
                let _ = submit_search(&store, &api).await;
                show_notice(store);
            });
        }
    };

    // 結果選択ハンドラ
    let on_open = {
        let api = api.clone();
        move |item_id: Option<String>| {
            let api = api.clone();
            spawn_local(async move {
                open_detail(&store, &api, item_id).await;
            });
        }
    };

    let on_close = move |_: ()| close_detail(&store);

    // アンマウント時にプレビューURLを解放
    on_cleanup(move || {
        store.update(|s| s.clear_selection());
    });

    view! {
        <div class="container">
            <Header />

            <UploadArea preview_url=preview_url on_select=on_select />

            <SearchButton is_searching=is_searching on_search=on_search />

            <ResultGrid
                results=results
                endpoints=api.endpoints().clone()
                on_open=on_open
            />

            <DetailModal modal=modal on_close=on_close />
        </div>
    }
}

/// 保留中の通知をダイアログで表示
fn show_notice(store: AppStore) {
    if let Some(notice) = store.update(|s| s.take_notice()).flatten() {
        gloo::dialogs::alert(&notice.message);
    }
}
