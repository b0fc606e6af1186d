//! 画面状態の入れ物
//!
//! 共通ストアをLeptosのシグナルに載せる。`web_sys::File` はスレッド間で送れないのでLocalStorage。

use image_search_common::{PreviewHandle, SearchStore, StoreCell};
use leptos::prelude::*;
use wasm_bindgen::JsValue;
use web_sys::{File, Url};

pub type Store = SearchStore<File, ObjectUrl>;

/// 共通ストアを保持するシグナル
#[derive(Clone, Copy)]
pub struct AppStore(RwSignal<Store, LocalStorage>);

impl AppStore {
    pub fn new() -> Self {
        Self(RwSignal::new_local(Store::new()))
    }

    /// 追跡付きで参照する
    pub fn with<R>(&self, f: impl FnOnce(&Store) -> R) -> R {
        self.0.with(f)
    }
}

impl StoreCell for AppStore {
    type File = File;
    type Preview = ObjectUrl;

    fn update<R>(&self, f: impl FnOnce(&mut Store) -> R) -> Option<R> {
        self.0.try_update(f)
    }
}

/// `URL.createObjectURL` で作ったプレビューURL
///
/// Dropで `URL.revokeObjectURL` する。
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn create(file: &File) -> Result<Self, JsValue> {
        Url::create_object_url_with_blob(file).map(Self)
    }
}

impl PreviewHandle for ObjectUrl {
    fn url(&self) -> &str {
        &self.0
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        if let Err(e) = Url::revoke_object_url(&self.0) {
            gloo::console::warn!("revokeObjectURL failed:", e);
        }
    }
}
