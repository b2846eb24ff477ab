//! LocalStorage 适配
//!
//! 会话值是纯字符串，所以用 `raw` 存取而不是 gloo 默认的 JSON 编码。

use gloo_storage::{LocalStorage, Storage};
use stockroom::storage::KeyValueStore;

#[derive(Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if LocalStorage::raw().set_item(key, value).is_err() {
            log::warn!("localStorage rejected write to {key}");
        }
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}
