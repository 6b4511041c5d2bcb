//! Theme persistence in the browser's localStorage
//!
//! Storage access is best effort: a missing or blocked localStorage reads as
//! "no preference" and writes are dropped.

use leptos::web_sys;

use crate::core::theme::{THEME_STORAGE_KEY, ThemeStorage};

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageTheme;

impl LocalStorageTheme {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl ThemeStorage for LocalStorageTheme {
    fn load(&self) -> Option<String> {
        Self::storage()?.get_item(THEME_STORAGE_KEY).ok().flatten()
    }

    fn save(&mut self, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(THEME_STORAGE_KEY, value);
        }
    }
}
