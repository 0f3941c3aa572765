#[cfg(test)]
use std::sync::{Arc, Mutex};

/// localStorage key of the bearer token. The only durable client state.
pub(crate) const TOKEN_KEY: &str = "token";

/// Where the access token lives between requests.
///
/// The API client reads it on every request; only the bootstrap flow writes it
/// and only the unauthorized handler clears it.
pub(crate) trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn clear(&self);
}

/// Browser `localStorage` backed store.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocalTokenStore;

impl LocalTokenStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl TokenStore for LocalTokenStore {
    fn get(&self) -> Option<String> {
        Self::storage()
            .and_then(|s| s.get_item(TOKEN_KEY).ok().flatten())
            .filter(|t| !t.trim().is_empty())
    }

    fn set(&self, token: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(TOKEN_KEY, token).is_err() {
                log::warn!("failed to persist access token");
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            if storage.remove_item(TOKEN_KEY).is_err() {
                log::warn!("failed to clear access token");
            }
        }
    }
}

/// In-memory store. Clones share the same slot.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub(crate) struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

#[cfg(test)]
impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        store.set(token);
        store
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    fn set(&self, token: &str) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}


// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_local_store_roundtrip_token() {
        let store = LocalTokenStore;
        store.clear();
        assert!(store.get().is_none());

        store.set("t1");
        assert_eq!(store.get().as_deref(), Some("t1"));

        store.clear();
        assert!(store.get().is_none());
    }

    #[wasm_bindgen_test]
    fn test_local_store_clear_without_token() {
        let store = LocalTokenStore;
        store.clear();
        store.clear();
        assert!(store.get().is_none());

        store.set("t2");
        store.clear();
        assert!(store.get().is_none());
    }
}
