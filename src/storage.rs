use filefolio_core::{ClientError, SessionStorage};
use wasm_bindgen::JsValue;

/// `window.localStorage` behind the session storage trait.
pub struct BrowserStorage {
    inner: web_sys::Storage,
}

impl BrowserStorage {
    pub fn open() -> Result<Self, ClientError> {
        let window = web_sys::window().ok_or_else(|| ClientError::Storage("no window".into()))?;
        let inner = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| ClientError::Storage("localStorage is disabled".into()))?;
        Ok(Self { inner })
    }
}

fn js_error(err: JsValue) -> ClientError {
    ClientError::Storage(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        self.inner.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.inner.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        self.inner.remove_item(key).map_err(js_error)
    }
}
