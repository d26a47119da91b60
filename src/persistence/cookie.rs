//! Cookie-backed storage
//!
//! `document.cookie` holds `name=value` pairs separated by `; `. Values are
//! written with an `expires` attribute so the high score outlives the tab.

#[cfg(target_arch = "wasm32")]
use super::{KvStore, StorageError};

/// Find the raw value of cookie `name` in a `document.cookie` string
pub fn parse_cookie<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim_start().split_once('=')?;
        (key == name).then_some(value)
    })
}

/// Read the leading decimal digits of a stored value (`"12abc"` is 12).
///
/// Returns `None` when the value does not start with a digit.
pub fn parse_leading_int(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

/// Build a cookie assignment string
pub fn format_cookie(name: &str, value: &str, expires_utc: Option<&str>) -> String {
    match expires_utc {
        Some(expires) => format!("{}={}; expires={}; path=/", name, value, expires),
        None => format!("{}={}; path=/", name, value),
    }
}

/// Store backed by `document.cookie` (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct CookieStore {
    document: web_sys::HtmlDocument,
}

#[cfg(target_arch = "wasm32")]
impl CookieStore {
    pub fn new() -> Result<Self, StorageError> {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { document })
    }
}

#[cfg(target_arch = "wasm32")]
impl KvStore for CookieStore {
    fn get(&self, key: &str) -> Result<Option<u64>, StorageError> {
        let cookies = self
            .document
            .cookie()
            .map_err(|_| StorageError::Unavailable)?;
        match parse_cookie(&cookies, key) {
            None => Ok(None),
            Some(raw) => parse_leading_int(raw)
                .map(Some)
                .ok_or_else(|| StorageError::Malformed {
                    key: key.to_string(),
                    value: raw.to_string(),
                }),
        }
    }

    fn set(&mut self, key: &str, value: u64, ttl_days: u32) -> Result<(), StorageError> {
        let expires = (ttl_days > 0).then(|| {
            let ttl_ms = ttl_days as f64 * 24.0 * 60.0 * 60.0 * 1000.0;
            let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(
                js_sys::Date::now() + ttl_ms,
            ));
            String::from(date.to_utc_string())
        });
        let cookie = format_cookie(key, &value.to_string(), expires.as_deref());
        self.document
            .set_cookie(&cookie)
            .map_err(|_| StorageError::WriteRejected {
                key: key.to_string(),
            })
    }
}
