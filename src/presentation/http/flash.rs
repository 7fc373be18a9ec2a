use axum::http::{HeaderMap, HeaderValue, header};

use crate::presentation::http::session::get_cookie;

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Error => "error",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "info" => Some(Level::Info),
            "error" => Some(Level::Error),
            _ => None,
        }
    }
}

/// One-shot message carried across a redirect in a short-lived cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

pub fn set(headers: &mut HeaderMap, level: Level, message: &str) {
    let value = format!(
        "{}={}:{}; Path=/; Max-Age=60; SameSite=Lax",
        FLASH_COOKIE,
        level.as_str(),
        urlencoding::encode(message)
    );
    if let Ok(v) = HeaderValue::from_str(&value) {
        headers.append(header::SET_COOKIE, v);
    }
}

pub fn take(request_headers: &HeaderMap) -> Option<Flash> {
    let raw = request_headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())?;
    let value = get_cookie(raw, FLASH_COOKIE)?;
    parse_value(&value)
}

pub fn clear(headers: &mut HeaderMap) {
    headers.append(
        header::SET_COOKIE,
        HeaderValue::from_static("flash=; Path=/; Max-Age=0; SameSite=Lax"),
    );
}

fn parse_value(value: &str) -> Option<Flash> {
    let (level, rest) = value.split_once(':')?;
    let message = urlencoding::decode(rest).ok()?.into_owned();
    Some(Flash {
        level: Level::parse(level)?,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_take_roundtrip() {
        let mut out = HeaderMap::new();
        set(&mut out, Level::Error, "Password incorrect, please try again.");
        let cookie = out
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .to_string();
        // Replay the Set-Cookie value as a request Cookie header
        let pair = cookie.split(';').next().unwrap();
        let mut req = HeaderMap::new();
        req.insert(header::COOKIE, HeaderValue::from_str(pair).unwrap());

        let flash = take(&req).unwrap();
        assert_eq!(flash.level, Level::Error);
        assert_eq!(flash.message, "Password incorrect, please try again.");
    }

    #[test]
    fn take_ignores_garbage() {
        let mut req = HeaderMap::new();
        req.insert(header::COOKIE, HeaderValue::from_static("flash=nolevel"));
        assert_eq!(take(&req), None);
        req.insert(header::COOKIE, HeaderValue::from_static("flash=bogus:msg"));
        assert_eq!(take(&req), None);
    }

    #[test]
    fn clear_expires_the_cookie() {
        let mut out = HeaderMap::new();
        clear(&mut out);
        let cookie = out.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.contains("Max-Age=0"));
    }
}
