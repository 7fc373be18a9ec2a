use axum::http::HeaderMap;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::user_repository::UserRow;
use crate::application::use_cases::auth::me::GetMe;
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub fn issue_token(cfg: &Config, user_id: Uuid) -> anyhow::Result<String> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + (cfg.session_expires_secs as usize),
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.session_secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn validate_token(cfg: &Config, token: &str) -> Option<Uuid> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.session_secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;
    Uuid::parse_str(&data.claims.sub).ok()
}

pub fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    for part in cookie_header.split(';') {
        let kv = part.trim();
        if let Some((k, v)) = kv.split_once('=') {
            if k.trim() == name {
                return Some(v.trim().to_string());
            }
        }
    }
    None
}

/// Whether session cookies should carry the Secure attribute.
pub fn cookie_secure(cfg: &Config) -> bool {
    cfg.site_url
        .as_deref()
        .map(|u| u.starts_with("https://"))
        .unwrap_or(false)
}

// Note: SameSite=Lax for a same-site server-rendered app.
pub fn build_session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "{}={}; HttpOnly{}; Path=/; Max-Age={}; SameSite=Lax",
        SESSION_COOKIE,
        token,
        secure_attr,
        max_age_secs.max(0)
    )
}

pub fn clear_session_cookie(secure: bool) -> String {
    build_session_cookie("", 0, secure)
}

pub fn session_user_id(cfg: &Config, headers: &HeaderMap) -> Option<Uuid> {
    let cookie_hdr = headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())?;
    let token = get_cookie(cookie_hdr, SESSION_COOKIE)?;
    validate_token(cfg, &token)
}

/// Resolves the signed-in user, if any. Invalid or expired sessions read
/// as anonymous rather than erroring.
pub async fn current_user(ctx: &AppContext, headers: &HeaderMap) -> Option<UserRow> {
    let id = session_user_id(&ctx.cfg, headers)?;
    let repo = ctx.user_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    uc.execute(id).await.ok().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            app_port: 0,
            database_url: String::new(),
            site_url: None,
            session_secret: "unit-test-secret".into(),
            session_expires_secs: 3600,
            static_dir: String::new(),
            mail_relay_url: None,
            mail_relay_token: String::new(),
            mail_sender: String::new(),
            mail_timeout_secs: 1,
            contact_recipient: String::new(),
            is_production: false,
        }
    }

    #[test]
    fn token_roundtrip() {
        let cfg = test_config();
        let id = Uuid::new_v4();
        let token = issue_token(&cfg, id).unwrap();
        assert_eq!(validate_token(&cfg, &token), Some(id));
    }

    #[test]
    fn token_rejected_with_wrong_secret() {
        let cfg = test_config();
        let token = issue_token(&cfg, Uuid::new_v4()).unwrap();
        let mut other = test_config();
        other.session_secret = "a-different-secret".into();
        assert_eq!(validate_token(&other, &token), None);
    }

    #[test]
    fn parses_cookie_header() {
        let hdr = "a=1; session=tok; b=2";
        assert_eq!(get_cookie(hdr, "session").as_deref(), Some("tok"));
        assert_eq!(get_cookie(hdr, "missing"), None);
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = build_session_cookie("tok", 3600, true);
        assert!(cookie.starts_with("session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("Max-Age=3600"));

        let cookie = build_session_cookie("tok", -5, false);
        assert!(!cookie.contains("Secure"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
