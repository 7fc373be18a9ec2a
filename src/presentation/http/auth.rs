use axum::{
    Form, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::error;

use crate::application::use_cases::auth::login::{
    Login as LoginUc, LoginOutcome, LoginRequest as LoginDto,
};
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterOutcome, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::flash::{self, Level};
use crate::presentation::http::session;
use crate::presentation::views;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"));

const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", get(register_form).post(register))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
        .with_state(ctx)
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub async fn register_form(State(ctx): State<AppContext>, headers: HeaderMap) -> Response {
    let user = session::current_user(&ctx, &headers).await;
    let fl = flash::take(&headers);
    let mut out = HeaderMap::new();
    if fl.is_some() {
        flash::clear(&mut out);
    }
    (out, Html(views::register_page(user.as_ref(), fl.as_ref()))).into_response()
}

pub async fn register(
    State(ctx): State<AppContext>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, StatusCode> {
    let name = form.name.trim();
    let email = form.email.trim();
    if name.is_empty() || !is_valid_email(email) {
        let mut out = HeaderMap::new();
        flash::set(&mut out, Level::Error, "Please enter your name and a valid email address.");
        return Ok((out, Redirect::to("/register")).into_response());
    }
    if form.password.len() < MIN_PASSWORD_LEN {
        let mut out = HeaderMap::new();
        flash::set(
            &mut out,
            Level::Error,
            "Passwords must be at least 8 characters long.",
        );
        return Ok((out, Redirect::to("/register")).into_response());
    }

    let repo = ctx.user_repo();
    let uc = RegisterUc {
        repo: repo.as_ref(),
    };
    let dto = RegisterDto {
        email: email.to_string(),
        name: name.to_string(),
        password: form.password.clone(),
    };
    let outcome = uc.execute(&dto).await.map_err(|e| {
        error!(error = ?e, "register_failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    match outcome {
        RegisterOutcome::EmailTaken => {
            let mut out = HeaderMap::new();
            flash::set(
                &mut out,
                Level::Error,
                "You've already signed up with that email, log in instead.",
            );
            Ok((out, Redirect::to("/login")).into_response())
        }
        RegisterOutcome::Created(user) => {
            // Log the new account in right away
            let token = session::issue_token(&ctx.cfg, user.id)
                .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
            let cookie = session::build_session_cookie(
                &token,
                ctx.cfg.session_expires_secs,
                session::cookie_secure(&ctx.cfg),
            );
            let mut out = HeaderMap::new();
            out.insert(
                axum::http::header::SET_COOKIE,
                axum::http::HeaderValue::from_str(&cookie)
                    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?,
            );
            Ok((out, Redirect::to("/")).into_response())
        }
    }
}

pub async fn login_form(State(ctx): State<AppContext>, headers: HeaderMap) -> Response {
    let user = session::current_user(&ctx, &headers).await;
    let fl = flash::take(&headers);
    let mut out = HeaderMap::new();
    if fl.is_some() {
        flash::clear(&mut out);
    }
    (out, Html(views::login_page(user.as_ref(), fl.as_ref()))).into_response()
}

pub async fn login(
    State(ctx): State<AppContext>,
    Form(form): Form<LoginForm>,
) -> Result<Response, StatusCode> {
    let repo = ctx.user_repo();
    let uc = LoginUc {
        repo: repo.as_ref(),
    };
    let dto = LoginDto {
        email: form.email.trim().to_string(),
        password: form.password.clone(),
    };
    let outcome = uc.execute(&dto).await.map_err(|e| {
        error!(error = ?e, "login_failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    match outcome {
        LoginOutcome::UnknownEmail => {
            let mut out = HeaderMap::new();
            flash::set(
                &mut out,
                Level::Error,
                "That email does not exist, please try again.",
            );
            Ok((out, Redirect::to("/login")).into_response())
        }
        LoginOutcome::WrongPassword => {
            let mut out = HeaderMap::new();
            flash::set(
                &mut out,
                Level::Error,
                "Password incorrect, please try again.",
            );
            Ok((out, Redirect::to("/login")).into_response())
        }
        LoginOutcome::Authenticated(user) => {
            let token = session::issue_token(&ctx.cfg, user.id)
                .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
            let cookie = session::build_session_cookie(
                &token,
                ctx.cfg.session_expires_secs,
                session::cookie_secure(&ctx.cfg),
            );
            let mut out = HeaderMap::new();
            out.insert(
                axum::http::header::SET_COOKIE,
                axum::http::HeaderValue::from_str(&cookie)
                    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?,
            );
            Ok((out, Redirect::to("/")).into_response())
        }
    }
}

pub async fn logout(State(ctx): State<AppContext>) -> Response {
    let cookie = session::clear_session_cookie(session::cookie_secure(&ctx.cfg));
    let mut out = HeaderMap::new();
    if let Ok(v) = axum::http::HeaderValue::from_str(&cookie) {
        out.insert(axum::http::header::SET_COOKIE, v);
    }
    (out, Redirect::to("/")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plausible_emails() {
        assert!(is_valid_email("reader@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.co.uk"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email("nodot@example"));
    }
}
