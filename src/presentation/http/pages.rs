use axum::{
    Form, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use tracing::error;

use crate::application::use_cases::contact::send_contact_message::{
    ContactMessage, SendContactMessage,
};
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::is_valid_email;
use crate::presentation::http::flash::{self, Level};
use crate::presentation::http::session;
use crate::presentation::views;

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/about", get(about))
        .route("/contact", get(contact_form).post(contact))
        .with_state(ctx)
}

#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub message: String,
}

pub async fn about(State(ctx): State<AppContext>, headers: HeaderMap) -> Response {
    let user = session::current_user(&ctx, &headers).await;
    let fl = flash::take(&headers);
    let mut out = HeaderMap::new();
    if fl.is_some() {
        flash::clear(&mut out);
    }
    (out, Html(views::about_page(user.as_ref(), fl.as_ref()))).into_response()
}

pub async fn contact_form(State(ctx): State<AppContext>, headers: HeaderMap) -> Response {
    let user = session::current_user(&ctx, &headers).await;
    let fl = flash::take(&headers);
    let mut out = HeaderMap::new();
    if fl.is_some() {
        flash::clear(&mut out);
    }
    (
        out,
        Html(views::contact_page(user.as_ref(), fl.as_ref(), false)),
    )
        .into_response()
}

pub async fn contact(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    Form(form): Form<ContactForm>,
) -> Result<Response, StatusCode> {
    let user = session::current_user(&ctx, &headers).await;

    let name = form.name.trim();
    let email = form.email.trim();
    let message = form.message.trim();
    if name.is_empty() || !is_valid_email(email) || message.is_empty() {
        let mut out = HeaderMap::new();
        flash::set(
            &mut out,
            Level::Error,
            "Please fill in your name, a valid email address and a message.",
        );
        return Ok((out, Redirect::to("/contact")).into_response());
    }

    let mailer = ctx.mailer();
    let uc = SendContactMessage {
        mailer: mailer.as_ref(),
    };
    let msg = ContactMessage {
        name: name.to_string(),
        email: email.to_string(),
        phone: form.phone.trim().to_string(),
        message: message.to_string(),
    };
    // Delivery problems are an operator concern, not the visitor's.
    if let Err(e) = uc.execute(&msg, &ctx.cfg.contact_recipient).await {
        error!(error = ?e, "contact_mail_send_failed");
    }

    Ok(Html(views::contact_page(user.as_ref(), None, true)).into_response())
}
