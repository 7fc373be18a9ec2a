use axum::{
    Form, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::application::access::{self, Actor, Capability};
use crate::application::ports::user_repository::UserRow;
use crate::application::use_cases::comments::add_comment::AddComment;
use crate::application::use_cases::comments::list_comments::ListComments;
use crate::application::use_cases::posts::create_post::{CreatePost, CreatePostOutcome, NewPost};
use crate::application::use_cases::posts::delete_post::DeletePost;
use crate::application::use_cases::posts::get_post::GetPost;
use crate::application::use_cases::posts::list_posts::ListPosts;
use crate::application::use_cases::posts::update_post::{UpdatePost, UpdatePostOutcome};
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::flash::{self, Level};
use crate::presentation::http::session;
use crate::presentation::views;

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/post/:id", get(show_post).post(add_comment))
        .route("/new-post", get(new_post_form).post(create_post))
        .route("/edit-post/:id", get(edit_post_form).post(update_post))
        .route("/delete-post/:id", get(delete_post))
        .with_state(ctx)
}

#[derive(Debug, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub body: String,
}

fn actor_of(user: Option<&UserRow>) -> Actor {
    match user {
        Some(u) => Actor::User(u.id),
        None => Actor::Anonymous,
    }
}

async fn capability(ctx: &AppContext, user: Option<&UserRow>) -> Capability {
    let repo = ctx.user_repo();
    access::resolve(repo.as_ref(), &actor_of(user)).await
}

fn is_http_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

fn validated_post_form(form: &PostForm) -> Option<NewPost> {
    let title = form.title.trim();
    let subtitle = form.subtitle.trim();
    let image_url = form.image_url.trim();
    let body = form.body.trim();
    if title.is_empty() || subtitle.is_empty() || body.is_empty() || !is_http_url(image_url) {
        return None;
    }
    Some(NewPost {
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        body: body.to_string(),
        image_url: image_url.to_string(),
    })
}

pub async fn index(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    let user = session::current_user(&ctx, &headers).await;
    let cap = capability(&ctx, user.as_ref()).await;

    let repo = ctx.post_repo();
    let uc = ListPosts {
        repo: repo.as_ref(),
    };
    let posts = uc.execute().await.map_err(|e| {
        error!(error = ?e, "list_posts_failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let fl = flash::take(&headers);
    let mut out = HeaderMap::new();
    if fl.is_some() {
        flash::clear(&mut out);
    }
    Ok((
        out,
        Html(views::index_page(
            &posts,
            user.as_ref(),
            cap == Capability::Admin,
            fl.as_ref(),
        )),
    )
        .into_response())
}

pub async fn show_post(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    let user = session::current_user(&ctx, &headers).await;
    let cap = capability(&ctx, user.as_ref()).await;

    let posts = ctx.post_repo();
    let uc = GetPost {
        repo: posts.as_ref(),
    };
    let post = uc
        .execute(id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;

    let comments_repo = ctx.comment_repo();
    let uc = ListComments {
        repo: comments_repo.as_ref(),
    };
    let comments = uc
        .execute(id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let fl = flash::take(&headers);
    let mut out = HeaderMap::new();
    if fl.is_some() {
        flash::clear(&mut out);
    }
    Ok((
        out,
        Html(views::post_page(
            &post,
            &comments,
            user.as_ref(),
            cap == Capability::Admin,
            fl.as_ref(),
        )),
    )
        .into_response())
}

pub async fn add_comment(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Form(form): Form<CommentForm>,
) -> Result<Response, StatusCode> {
    let user = match session::current_user(&ctx, &headers).await {
        Some(u) => u,
        None => {
            let mut out = HeaderMap::new();
            flash::set(&mut out, Level::Error, "You must be logged in to comment.");
            return Ok((out, Redirect::to("/login")).into_response());
        }
    };

    let posts = ctx.post_repo();
    let uc = GetPost {
        repo: posts.as_ref(),
    };
    uc.execute(id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;

    let body = form.body.trim();
    let location = format!("/post/{}", id);
    if body.is_empty() {
        let mut out = HeaderMap::new();
        flash::set(&mut out, Level::Error, "Comments cannot be empty.");
        return Ok((out, Redirect::to(&location)).into_response());
    }

    let comments = ctx.comment_repo();
    let uc = AddComment {
        repo: comments.as_ref(),
    };
    uc.execute(id, user.id, body).await.map_err(|e| {
        error!(error = ?e, post_id = %id, "add_comment_failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Redirect::to(&location).into_response())
}

pub async fn new_post_form(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    let user = session::current_user(&ctx, &headers).await;
    if capability(&ctx, user.as_ref()).await < Capability::Admin {
        return Err(StatusCode::FORBIDDEN);
    }
    let fl = flash::take(&headers);
    let mut out = HeaderMap::new();
    if fl.is_some() {
        flash::clear(&mut out);
    }
    Ok((
        out,
        Html(views::post_form_page(None, user.as_ref(), fl.as_ref())),
    )
        .into_response())
}

pub async fn create_post(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    Form(form): Form<PostForm>,
) -> Result<Response, StatusCode> {
    let user = session::current_user(&ctx, &headers).await;
    if capability(&ctx, user.as_ref()).await < Capability::Admin {
        return Err(StatusCode::FORBIDDEN);
    }
    let author = user.ok_or(StatusCode::FORBIDDEN)?;

    let new_post = match validated_post_form(&form) {
        Some(p) => p,
        None => {
            let mut out = HeaderMap::new();
            flash::set(
                &mut out,
                Level::Error,
                "Every field is required, and the image URL must start with http:// or https://.",
            );
            return Ok((out, Redirect::to("/new-post")).into_response());
        }
    };

    let repo = ctx.post_repo();
    let uc = CreatePost {
        repo: repo.as_ref(),
    };
    match uc.execute(author.id, &new_post).await.map_err(|e| {
        error!(error = ?e, "create_post_failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })? {
        CreatePostOutcome::TitleTaken => {
            let mut out = HeaderMap::new();
            flash::set(
                &mut out,
                Level::Error,
                "A post with that title already exists.",
            );
            Ok((out, Redirect::to("/new-post")).into_response())
        }
        CreatePostOutcome::Created(_) => Ok(Redirect::to("/").into_response()),
    }
}

pub async fn edit_post_form(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    let user = session::current_user(&ctx, &headers).await;
    if capability(&ctx, user.as_ref()).await < Capability::Admin {
        return Err(StatusCode::FORBIDDEN);
    }

    let repo = ctx.post_repo();
    let uc = GetPost {
        repo: repo.as_ref(),
    };
    let post = uc
        .execute(id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;

    let fl = flash::take(&headers);
    let mut out = HeaderMap::new();
    if fl.is_some() {
        flash::clear(&mut out);
    }
    Ok((
        out,
        Html(views::post_form_page(
            Some(&post),
            user.as_ref(),
            fl.as_ref(),
        )),
    )
        .into_response())
}

pub async fn update_post(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Form(form): Form<PostForm>,
) -> Result<Response, StatusCode> {
    let user = session::current_user(&ctx, &headers).await;
    if capability(&ctx, user.as_ref()).await < Capability::Admin {
        return Err(StatusCode::FORBIDDEN);
    }

    let location = format!("/edit-post/{}", id);
    let edited = match validated_post_form(&form) {
        Some(p) => p,
        None => {
            let mut out = HeaderMap::new();
            flash::set(
                &mut out,
                Level::Error,
                "Every field is required, and the image URL must start with http:// or https://.",
            );
            return Ok((out, Redirect::to(&location)).into_response());
        }
    };

    let repo = ctx.post_repo();
    let uc = UpdatePost {
        repo: repo.as_ref(),
    };
    match uc.execute(id, &edited).await.map_err(|e| {
        error!(error = ?e, post_id = %id, "update_post_failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })? {
        UpdatePostOutcome::NotFound => Err(StatusCode::NOT_FOUND),
        UpdatePostOutcome::TitleTaken => {
            let mut out = HeaderMap::new();
            flash::set(
                &mut out,
                Level::Error,
                "A post with that title already exists.",
            );
            Ok((out, Redirect::to(&location)).into_response())
        }
        UpdatePostOutcome::Updated => Ok(Redirect::to(&format!("/post/{}", id)).into_response()),
    }
}

pub async fn delete_post(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    let user = session::current_user(&ctx, &headers).await;
    if capability(&ctx, user.as_ref()).await < Capability::Admin {
        return Err(StatusCode::FORBIDDEN);
    }

    let repo = ctx.post_repo();
    let uc = DeletePost {
        repo: repo.as_ref(),
    };
    let deleted = uc.execute(id).await.map_err(|e| {
        error!(error = ?e, post_id = %id, "delete_post_failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if !deleted {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Redirect::to("/").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_urls_must_be_http() {
        assert!(is_http_url("https://example.com/a.png"));
        assert!(is_http_url("http://example.com/a.png"));
        assert!(!is_http_url("ftp://example.com/a.png"));
        assert!(!is_http_url("javascript:alert(1)"));
        assert!(!is_http_url(""));
    }

    #[test]
    fn post_form_validation_trims_and_checks() {
        let form = PostForm {
            title: "  T  ".into(),
            subtitle: "S".into(),
            image_url: " https://example.com/i.jpg ".into(),
            body: "B".into(),
        };
        let p = validated_post_form(&form).unwrap();
        assert_eq!(p.title, "T");
        assert_eq!(p.image_url, "https://example.com/i.jpg");

        let bad = PostForm {
            title: "T".into(),
            subtitle: "".into(),
            image_url: "https://example.com/i.jpg".into(),
            body: "B".into(),
        };
        assert!(validated_post_form(&bad).is_none());
    }
}
