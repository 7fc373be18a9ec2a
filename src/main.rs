use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use pressmark::application::ports::mailer::Mailer;
use pressmark::bootstrap::app_context::{AppContext, AppServices};
use pressmark::bootstrap::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "pressmark=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting Pressmark");

    // Database
    let pool = pressmark::infrastructure::db::connect_pool(&cfg.database_url).await?;
    pressmark::infrastructure::db::migrate(&pool).await?;

    let user_repo = Arc::new(
        pressmark::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository::new(
            pool.clone(),
        ),
    );
    let post_repo = Arc::new(
        pressmark::infrastructure::db::repositories::post_repository_sqlx::SqlxPostRepository::new(
            pool.clone(),
        ),
    );
    let comment_repo = Arc::new(
        pressmark::infrastructure::db::repositories::comment_repository_sqlx::SqlxCommentRepository::new(
            pool.clone(),
        ),
    );

    let mailer: Arc<dyn Mailer> = match cfg.mail_relay_url.as_deref() {
        Some(url) => Arc::new(pressmark::infrastructure::mail::ReqwestMailer::new(
            url,
            &cfg.mail_relay_token,
            &cfg.mail_sender,
            cfg.mail_timeout_secs,
        )?),
        None => {
            tracing::warn!("mail_relay_not_configured_contact_sends_will_fail");
            Arc::new(pressmark::infrastructure::mail::DisabledMailer)
        }
    };

    let services = AppServices::new(user_repo, post_repo, comment_repo, mailer);
    let ctx = AppContext::new(cfg.clone(), services);

    let app = Router::new()
        .merge(pressmark::presentation::http::posts::routes(ctx.clone()))
        .merge(pressmark::presentation::http::auth::routes(ctx.clone()))
        .merge(pressmark::presentation::http::pages::routes(ctx.clone()))
        .merge(pressmark::presentation::http::health::routes(pool.clone()))
        .nest_service("/static", ServeDir::new(&cfg.static_dir))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.app_port));
    info!(%addr, "HTTP listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
