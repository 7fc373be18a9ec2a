use std::sync::Arc;

use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::mailer::Mailer;
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    mailer: Arc<dyn Mailer>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        post_repo: Arc<dyn PostRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            user_repo,
            post_repo,
            comment_repo,
            mailer,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn post_repo(&self) -> Arc<dyn PostRepository> {
        self.services.post_repo.clone()
    }

    pub fn comment_repo(&self) -> Arc<dyn CommentRepository> {
        self.services.comment_repo.clone()
    }

    pub fn mailer(&self) -> Arc<dyn Mailer> {
        self.services.mailer.clone()
    }
}
