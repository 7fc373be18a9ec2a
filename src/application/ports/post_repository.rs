use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::blog::post::{Post, PostSummary};

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(
        &self,
        author_id: Uuid,
        title: &str,
        subtitle: &str,
        body: &str,
        image_url: &str,
    ) -> anyhow::Result<Post>;
    /// All posts, newest first.
    async fn list_all(&self) -> anyhow::Result<Vec<PostSummary>>;
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Post>>;
    async fn find_id_by_title(&self, title: &str) -> anyhow::Result<Option<Uuid>>;
    async fn update(
        &self,
        id: Uuid,
        title: &str,
        subtitle: &str,
        body: &str,
        image_url: &str,
    ) -> anyhow::Result<bool>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
