use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::blog::comment::Comment;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, post_id: Uuid, author_id: Uuid, body: &str) -> anyhow::Result<Uuid>;
    /// Comments for a post, oldest first.
    async fn list_for_post(&self, post_id: Uuid) -> anyhow::Result<Vec<Comment>>;
}
