use uuid::Uuid;

use crate::application::ports::comment_repository::CommentRepository;

pub struct AddComment<'a, R: CommentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CommentRepository + ?Sized> AddComment<'a, R> {
    pub async fn execute(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        body: &str,
    ) -> anyhow::Result<Uuid> {
        self.repo.create(post_id, author_id, body).await
    }
}
