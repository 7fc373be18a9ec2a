use uuid::Uuid;

use crate::application::ports::comment_repository::CommentRepository;
use crate::domain::blog::comment::Comment;

pub struct ListComments<'a, R: CommentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CommentRepository + ?Sized> ListComments<'a, R> {
    pub async fn execute(&self, post_id: Uuid) -> anyhow::Result<Vec<Comment>> {
        self.repo.list_for_post(post_id).await
    }
}
