use uuid::Uuid;

use crate::application::ports::post_repository::PostRepository;

pub struct DeletePost<'a, R: PostRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PostRepository + ?Sized> DeletePost<'a, R> {
    /// Comments on the post go with it via the FK cascade.
    pub async fn execute(&self, id: Uuid) -> anyhow::Result<bool> {
        self.repo.delete(id).await
    }
}
