use crate::application::ports::post_repository::PostRepository;
use crate::domain::blog::post::PostSummary;

pub struct ListPosts<'a, R: PostRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PostRepository + ?Sized> ListPosts<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<PostSummary>> {
        self.repo.list_all().await
    }
}
