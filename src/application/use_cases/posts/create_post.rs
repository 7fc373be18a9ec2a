use uuid::Uuid;

use crate::application::ports::post_repository::PostRepository;
use crate::domain::blog::post::Post;

pub struct CreatePost<'a, R: PostRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub image_url: String,
}

#[derive(Debug)]
pub enum CreatePostOutcome {
    Created(Post),
    TitleTaken,
}

impl<'a, R: PostRepository + ?Sized> CreatePost<'a, R> {
    pub async fn execute(
        &self,
        author_id: Uuid,
        post: &NewPost,
    ) -> anyhow::Result<CreatePostOutcome> {
        if self.repo.find_id_by_title(&post.title).await?.is_some() {
            return Ok(CreatePostOutcome::TitleTaken);
        }
        let created = self
            .repo
            .create(
                author_id,
                &post.title,
                &post.subtitle,
                &post.body,
                &post.image_url,
            )
            .await?;
        Ok(CreatePostOutcome::Created(created))
    }
}
