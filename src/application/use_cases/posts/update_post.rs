use uuid::Uuid;

use crate::application::ports::post_repository::PostRepository;
use crate::application::use_cases::posts::create_post::NewPost;

pub struct UpdatePost<'a, R: PostRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, PartialEq, Eq)]
pub enum UpdatePostOutcome {
    Updated,
    TitleTaken,
    NotFound,
}

impl<'a, R: PostRepository + ?Sized> UpdatePost<'a, R> {
    pub async fn execute(&self, id: Uuid, post: &NewPost) -> anyhow::Result<UpdatePostOutcome> {
        // The title stays unique across other posts; keeping your own is fine.
        if let Some(other) = self.repo.find_id_by_title(&post.title).await? {
            if other != id {
                return Ok(UpdatePostOutcome::TitleTaken);
            }
        }
        let updated = self
            .repo
            .update(
                id,
                &post.title,
                &post.subtitle,
                &post.body,
                &post.image_url,
            )
            .await?;
        if updated {
            Ok(UpdatePostOutcome::Updated)
        } else {
            Ok(UpdatePostOutcome::NotFound)
        }
    }
}
