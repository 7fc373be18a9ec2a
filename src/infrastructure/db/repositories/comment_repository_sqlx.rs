use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::comment_repository::CommentRepository;
use crate::domain::blog::comment::Comment;
use crate::infrastructure::db::PgPool;

pub struct SqlxCommentRepository {
    pub pool: PgPool,
}

impl SqlxCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn create(&self, post_id: Uuid, author_id: Uuid, body: &str) -> anyhow::Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"INSERT INTO comments (post_id, author_id, body) VALUES ($1, $2, $3)
               RETURNING id"#,
        )
        .bind(post_id)
        .bind(author_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn list_for_post(&self, post_id: Uuid) -> anyhow::Result<Vec<Comment>> {
        let rows = sqlx::query(
            r#"SELECT c.id, c.post_id, c.author_id, u.name AS author_name,
                      u.email AS author_email, c.body, c.created_at
               FROM comments c JOIN users u ON u.id = c.author_id
               WHERE c.post_id = $1
               ORDER BY c.created_at ASC, c.id ASC"#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .iter()
            .map(|r| Comment {
                id: r.get("id"),
                post_id: r.get("post_id"),
                author_id: r.get("author_id"),
                author_name: r.get("author_name"),
                author_email: r.get("author_email"),
                body: r.get("body"),
                created_at: r.get("created_at"),
            })
            .collect())
    }
}
