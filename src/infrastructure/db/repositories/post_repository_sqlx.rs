use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::post_repository::PostRepository;
use crate::domain::blog::post::{Post, PostSummary};
use crate::infrastructure::db::PgPool;

pub struct SqlxPostRepository {
    pub pool: PgPool,
}

impl SqlxPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn post_from_row(r: &sqlx::postgres::PgRow) -> Post {
    Post {
        id: r.get("id"),
        author_id: r.get("author_id"),
        author_name: r.get("author_name"),
        title: r.get("title"),
        subtitle: r.get("subtitle"),
        body: r.get("body"),
        image_url: r.get("image_url"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepository {
    async fn create(
        &self,
        author_id: Uuid,
        title: &str,
        subtitle: &str,
        body: &str,
        image_url: &str,
    ) -> anyhow::Result<Post> {
        let row = sqlx::query(
            r#"WITH inserted AS (
                 INSERT INTO posts (author_id, title, subtitle, body, image_url)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING id, author_id, title, subtitle, body, image_url, created_at
               )
               SELECT i.id, i.author_id, u.name AS author_name, i.title, i.subtitle,
                      i.body, i.image_url, i.created_at
               FROM inserted i JOIN users u ON u.id = i.author_id"#,
        )
        .bind(author_id)
        .bind(title)
        .bind(subtitle)
        .bind(body)
        .bind(image_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(post_from_row(&row))
    }

    async fn list_all(&self) -> anyhow::Result<Vec<PostSummary>> {
        let rows = sqlx::query(
            r#"SELECT p.id, u.name AS author_name, p.title, p.subtitle, p.created_at
               FROM posts p JOIN users u ON u.id = p.author_id
               ORDER BY p.created_at DESC, p.id DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .iter()
            .map(|r| PostSummary {
                id: r.get("id"),
                author_name: r.get("author_name"),
                title: r.get("title"),
                subtitle: r.get("subtitle"),
                created_at: r.get("created_at"),
            })
            .collect())
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Post>> {
        let row = sqlx::query(
            r#"SELECT p.id, p.author_id, u.name AS author_name, p.title, p.subtitle,
                      p.body, p.image_url, p.created_at
               FROM posts p JOIN users u ON u.id = p.author_id
               WHERE p.id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| post_from_row(&r)))
    }

    async fn find_id_by_title(&self, title: &str) -> anyhow::Result<Option<Uuid>> {
        let id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM posts WHERE title = $1")
            .bind(title)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    async fn update(
        &self,
        id: Uuid,
        title: &str,
        subtitle: &str,
        body: &str,
        image_url: &str,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"UPDATE posts SET title = $2, subtitle = $3, body = $4, image_url = $5
               WHERE id = $1"#,
        )
        .bind(id)
        .bind(title)
        .bind(subtitle)
        .bind(body)
        .bind(image_url)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
