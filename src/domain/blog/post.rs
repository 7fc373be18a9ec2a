use uuid::Uuid;

/// A published post, joined with its author's display name.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub image_url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// The index listing shape; omits the body.
#[derive(Debug, Clone)]
pub struct PostSummary {
    pub id: Uuid,
    pub author_name: String,
    pub title: String,
    pub subtitle: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
