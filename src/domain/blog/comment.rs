use uuid::Uuid;

/// A comment on a post, joined with author name and email.
/// The email is only used server-side to derive the avatar URL.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_email: String,
    pub body: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
