use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub text_body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutboundEmail) -> anyhow::Result<()>;
}
