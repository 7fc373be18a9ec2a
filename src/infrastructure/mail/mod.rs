use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::application::ports::mailer::{Mailer, OutboundEmail};

/// Delivers mail by POSTing JSON to an HTTP mail-relay endpoint.
pub struct ReqwestMailer {
    client: reqwest::Client,
    relay_url: String,
    token: String,
    sender: String,
}

impl ReqwestMailer {
    pub fn new(
        relay_url: &str,
        token: &str,
        sender: &str,
        timeout_secs: u64,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            relay_url: relay_url.to_string(),
            token: token.to_string(),
            sender: sender.to_string(),
        })
    }
}

#[async_trait]
impl Mailer for ReqwestMailer {
    async fn send(&self, mail: &OutboundEmail) -> anyhow::Result<()> {
        let body = json!({
            "from": self.sender,
            "reply_to": mail.reply_to,
            "to": mail.to,
            "subject": mail.subject,
            "text_body": mail.text_body,
        });
        let mut req = self.client.post(&self.relay_url).json(&body);
        if !self.token.is_empty() {
            req = req.bearer_auth(&self.token);
        }
        let resp = req.send().await?;
        resp.error_for_status()?;
        Ok(())
    }
}

/// Stand-in when no relay is configured; every send fails and the caller
/// decides whether that is fatal.
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, _mail: &OutboundEmail) -> anyhow::Result<()> {
        anyhow::bail!("mail relay not configured (MAIL_RELAY_URL unset)")
    }
}
