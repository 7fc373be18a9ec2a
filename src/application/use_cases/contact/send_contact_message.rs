use crate::application::ports::mailer::{Mailer, OutboundEmail};

pub struct SendContactMessage<'a, M: Mailer + ?Sized> {
    pub mailer: &'a M,
}

#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl<'a, M: Mailer + ?Sized> SendContactMessage<'a, M> {
    pub async fn execute(&self, msg: &ContactMessage, recipient: &str) -> anyhow::Result<()> {
        let mail = OutboundEmail {
            to: recipient.to_string(),
            reply_to: Some(msg.email.clone()),
            subject: "New Message".to_string(),
            text_body: format!(
                "Name: {}\nEmail: {}\nPhone: {}\nMessage: {}",
                msg.name, msg.email, msg.phone, msg.message
            ),
        };
        self.mailer.send(&mail).await
    }
}
