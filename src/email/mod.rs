use anyhow::Context;
use axum::async_trait;
use tracing::{debug, info};

pub mod templates;

/// Outbound transactional email. Handlers await delivery and surface
/// failures as server errors; nothing is queued or retried.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_verification_email(&self, to: &str, code: &str) -> anyhow::Result<()>;
    async fn send_welcome_email(&self, to: &str, name: &str) -> anyhow::Result<()>;
    async fn send_password_reset_email(&self, to: &str, reset_url: &str) -> anyhow::Result<()>;
    async fn send_reset_success_email(&self, to: &str) -> anyhow::Result<()>;
}

/// Delivers through the Mailtrap send API.
#[derive(Clone)]
pub struct MailtrapMailer {
    client: reqwest::Client,
    api_url: String,
    api_token: String,
    sender_email: String,
    sender_name: String,
}

impl MailtrapMailer {
    pub fn new(api_url: &str, api_token: &str, sender_email: &str, sender_name: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
            sender_email: sender_email.to_string(),
            sender_name: sender_name.to_string(),
        }
    }

    async fn send(
        &self,
        to: &str,
        subject: &str,
        html: &str,
        category: &str,
    ) -> anyhow::Result<()> {
        let body = serde_json::json!({
            "from": { "email": self.sender_email, "name": self.sender_name },
            "to": [{ "email": to }],
            "subject": subject,
            "html": html,
            "category": category,
        });

        let response = self
            .client
            .post(format!("{}/api/send", self.api_url))
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await
            .context("mailtrap send request")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("mailtrap send failed: {status} {text}");
        }

        debug!(to = %to, subject = %subject, "email sent");
        Ok(())
    }
}

#[async_trait]
impl Mailer for MailtrapMailer {
    async fn send_verification_email(&self, to: &str, code: &str) -> anyhow::Result<()> {
        self.send(
            to,
            "Verify your email",
            &templates::verification_email(code),
            "Email Verification",
        )
        .await
    }

    async fn send_welcome_email(&self, to: &str, name: &str) -> anyhow::Result<()> {
        self.send(to, "Welcome!", &templates::welcome_email(name), "Welcome")
            .await
    }

    async fn send_password_reset_email(&self, to: &str, reset_url: &str) -> anyhow::Result<()> {
        self.send(
            to,
            "Reset your password",
            &templates::password_reset_email(reset_url),
            "Password Reset",
        )
        .await
    }

    async fn send_reset_success_email(&self, to: &str) -> anyhow::Result<()> {
        self.send(
            to,
            "Password reset successful",
            &templates::reset_success_email(),
            "Password Reset",
        )
        .await
    }
}

/// Local dev and test mailer: logs the message and succeeds.
#[derive(Clone, Debug)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_verification_email(&self, to: &str, code: &str) -> anyhow::Result<()> {
        info!(to = %to, code = %code, "verification email (log only)");
        Ok(())
    }

    async fn send_welcome_email(&self, to: &str, name: &str) -> anyhow::Result<()> {
        info!(to = %to, name = %name, "welcome email (log only)");
        Ok(())
    }

    async fn send_password_reset_email(&self, to: &str, reset_url: &str) -> anyhow::Result<()> {
        info!(to = %to, reset_url = %reset_url, "password reset email (log only)");
        Ok(())
    }

    async fn send_reset_success_email(&self, to: &str) -> anyhow::Result<()> {
        info!(to = %to, "reset success email (log only)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_mailer_always_succeeds() {
        let mailer = LogMailer;
        mailer
            .send_verification_email("ann@x.com", "123456")
            .await
            .expect("log mailer");
        mailer
            .send_reset_success_email("ann@x.com")
            .await
            .expect("log mailer");
    }
}
