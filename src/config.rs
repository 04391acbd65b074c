use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub session_ttl_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// Mailtrap API token; when absent outbound mail is logged instead of sent.
    pub api_token: Option<String>,
    pub api_url: String,
    pub sender_email: String,
    pub sender_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    /// Frontend base URL, used to build password-reset links.
    pub client_url: String,
    pub jwt: JwtConfig,
    pub mail: MailConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let client_url =
            std::env::var("CLIENT_URL").unwrap_or_else(|_| "http://localhost:5173".into());
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            session_ttl_days: std::env::var("SESSION_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(7),
        };
        let mail = MailConfig {
            api_token: std::env::var("MAILTRAP_TOKEN").ok(),
            api_url: std::env::var("MAILTRAP_API_URL")
                .unwrap_or_else(|_| "https://send.api.mailtrap.io".into()),
            sender_email: std::env::var("MAIL_SENDER_EMAIL")
                .unwrap_or_else(|_| "hello@example.com".into()),
            sender_name: std::env::var("MAIL_SENDER_NAME").unwrap_or_else(|_| "Auth App".into()),
        };
        Ok(Self {
            database_url,
            client_url,
            jwt,
            mail,
        })
    }
}
