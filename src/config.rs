use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub token_expiry_minutes: i64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let token_expiry_minutes = std::env::var("TOKEN_EXPIRY_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(60 * 24);
        Ok(Self {
            database_url,
            token_expiry_minutes,
        })
    }

    /// Advisory token lifetime, as reported to clients in `expires_in`.
    pub fn token_expiry_secs(&self) -> i64 {
        self.token_expiry_minutes * 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_converted_to_seconds() {
        let config = AppConfig {
            database_url: "postgres://localhost/test".into(),
            token_expiry_minutes: 60 * 24,
        };
        assert_eq!(config.token_expiry_secs(), 86_400);
    }
}
