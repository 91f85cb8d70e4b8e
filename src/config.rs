use serde::Deserialize;
use std::path::PathBuf;

/// Default Finkok endpoint for CFDI status queries.
pub const DEFAULT_FINKOK_API_URL: &str = "https://api.finkok.com/v3/cfdi33/status";

const PLACEHOLDER_USERNAME: &str = "tu_usuario_finkok";
const PLACEHOLDER_PASSWORD: &str = "tu_password_finkok";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub debug: bool,
    pub finkok_api_url: String,
    pub finkok_username: String,
    pub finkok_password: String,
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            debug: std::env::var("DEBUG")
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(true),
            finkok_api_url: validate_api_url(
                std::env::var("FINKOK_API_URL")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_FINKOK_API_URL.to_string()),
            )?,
            finkok_username: std::env::var("FINKOK_USERNAME")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| PLACEHOLDER_USERNAME.to_string()),
            finkok_password: std::env::var("FINKOK_PASSWORD")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| PLACEHOLDER_PASSWORD.to_string()),
            cert_path: std::env::var("CERT_PATH")
                .unwrap_or_else(|_| "certificados/cert.cer".to_string())
                .into(),
            key_path: std::env::var("KEY_PATH")
                .unwrap_or_else(|_| "certificados/key.key".to_string())
                .into(),
        };

        Ok(config)
    }

    /// Logs the loaded configuration without sensitive values.
    ///
    /// Called after the subscriber is installed, since the log filter itself
    /// depends on `debug`.
    pub fn log_summary(&self) {
        tracing::info!("Configuration loaded successfully");
        tracing::info!("Debug mode: {}", self.debug);
        tracing::debug!("Finkok API URL: {}", self.finkok_api_url);
        tracing::debug!("Certificate path: {}", self.cert_path.display());
        tracing::debug!("Private key path: {}", self.key_path.display());
        tracing::debug!("Server Port: {}", self.port);

        if self.uses_placeholder_credentials() {
            tracing::warn!(
                "FINKOK_USERNAME/FINKOK_PASSWORD not set, using placeholder credentials"
            );
        }
    }

    pub fn uses_placeholder_credentials(&self) -> bool {
        self.finkok_username == PLACEHOLDER_USERNAME || self.finkok_password == PLACEHOLDER_PASSWORD
    }
}

fn validate_api_url(raw: String) -> anyhow::Result<String> {
    let parsed = url::Url::parse(&raw)
        .map_err(|e| anyhow::anyhow!("FINKOK_API_URL is not a valid URL: {}", e))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        anyhow::bail!("FINKOK_API_URL must start with http:// or https://");
    }
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_url_is_valid() {
        assert!(validate_api_url(DEFAULT_FINKOK_API_URL.to_string()).is_ok());
    }

    #[test]
    fn test_api_url_rejects_other_schemes() {
        assert!(validate_api_url("ftp://api.finkok.com/status".to_string()).is_err());
        assert!(validate_api_url("not a url".to_string()).is_err());
    }

    #[test]
    fn test_placeholder_detection() {
        let config = Config {
            port: 5000,
            debug: false,
            finkok_api_url: DEFAULT_FINKOK_API_URL.to_string(),
            finkok_username: PLACEHOLDER_USERNAME.to_string(),
            finkok_password: "real_password".to_string(),
            cert_path: "certificados/cert.cer".into(),
            key_path: "certificados/key.key".into(),
        };
        assert!(config.uses_placeholder_credentials());

        let config = Config {
            finkok_username: "real_user".to_string(),
            ..config
        };
        assert!(!config.uses_placeholder_credentials());
    }
}
