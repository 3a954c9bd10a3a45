use anyhow::{anyhow, bail, Context};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rocket::figment::providers::Env;
use rocket::figment::{Figment, Profile};
use serde_derive::Deserialize;
use sha2::{Digest, Sha512};

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";
pub const GOOGLE_SCOPES: [&str; 3] = ["openid", "email", "profile"];

/// Rocket's figment extended with the raw `AUTH_SECRET` and `GOOGLE_*`
/// environment variables.
pub fn figment() -> Figment {
    rocket::Config::figment()
        .merge(Env::raw().only(&["AUTH_SECRET"]).map(|key| key.as_str().to_ascii_lowercase().into()))
        .merge(Env::prefixed("GOOGLE_").map(|key| format!("google.{}", key.as_str().to_ascii_lowercase()).into()))
}

/// Configuration for the Google OAuth2 strategy. Can be parsed from Figment.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub callback_url: String,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_userinfo_url")]
    pub userinfo_url: String,
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
}

fn default_auth_url() -> String {
    GOOGLE_AUTH_URL.to_string()
}

fn default_token_url() -> String {
    GOOGLE_TOKEN_URL.to_string()
}

fn default_userinfo_url() -> String {
    GOOGLE_USERINFO_URL.to_string()
}

fn default_scopes() -> Vec<String> {
    GOOGLE_SCOPES.iter().map(|scope| scope.to_string()).collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub auth_secret: String,
    pub google: GoogleConfig,
    #[serde(default)]
    pub secure_cookies: Option<bool>,
}

impl AuthConfig {
    /// Extracts and validates the configuration. Every credential must be present and non-empty.
    pub fn from_figment(figment: &Figment) -> Result<AuthConfig, anyhow::Error> {
        let config: AuthConfig = figment
            .extract()
            .map_err(|e| anyhow!("{e}"))
            .context("Cannot parse authentication config!")?;

        let required = [
            ("AUTH_SECRET", &config.auth_secret),
            ("GOOGLE_CLIENT_ID", &config.google.client_id),
            ("GOOGLE_CLIENT_SECRET", &config.google.client_secret),
            ("GOOGLE_CALLBACK_URL", &config.google.callback_url),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                bail!("{name} is required");
            }
        }

        Ok(config)
    }

    /// Cookies are only marked `Secure` in the release profile unless overridden.
    pub fn secure_cookies(&self, profile: &Profile) -> bool {
        self.secure_cookies
            .unwrap_or(*profile == rocket::Config::RELEASE_PROFILE)
    }

    /// Rocket's 512-bit `secret_key`, derived from `AUTH_SECRET` so secrets of any length work.
    pub fn secret_key(&self) -> String {
        STANDARD.encode(Sha512::digest(self.auth_secret.as_bytes()))
    }
}
