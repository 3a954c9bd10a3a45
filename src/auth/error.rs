use thiserror::Error;

/// Failures of the OAuth2 flow. These never reach the browser: the
/// authenticator logs them and redirects to the failure route.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("unknown strategy `{0}`")]
    UnknownStrategy(String),

    #[error("provider denied authorization: {0}")]
    ProviderDenied(String),

    #[error("no pending authorization")]
    MissingPendingAuthorization,

    #[error("pending authorization belongs to strategy `{0}`")]
    StrategyMismatch(String),

    #[error("csrf state mismatch")]
    StateMismatch,

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("could not fetch user info: {0}")]
    UserInfo(#[from] reqwest::Error),

    #[error("could not encode session: {0}")]
    Session(#[from] serde_json::Error),
}
