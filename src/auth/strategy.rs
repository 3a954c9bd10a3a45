use crate::auth::{AuthError, User};
use oauth2::url::Url;
use oauth2::{AuthorizationCode, CsrfToken, PkceCodeVerifier};

/// Where to send the browser to begin a flow, together with the secrets
/// that have to survive until the provider calls back.
#[derive(Debug)]
pub struct AuthorizationRequest {
    pub url: Url,
    pub csrf_token: CsrfToken,
    pub pkce_verifier: PkceCodeVerifier,
}

/// A pluggable authentication method with a begin/complete contract.
#[rocket::async_trait]
pub trait Strategy: Send + Sync {
    /// Builds the provider authorization URL with a fresh csrf token and pkce challenge.
    fn authorization_request(&self) -> AuthorizationRequest;

    /// Exchanges the authorization code and resolves the provider's user.
    async fn exchange(&self, code: AuthorizationCode, pkce_verifier: PkceCodeVerifier) -> Result<User, AuthError>;
}
