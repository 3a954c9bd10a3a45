use crate::auth::{AuthError, AuthorizationRequest, Strategy, User};
use crate::config::GoogleConfig;
use crate::google_api::GoogleClient;
use oauth2::basic::BasicClient;
use oauth2::reqwest::async_http_client;
use oauth2::{AuthType, AuthorizationCode, CsrfToken, PkceCodeChallenge, PkceCodeVerifier, Scope, TokenResponse};

pub const GOOGLE: &str = "google";

/// OAuth2 authorization code flow against Google, followed by a user info lookup.
pub struct GoogleStrategy {
    oauth: BasicClient,
    scopes: Vec<String>,
    api: GoogleClient,
}

/// Creates the Google strategy from GoogleConfig.
impl TryFrom<&GoogleConfig> for GoogleStrategy {
    type Error = anyhow::Error;

    fn try_from(config: &GoogleConfig) -> Result<Self, Self::Error> {
        let oauth = BasicClient::new(
            oauth2::ClientId::new(config.client_id.clone()),
            Some(oauth2::ClientSecret::new(config.client_secret.clone())),
            oauth2::AuthUrl::new(config.auth_url.clone())?,
            Some(oauth2::TokenUrl::new(config.token_url.clone())?),
        )
            .set_redirect_uri(oauth2::RedirectUrl::new(config.callback_url.clone())?)
            .set_auth_type(AuthType::RequestBody);

        Ok(GoogleStrategy {
            oauth,
            scopes: config.scopes.clone(),
            api: GoogleClient::new(&config.userinfo_url),
        })
    }
}

#[rocket::async_trait]
impl Strategy for GoogleStrategy {
    fn authorization_request(&self) -> AuthorizationRequest {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (url, csrf_token) = self.oauth.authorize_url(CsrfToken::new_random)
            .add_scopes(self.scopes.iter().cloned().map(Scope::new))
            .set_pkce_challenge(pkce_challenge)
            .url();

        AuthorizationRequest { url, csrf_token, pkce_verifier }
    }

    async fn exchange(&self, code: AuthorizationCode, pkce_verifier: PkceCodeVerifier) -> Result<User, AuthError> {
        let token = self.oauth
            .exchange_code(code)
            .set_pkce_verifier(pkce_verifier)
            .request_async(async_http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let info = self.api.get_user(token.access_token().secret()).await?;
        debug!("Google user info: {:?}", info);

        Ok(User::from(info))
    }
}
