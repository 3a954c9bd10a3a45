use std::collections::HashMap;

use crate::auth::{AuthError, Strategy, User, USER_KEY};
use crate::session::SessionStorage;
use oauth2::{AuthorizationCode, PkceCodeVerifier};
use rocket::http::uri::Origin;
use rocket::http::{Cookie, CookieJar, SameSite};
use rocket::response::Redirect;
use rocket::time::Duration;
use serde_derive::{Deserialize, Serialize};

pub const PENDING_COOKIE: &str = "_oauth2_state";
const PENDING_TIMEOUT: Duration = Duration::minutes(10);

/// Query parameters the provider appends when calling back.
#[derive(Debug, Default, FromForm)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Where `authenticate` sends the browser once the flow is over.
#[derive(Debug, Clone)]
pub struct AuthRedirects {
    pub success: Origin<'static>,
    pub failure: Origin<'static>,
}

/// Secrets of a started flow, kept in a short-lived private cookie.
#[derive(Debug, Serialize, Deserialize)]
struct PendingAuthorization {
    strategy: String,
    state: String,
    pkce_verifier: String,
}

/// Runs named strategies and keeps their result in the session.
pub struct Authenticator {
    storage: SessionStorage,
    strategies: HashMap<String, Box<dyn Strategy>>,
}

impl Authenticator {
    pub fn new(storage: SessionStorage) -> Authenticator {
        Authenticator {
            storage,
            strategies: HashMap::new(),
        }
    }

    /// Registers `strategy` under `name`.
    pub fn use_strategy<S: Strategy + 'static>(mut self, name: &str, strategy: S) -> Authenticator {
        self.strategies.insert(name.to_string(), Box::new(strategy));
        self
    }

    /// Begins the flow when no authorization code is present, completes it otherwise.
    /// Completing stores the user in the session and redirects to `redirects.success`;
    /// every failure redirects to `redirects.failure` and leaves the session untouched.
    pub async fn authenticate(
        &self,
        name: &str,
        cookies: &CookieJar<'_>,
        params: &CallbackParams,
        redirects: AuthRedirects,
    ) -> Redirect {
        let Some(strategy) = self.strategies.get(name) else {
            warn!("{}", AuthError::UnknownStrategy(name.to_string()));
            return Redirect::found(redirects.failure);
        };

        if params.code.is_none() && params.error.is_none() {
            return self.begin(name, strategy.as_ref(), cookies, redirects);
        }

        match self.complete(name, strategy.as_ref(), cookies, params).await {
            Ok(user) => {
                info!("[{}] Authenticated {}", name, user.email);
                Redirect::found(redirects.success)
            }
            Err(e) => {
                warn!("[{}] Authentication failed: {}", name, e);
                Redirect::found(redirects.failure)
            }
        }
    }

    fn begin(&self, name: &str, strategy: &dyn Strategy, cookies: &CookieJar<'_>, redirects: AuthRedirects) -> Redirect {
        let request = strategy.authorization_request();

        let pending = PendingAuthorization {
            strategy: name.to_string(),
            state: request.csrf_token.secret().clone(),
            pkce_verifier: request.pkce_verifier.secret().clone(),
        };
        let value = match serde_json::to_string(&pending) {
            Ok(value) => value,
            Err(e) => {
                warn!("[{}] Could not store pending authorization: {}", name, e);
                return Redirect::found(redirects.failure);
            }
        };
        cookies.add_private(
            Cookie::build((PENDING_COOKIE, value))
                .same_site(SameSite::Lax)
                .path("/")
                .http_only(true)
                .max_age(PENDING_TIMEOUT)
                .build());

        Redirect::found(request.url.to_string())
    }

    async fn complete(
        &self,
        name: &str,
        strategy: &dyn Strategy,
        cookies: &CookieJar<'_>,
        params: &CallbackParams,
    ) -> Result<User, AuthError> {
        let pending = take_pending(cookies);

        if let Some(error) = &params.error {
            return Err(AuthError::ProviderDenied(error.clone()));
        }

        let pending = pending.ok_or(AuthError::MissingPendingAuthorization)?;
        if pending.strategy != name {
            return Err(AuthError::StrategyMismatch(pending.strategy));
        }
        if params.state.as_deref() != Some(pending.state.as_str()) {
            return Err(AuthError::StateMismatch);
        }

        let code = params.code.clone().unwrap_or_default();
        let user = strategy
            .exchange(AuthorizationCode::new(code), PkceCodeVerifier::new(pending.pkce_verifier))
            .await?;

        let mut session = self.storage.read(cookies);
        session.set(USER_KEY, &user)?;
        self.storage.commit(cookies, &session)?;

        Ok(user)
    }

    /// The user of the current session, if any.
    pub fn peek_authenticated(&self, cookies: &CookieJar<'_>) -> Option<User> {
        self.storage.read(cookies).get(USER_KEY)
    }

    /// The user of the current session, or a redirect to `failure`.
    pub fn require_authenticated(&self, cookies: &CookieJar<'_>, failure: Origin<'static>) -> Result<User, Redirect> {
        self.peek_authenticated(cookies).ok_or_else(|| Redirect::found(failure))
    }

    /// Passes when nobody is signed in, redirects to `success` otherwise.
    pub fn require_unauthenticated(&self, cookies: &CookieJar<'_>, success: Origin<'static>) -> Result<(), Redirect> {
        match self.peek_authenticated(cookies) {
            Some(_) => Err(Redirect::found(success)),
            None => Ok(()),
        }
    }

    /// Destroys the session and redirects.
    pub fn logout(&self, cookies: &CookieJar<'_>, redirect_to: Origin<'static>) -> Redirect {
        self.storage.destroy(cookies);
        Redirect::found(redirect_to)
    }
}

/// Removes the pending authorization cookie, returning its content.
/// The cookie is single use whatever the outcome of the callback.
fn take_pending(cookies: &CookieJar<'_>) -> Option<PendingAuthorization> {
    let cookie = cookies.get_private(PENDING_COOKIE)?;
    cookies.remove_private(Cookie::build(PENDING_COOKIE).path("/"));
    serde_json::from_str(cookie.value()).ok()
}
