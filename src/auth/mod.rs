mod authenticator;
mod error;
mod google;
mod strategy;
mod user;

pub use authenticator::{Authenticator, AuthRedirects, CallbackParams};
#[cfg(test)]
pub use authenticator::PENDING_COOKIE;
pub use error::AuthError;
pub use google::{GoogleStrategy, GOOGLE};
pub use strategy::{AuthorizationRequest, Strategy};

pub use user::{User, USER_KEY};
