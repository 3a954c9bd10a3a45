mod auth;
mod config;
mod google_api;
mod routes;
mod session;


#[macro_use]
extern crate rocket;

use crate::auth::{Authenticator, GoogleStrategy, GOOGLE};
use crate::config::AuthConfig;
use crate::session::SessionStorage;
use rocket::fairing::{self, AdHoc};
use rocket::figment::providers::Serialized;
use rocket::figment::Figment;
use rocket::fs::{relative, FileServer};
use rocket::{Build, Rocket};
use rocket_dyn_templates::Template;


/// Validates the authentication config and installs the Authenticator.
/// Ignition fails when a credential is missing.
async fn stage_authenticator(rocket: Rocket<Build>) -> fairing::Result {
    let figment = rocket.figment().clone();

    let (authenticator, secret_key) = match authenticator(&figment) {
        Ok(staged) => staged,
        Err(e) => {
            error!("Authentication config could not be loaded: {:#}", e);
            return Err(rocket);
        }
    };

    Ok(rocket
        .configure(figment.merge(Serialized::global("secret_key", secret_key)))
        .manage(authenticator))
}

fn authenticator(figment: &Figment) -> Result<(Authenticator, String), anyhow::Error> {
    let config = AuthConfig::from_figment(figment)?;
    let google = GoogleStrategy::try_from(&config.google)?;
    let secure = config.secure_cookies(figment.profile());
    info!("Google OAuth2 client {} redirecting to {}", config.google.client_id, config.google.callback_url);

    let authenticator = Authenticator::new(SessionStorage::new(secure))
        .use_strategy(GOOGLE, google);
    Ok((authenticator, config.secret_key()))
}

pub fn build(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(AdHoc::try_on_ignite("Authenticator", stage_authenticator))
        .attach(Template::fairing())
        .mount("/", FileServer::from(relative!("static")))
        .mount("/", routes::routes())
}

#[launch]
fn rocket() -> _ {
    build(config::figment())
}
