use std::collections::BTreeMap;

use rocket::http::{Cookie, CookieJar, SameSite};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SESSION_COOKIE: &str = "_session";

/// Session data carried entirely inside the private `_session` cookie.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    data: BTreeMap<String, Value>,
}

impl Session {
    /// Returns the value stored under `key`, if present and of the requested shape.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.data
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), serde_json::Error> {
        self.data.insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn decode(value: &str) -> Result<Session, serde_json::Error> {
        serde_json::from_str(value)
    }
}


/// Stores sessions in a private cookie.
/// Encryption and authentication are handled by Rocket using the configured `secret_key`.
#[derive(Debug, Clone)]
pub struct SessionStorage {
    secure: bool,
}

impl SessionStorage {
    pub fn new(secure: bool) -> SessionStorage {
        SessionStorage { secure }
    }

    pub fn create(&self) -> Session {
        Session::default()
    }

    /// Reads the session from the request cookies.
    /// A missing or undecodable cookie yields an empty session.
    pub fn read(&self, cookies: &CookieJar<'_>) -> Session {
        let Some(cookie) = cookies.get_private(SESSION_COOKIE) else {
            return self.create();
        };

        match Session::decode(cookie.value()) {
            Ok(session) => session,
            Err(e) => {
                debug!("Discarding undecodable session: {}", e);
                self.create()
            }
        }
    }

    /// Writes the session into the response cookies.
    pub fn commit(&self, cookies: &CookieJar<'_>, session: &Session) -> Result<(), serde_json::Error> {
        cookies.add_private(self.cookie(session.encode()?));
        Ok(())
    }

    /// Clears the session cookie in the browser.
    pub fn destroy(&self, cookies: &CookieJar<'_>) {
        cookies.remove_private(Cookie::build(SESSION_COOKIE).path("/"));
    }

    fn cookie(&self, value: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, value))
            .same_site(SameSite::Lax)
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .build()
    }
}
