const USER_AGENT: &str = "rocket-google-auth";
const MIMETYPE_JSON: &str = "application/json";

use crate::auth::User;
use serde_derive::Deserialize;


/// Excerpt of the OpenID Connect user info returned by Google.
/// `name`, `email` and `picture` must be present or the payload is rejected.
#[derive(Deserialize, Debug, Clone)]
pub struct GoogleUserInfo {
    pub name: String,
    pub picture: String,
    pub email: String,
}


impl From<GoogleUserInfo> for User {
    fn from(info: GoogleUserInfo) -> Self {
        User {
            name: info.name,
            email: info.email,
            image: info.picture,
        }
    }
}


pub struct GoogleClient {
    userinfo_url: String,
    http: reqwest::Client,
}

impl GoogleClient {
    pub fn new(userinfo_url: &str) -> GoogleClient {
        let http = reqwest::Client::new();
        GoogleClient {
            userinfo_url: userinfo_url.to_string(),
            http,
        }
    }


    /// Fetches the user info for the owner of `access_token`.
    /// Non-2xx responses and payloads missing required fields are errors.
    pub async fn get_user(&self, access_token: &str) -> Result<GoogleUserInfo, reqwest::Error> {
        let response = self.http
            .get(&self.userinfo_url)
            .header("user-agent", USER_AGENT)
            .header("Accept", MIMETYPE_JSON)
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?;

        response.json::<GoogleUserInfo>().await
    }
}
