use serde_derive::{Deserialize, Serialize};


/// The locally known user, kept in the session under [`USER_KEY`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
    pub image: String,
}

pub const USER_KEY: &str = "user";
