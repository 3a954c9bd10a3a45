use crate::auth::{AuthRedirects, Authenticator, CallbackParams, GOOGLE};
use rocket::http::CookieJar;
use rocket::response::Redirect;
use rocket::{Route, State};
use rocket_dyn_templates::{context, Template};

pub fn routes() -> Vec<Route> {
    routes![index, google_auth, dashboard, login, logout]
}

#[get("/")]
pub fn index(auth: &State<Authenticator>, cookies: &CookieJar<'_>) -> Template {
    let user = auth.peek_authenticated(cookies);

    Template::render("index", context! {
        logged_in: user.is_some(),
        user,
    })
}

/// Redirects to Google when called without a code, handles the callback otherwise.
#[get("/auth/google?<params..>")]
pub async fn google_auth(auth: &State<Authenticator>, cookies: &CookieJar<'_>, params: CallbackParams) -> Redirect {
    auth.authenticate(GOOGLE, cookies, &params, AuthRedirects {
        success: uri!(dashboard),
        failure: uri!(login),
    }).await
}

/// Only reachable with a signed in user.
#[get("/dashboard")]
pub fn dashboard(auth: &State<Authenticator>, cookies: &CookieJar<'_>) -> Result<Template, Redirect> {
    let user = auth.require_authenticated(cookies, uri!(login))?;

    Ok(Template::render("dashboard", context! { user }))
}

/// Only reachable without a signed in user.
#[get("/login")]
pub fn login(auth: &State<Authenticator>, cookies: &CookieJar<'_>) -> Result<Template, Redirect> {
    auth.require_unauthenticated(cookies, uri!(index))?;

    Ok(Template::render("login", context! {}))
}

#[get("/logout")]
pub fn logout(auth: &State<Authenticator>, cookies: &CookieJar<'_>) -> Redirect {
    auth.logout(cookies, uri!(login))
}
