//! One-shot notices carried across a redirect in a short-lived cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

const FLASH_COOKIE: &str = "flash";

pub const ALREADY_REGISTERED: &str = "You've already signed up with that email, log in instead!";
pub const UNKNOWN_EMAIL: &str = "That email does not exist, please try again.";
pub const WRONG_PASSWORD: &str = "Password incorrect, please try again.";
pub const LOGIN_REQUIRED: &str = "Please log in to access this page.";
pub const INVALID_EMAIL: &str = "Please enter a valid email address.";
pub const MISSING_FIELDS: &str = "Name and password are required.";

pub fn set(jar: CookieJar, message: &str) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, urlencoding::encode(message).into_owned()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::minutes(5)),
    )
}

/// Pending notice, if any. The cookie is cleared so it shows only once.
pub fn take(jar: CookieJar) -> (CookieJar, Option<String>) {
    let message = jar
        .get(FLASH_COOKIE)
        .and_then(|c| urlencoding::decode(c.value()).ok().map(|m| m.into_owned()))
        .filter(|m| !m.is_empty());
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, message);
    }
    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), message)
}
