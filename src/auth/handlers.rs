use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{is_valid_email, normalize_email, LoginForm, RegisterForm},
        extractors::CurrentUser,
        flash,
        password::{hash_password, verify_password},
        session,
    },
    error::AppError,
    state::AppState,
    templates,
    users::User,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_page).post(register))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
}

fn notice_redirect(jar: CookieJar, notice: &str, to: &str) -> (CookieJar, Redirect) {
    (flash::set(jar, notice), Redirect::to(to))
}

pub async fn register_page(current: CurrentUser, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, notice) = flash::take(jar);
    let page = templates::register_page(current.is_authenticated(), notice.as_deref());
    (jar, Html(page))
}

#[instrument(skip(state, jar, form))]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let email = normalize_email(&form.email);
    let name = form.name.trim();

    if !is_valid_email(&email) {
        warn!(%email, "register with invalid email");
        return Ok(notice_redirect(jar, flash::INVALID_EMAIL, "/register"));
    }
    if name.is_empty() || form.password.is_empty() {
        warn!(%email, "register with missing name or password");
        return Ok(notice_redirect(jar, flash::MISSING_FIELDS, "/register"));
    }

    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(%email, "email already registered");
        return Ok(notice_redirect(jar, flash::ALREADY_REGISTERED, "/login"));
    }

    let hash = hash_password(&form.password)?;
    let Some(user) = User::create(&state.db, &email, name, &hash).await? else {
        // Lost the race against a concurrent registration of the same email.
        warn!(%email, "email registered concurrently");
        return Ok(notice_redirect(jar, flash::ALREADY_REGISTERED, "/login"));
    };

    let jar = session::begin(&state, jar, &user).await?;
    info!(user_id = user.id, email = %user.email, "user registered");
    Ok((jar, Redirect::to("/secrets")))
}

pub async fn login_page(current: CurrentUser, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, notice) = flash::take(jar);
    let page = templates::login_page(current.is_authenticated(), notice.as_deref());
    (jar, Html(page))
}

#[instrument(skip(state, jar, form))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let email = normalize_email(&form.email);

    let Some(user) = User::find_by_email(&state.db, &email).await? else {
        warn!(%email, "login unknown email");
        return Ok(notice_redirect(jar, flash::UNKNOWN_EMAIL, "/login"));
    };

    if !verify_password(&form.password, &user.password)? {
        warn!(%email, user_id = user.id, "login invalid password");
        return Ok(notice_redirect(jar, flash::WRONG_PASSWORD, "/login"));
    }

    let jar = session::begin(&state, jar, &user).await?;
    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok((jar, Redirect::to("/secrets")))
}

#[instrument(skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    let jar = session::end(&state, jar).await?;
    Ok((jar, Redirect::to("/")))
}
