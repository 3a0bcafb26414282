use axum::response::Html;
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, instrument};

use crate::{
    auth::{
        extractors::{CurrentUser, RequireUser},
        flash,
    },
    templates,
};

pub async fn home(current: CurrentUser, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, notice) = flash::take(jar);
    let page = templates::index_page(current.is_authenticated(), notice.as_deref());
    (jar, Html(page))
}

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn secrets(RequireUser(user): RequireUser) -> Html<String> {
    debug!(name = %user.name, "rendering secrets page");
    Html(templates::secrets_page(&user.name))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::app::test_support::{
        body_text, get, location, register_user, send, session_cookie, set_cookie, test_app,
    };

    #[tokio::test]
    async fn home_reflects_authentication_state() {
        let (app, _) = test_app().await;
        let res = send(&app, get("/", None)).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(!body_text(res).await.contains("/logout"));

        let res = register_user(&app, "ada@example.com", "Ada", "pw").await;
        let cookie = session_cookie(&res).unwrap();
        let res = send(&app, get("/", Some(&cookie))).await;
        assert!(body_text(res).await.contains("/logout"));
    }

    #[tokio::test]
    async fn secrets_redirects_anonymous_to_login() {
        let (app, _) = test_app().await;
        let res = send(&app, get("/secrets", None)).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some("/login"));
        assert!(set_cookie(&res, "flash").is_some());
        assert!(!body_text(res).await.contains("Welcome,"));
    }

    #[tokio::test]
    async fn forged_session_cookie_is_anonymous() {
        let (app, _) = test_app().await;
        let forged = Some("session=eyJhbGciOiJIUzI1NiJ9.e30.bad");
        let res = send(&app, get("/secrets", forged)).await;
        assert_eq!(location(&res), Some("/login"));
    }

    #[tokio::test]
    async fn session_for_deleted_user_is_anonymous() {
        let (app, state) = test_app().await;
        let res = register_user(&app, "ada@example.com", "Ada", "pw").await;
        let cookie = session_cookie(&res).unwrap();
        sqlx::query("DELETE FROM users").execute(&state.db).await.unwrap();

        let res = send(&app, get("/secrets", Some(&cookie))).await;
        assert_eq!(location(&res), Some("/login"));
        let res = send(&app, get("/", Some(&cookie))).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
