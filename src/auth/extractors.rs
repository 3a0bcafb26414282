use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, warn};

use crate::{
    auth::{flash, session},
    error::AppError,
    state::AppState,
    users::User,
};

/// Session state of the requesting client, resolved to a user row.
#[derive(Debug)]
pub enum CurrentUser {
    Anonymous,
    Authenticated(User),
}

impl CurrentUser {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, CurrentUser::Authenticated(_))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(subject) = session::resolve_subject(state, &jar).await? else {
            return Ok(CurrentUser::Anonymous);
        };
        let Ok(user_id) = subject.parse::<i64>() else {
            warn!(%subject, "session subject is not a user id");
            return Ok(CurrentUser::Anonymous);
        };
        match User::find_by_id(&state.db, user_id).await? {
            Some(user) => Ok(CurrentUser::Authenticated(user)),
            None => {
                warn!(user_id, "session references a missing user");
                Ok(CurrentUser::Anonymous)
            }
        }
    }
}

/// Gate for protected routes: anonymous clients are sent to the login page
/// with a notice instead of reaching the handler.
pub struct RequireUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for RequireUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match CurrentUser::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?
        {
            CurrentUser::Authenticated(user) => Ok(RequireUser(user)),
            CurrentUser::Anonymous => {
                debug!(path = %parts.uri.path(), "anonymous request to protected route");
                let jar = flash::set(CookieJar::new(), flash::LOGIN_REQUIRED);
                Err((jar, Redirect::to("/login")).into_response())
            }
        }
    }
}
