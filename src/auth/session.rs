use axum::extract::FromRef;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    auth::{claims::Claims, repo_types::SessionRecord},
    config::{SessionConfig, MAX_SESSION_TTL_MINUTES},
    error::AppError,
    state::AppState,
};

pub const SESSION_COOKIE: &str = "session";

/// Capability required of anything that can be bound to a client session.
pub trait SessionSubject {
    fn is_authenticated(&self) -> bool;
    /// Stable identifier used to load the subject back on later requests.
    fn unique_id(&self) -> String;
}

/// Signing and verification keys for session tokens, plus cookie settings.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
    cookie_secure: bool,
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(&state.config.session)
    }
}

impl SessionKeys {
    pub fn new(cfg: &SessionConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            ttl: Duration::minutes(cfg.ttl_minutes.clamp(1, MAX_SESSION_TTL_MINUTES)),
            cookie_secure: cfg.cookie_secure,
        }
    }

    pub fn sign(&self, subject_id: &str, sid: Uuid, now: OffsetDateTime) -> anyhow::Result<String> {
        let exp = self.expiry(now)?;
        let claims = Claims {
            sub: subject_id.to_string(),
            sid,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(subject = %subject_id, %sid, "session token signed");
        Ok(token)
    }

    fn expiry(&self, now: OffsetDateTime) -> anyhow::Result<OffsetDateTime> {
        now.checked_add(self.ttl)
            .ok_or_else(|| anyhow::anyhow!("session expiry out of range"))
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }

    fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.cookie_secure)
            .max_age(self.ttl)
            .build()
    }

    /// Claims of the session cookie in `jar`, if present and valid.
    fn claims_from(&self, jar: &CookieJar) -> Option<Claims> {
        let cookie = jar.get(SESSION_COOKIE)?;
        match self.verify(cookie.value()) {
            Ok(claims) => Some(claims),
            Err(e) => {
                debug!(error = %e, "ignoring invalid session cookie");
                None
            }
        }
    }
}

fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

/// Anonymous -> Authenticated: records a new server-side session for
/// `subject` and sets the session cookie. Any session already carried by
/// `jar` is revoked first.
pub async fn begin(
    state: &AppState,
    jar: CookieJar,
    subject: &impl SessionSubject,
) -> Result<CookieJar, AppError> {
    if !subject.is_authenticated() {
        return Err(anyhow::anyhow!("refusing to bind an unauthenticated subject").into());
    }
    let keys = SessionKeys::from_ref(state);
    if let Some(previous) = keys.claims_from(&jar) {
        SessionRecord::delete(&state.db, previous.sid).await?;
    }

    let now = OffsetDateTime::now_utc();
    let expires_at = keys.expiry(now)?.unix_timestamp();
    let purged = SessionRecord::delete_expired(&state.db, now.unix_timestamp()).await?;
    if purged > 0 {
        debug!(purged, "expired sessions removed");
    }

    let sid = Uuid::new_v4();
    let subject_id = subject.unique_id();
    SessionRecord::create(&state.db, sid, &subject_id, expires_at).await?;
    let token = keys.sign(&subject_id, sid, now)?;
    info!(subject = %subject_id, %sid, "session started");
    Ok(jar.add(keys.session_cookie(token)))
}

/// Authenticated -> Anonymous. Revokes the server-side session and clears
/// the cookie; a no-op for anonymous clients.
pub async fn end(state: &AppState, jar: CookieJar) -> Result<CookieJar, AppError> {
    let keys = SessionKeys::from_ref(state);
    if let Some(claims) = keys.claims_from(&jar) {
        SessionRecord::delete(&state.db, claims.sid).await?;
        info!(subject = %claims.sub, sid = %claims.sid, "session ended");
    }
    Ok(jar.remove(removal_cookie()))
}

/// The subject id bound to the session in `jar`. Forged, expired or revoked
/// tokens resolve to `None`.
pub async fn resolve_subject(
    state: &AppState,
    jar: &CookieJar,
) -> Result<Option<String>, AppError> {
    let keys = SessionKeys::from_ref(state);
    let Some(claims) = keys.claims_from(jar) else {
        return Ok(None);
    };
    let now = OffsetDateTime::now_utc().unix_timestamp();
    match SessionRecord::find_active(&state.db, claims.sid, now).await? {
        Some(record) if record.subject == claims.sub => {
            debug!(sid = %record.id, expires_at = record.expires_at, "session resolved");
            Ok(Some(record.subject))
        }
        Some(_) => {
            warn!(sid = %claims.sid, "session subject mismatch");
            Ok(None)
        }
        None => {
            debug!(sid = %claims.sid, "session revoked or expired");
            Ok(None)
        }
    }
}
