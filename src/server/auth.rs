//! Session-based access control for the gallery.
//!
//! Every request passes through [`session_middleware`], which:
//!
//! 1. resolves the client's session id from the signed `gallery_session`
//!    cookie, or assigns a fresh one,
//! 2. runs the session guard ([`decide`]) for the request path,
//! 3. either short-circuits with a `303 See Other` to `/login` (remembering
//!    the requested page) or forwards the request with the session attached
//!    as a [`CurrentSession`] extension,
//! 4. issues the cookie if the handler stored state for a new session.
//!
//! The login and logout handlers live here as well since they are the only
//! handlers that mutate session state.

use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::handlers::AppState;
use super::views;
use crate::paths;
use crate::session::{decide, GuardDecision, Session, SessionId, SessionStore};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "gallery_session";

// =============================================================================
// Types
// =============================================================================

/// The session attached to a request by [`session_middleware`].
#[derive(Debug, Clone)]
pub struct CurrentSession {
    /// Session id from the cookie, or freshly assigned
    pub id: SessionId,

    /// Snapshot of the session taken before the handler ran
    pub session: Session,
}

/// Form fields submitted by the login page.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Query parameters for the login page.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQueryParams {
    /// Set after a failed attempt to show the notice
    #[serde(default)]
    pub error: Option<String>,
}

// =============================================================================
// Axum Middleware
// =============================================================================

/// Axum middleware applying the session guard to every request.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, middleware};
///
/// let app = Router::new()
///     .route("/home", get(home_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
///     .with_state(state);
/// ```
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let existing = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| match state.signer.verify(cookie.value()) {
            Ok(id) => Some(id),
            Err(e) => {
                debug!("Ignoring session cookie: {}", e);
                None
            }
        });
    let is_new = existing.is_none();
    let id = existing.unwrap_or_else(SessionStore::new_id);

    let session = state.sessions.get(&id).await;
    let path = request.uri().path().to_string();

    let response = match decide(&session, &path, &state.routes) {
        GuardDecision::RedirectTo { location, remember } => {
            debug!(path = %path, location = %location, "Redirecting unauthenticated request");
            if let Some(referrer) = remember {
                state
                    .sessions
                    .update(&id, |s| s.referrer_path = Some(referrer))
                    .await;
            }
            Redirect::to(&location).into_response()
        }
        GuardDecision::Allow => {
            request.extensions_mut().insert(CurrentSession {
                id: id.clone(),
                session,
            });
            next.run(request).await
        }
    };

    if is_new && state.sessions.contains(&id).await {
        let cookie = Cookie::build((SESSION_COOKIE, state.signer.sign(&id)))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();
        return (jar.add(cookie), response).into_response();
    }

    response
}

// =============================================================================
// Handlers
// =============================================================================

/// Render the login form.
///
/// # Endpoint
///
/// `GET /login`
///
/// # Response
///
/// - `303 See Other` to `/` when the session is already authenticated
/// - `200 OK` with the login form otherwise; `?error=1` adds the
///   "wrong credentials" notice
pub async fn login_page_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Query(query): Query<LoginQueryParams>,
) -> Response {
    if current.session.authenticated {
        return Redirect::to(paths::LANDING).into_response();
    }

    Html(views::login_page(&state.settings.title, query.error.is_some())).into_response()
}

/// Check submitted credentials.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Response
///
/// - `303 See Other` to the remembered referrer (or `/`) on success
/// - `303 See Other` to `/login?error=1` on mismatch, with no session change
pub async fn login_submit_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Form(form): Form<LoginForm>,
) -> Redirect {
    if !state.credentials.verify(&form.username, &form.password) {
        warn!(username = %form.username, "Login failed: wrong username or password");
        return Redirect::to(&format!("{}?error=1", paths::LOGIN));
    }

    info!(username = %form.username, "Login succeeded");
    let target = current.session.post_login_target().to_string();
    state
        .sessions
        .update(&current.id, |s| {
            s.authenticated = true;
            s.username = form.username;
        })
        .await;

    Redirect::to(&target)
}

/// Clear the session and return to the login page.
///
/// # Endpoint
///
/// `GET|POST /logout`
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    if current.session.authenticated {
        info!(username = %current.session.username, "Logged out");
    }
    state.sessions.clear(&current.id).await;

    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/").build()),
        Redirect::to(paths::LOGIN),
    )
}

// =============================================================================
// Tests
// =============================================================================
