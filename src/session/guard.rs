//! Session guard.
//!
//! Decides, for every inbound request, whether it may proceed or must be
//! redirected to the login page. The decision is a pure function of the
//! session and the request path so it can be tested without a server.
//!
//! ```text
//! authenticated?  ── yes ──────────────────────────────► Allow
//!       │ no
//!       ▼
//! route kind ── Page (not /login) ──► RedirectTo /login, remember path
//!       │    ── Asset (protected) ──► RedirectTo /login
//!       └──── anything else ───────► Allow
//! ```

use crate::paths;

use super::store::Session;

/// Pages reachable without a session.
pub const UNRESTRICTED_PAGES: &[&str] = &[paths::LOGIN];

/// How the guard treats a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// A registered page route
    Page,
    /// A static file or download endpoint
    Asset,
    /// Not served by the gallery's pages (health, logout, unknown paths)
    Other,
}

/// Outcome of the guard for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Forward the request unchanged
    Allow,
    /// Short-circuit with a redirect
    RedirectTo {
        /// Redirect target
        location: String,
        /// Path to store as the session's referrer before redirecting
        remember: Option<String>,
    },
}

/// Classification of the gallery's URL space.
#[derive(Debug, Clone)]
pub struct RouteTable {
    pages: Vec<&'static str>,
    /// Prefixes followed by a decimal page number
    page_prefixes: Vec<&'static str>,
    asset_prefixes: Vec<&'static str>,
    protect_assets: bool,
}

impl RouteTable {
    /// Route table for the gallery's registered pages and mounts.
    pub fn gallery(protect_assets: bool) -> Self {
        Self {
            pages: vec![paths::LANDING, paths::LOGIN, paths::HOME, paths::DOWNLOAD_ALL],
            page_prefixes: vec![paths::IMAGE_GROUP_PREFIX],
            asset_prefixes: vec![
                paths::ORIGINALS_MOUNT,
                paths::COMPRESSED_MOUNT,
                paths::DOWNLOAD_PREFIX,
                paths::DOWNLOAD_ALL,
            ],
            protect_assets,
        }
    }

    /// Whether unauthenticated asset requests are redirected.
    pub fn protects_assets(&self) -> bool {
        self.protect_assets
    }

    /// Classify a request path.
    pub fn classify(&self, path: &str) -> RouteKind {
        let is_numbered_page = |prefix: &&str| {
            path.strip_prefix(*prefix)
                .map(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
                .unwrap_or(false)
        };
        if self.pages.contains(&path) || self.page_prefixes.iter().any(is_numbered_page) {
            return RouteKind::Page;
        }

        let is_asset = self.asset_prefixes.iter().any(|prefix| {
            path.strip_prefix(prefix)
                .map(|rest| rest.starts_with('/') && rest.len() > 1)
                .unwrap_or(false)
        });
        if is_asset {
            RouteKind::Asset
        } else {
            RouteKind::Other
        }
    }
}

/// Decide whether a request for `path` under `session` may proceed.
pub fn decide(session: &Session, path: &str, routes: &RouteTable) -> GuardDecision {
    if session.authenticated {
        return GuardDecision::Allow;
    }

    match routes.classify(path) {
        RouteKind::Page if !UNRESTRICTED_PAGES.contains(&path) => GuardDecision::RedirectTo {
            location: paths::LOGIN.to_string(),
            remember: Some(path.to_string()),
        },
        RouteKind::Asset if routes.protects_assets() => GuardDecision::RedirectTo {
            location: paths::LOGIN.to_string(),
            remember: None,
        },
        _ => GuardDecision::Allow,
    }
}
