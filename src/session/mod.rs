//! Access control.
//!
//! - [`CredentialStore`]: fixed username to password mapping loaded at startup
//! - [`SessionStore`]: per-client [`Session`] state keyed by session id
//! - [`SessionSigner`]: HMAC-SHA256 tagging of the session cookie
//! - [`decide`]: the session guard, a pure `(session, path) -> GuardDecision`
//!
//! # Request Flow
//!
//! ```text
//! request ──► cookie ──► SessionSigner::verify ──► SessionStore::get
//!                                                        │
//!                                                        ▼
//!                                           decide(session, path, routes)
//!                                             │                     │
//!                                           Allow            RedirectTo /login
//! ```

mod credentials;
mod guard;
mod signing;
mod store;

pub use credentials::CredentialStore;
pub use guard::{decide, GuardDecision, RouteKind, RouteTable, UNRESTRICTED_PAGES};
pub use signing::{SessionSigner, SigningError};
pub use store::{
    Session, SessionId, SessionStore, DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL,
};
