//! Session cookie storage.
//!
//! The registry hands out an opaque cookie after a successful exchange. The
//! accessor replays it on every later call until the registry rejects it.
//! Clones of a [`SessionStore`] share the same slot, which is how several
//! clients join one logical session.

use std::fmt::{self, Debug, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Opaque `name=value` cookie pair issued by the registry.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Extracts the cookie pair from a `Set-Cookie` header value.
    ///
    /// Attributes after the first `;` are dropped. Returns `None` when the
    /// header carries no usable `name=value` pair.
    #[must_use]
    pub fn from_set_cookie(header: &str) -> Option<Self> {
        let pair = header.split(';').next()?.trim();
        let (name, _) = pair.split_once('=')?;
        if name.trim().is_empty() {
            return None;
        }
        Some(Self(pair.to_string()))
    }

    /// Picks the token from the last usable header among `headers`.
    #[must_use]
    pub fn from_set_cookies<'a>(headers: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        headers.into_iter().filter_map(Self::from_set_cookie).last()
    }

    /// Cookie name, e.g. `JSESSIONID`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.split_once('=').map_or(self.0.as_str(), |(name, _)| name)
    }

    /// Value for the outgoing `Cookie` header.
    #[must_use]
    pub fn header_value(&self) -> &str {
        &self.0
    }
}

impl Debug for SessionToken {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SessionToken")
            .field("name", &self.name())
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Shared slot holding the most recent session token.
#[derive(Clone, Default, Debug)]
pub struct SessionStore {
    inner: Arc<Mutex<Option<SessionToken>>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Token to attach to the next request, if any.
    #[must_use]
    pub fn current(&self) -> Option<SessionToken> {
        self.lock().clone()
    }

    /// Whether a token is currently held.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.lock().is_some()
    }

    /// Stores `token`, returning the one it replaced.
    pub fn replace(&self, token: SessionToken) -> Option<SessionToken> {
        self.lock().replace(token)
    }

    /// Drops `rejected` if it is still the stored token.
    ///
    /// A concurrent caller may already have stored a fresher token; that one
    /// is kept. Returns `true` when the store was cleared.
    pub fn invalidate(&self, rejected: &SessionToken) -> bool {
        let mut slot = self.lock();
        if slot.as_ref() == Some(rejected) {
            *slot = None;
            true
        } else {
            false
        }
    }

    /// Forgets any stored token.
    pub fn clear(&self) {
        self.lock().take();
    }

    fn lock(&self) -> MutexGuard<'_, Option<SessionToken>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(raw: &str) -> SessionToken {
        SessionToken::from_set_cookie(raw).unwrap_or_else(|| panic!("valid cookie: {raw}"))
    }

    #[test]
    fn set_cookie_attributes_are_dropped() {
        let parsed = token("JSESSIONID=abc123; Path=/airavata-registry; HttpOnly");
        assert_eq!(parsed.header_value(), "JSESSIONID=abc123");
        assert_eq!(parsed.name(), "JSESSIONID");
    }

    #[test]
    fn set_cookie_without_pair_is_ignored() {
        assert!(SessionToken::from_set_cookie("").is_none());
        assert!(SessionToken::from_set_cookie("HttpOnly; Secure").is_none());
        assert!(SessionToken::from_set_cookie("=value").is_none());
    }

    #[test]
    fn last_usable_set_cookie_wins() {
        let picked = SessionToken::from_set_cookies([
            "JSESSIONID=early",
            "JSESSIONID=late; Path=/",
            "HttpOnly",
        ]);
        assert_eq!(picked, Some(token("JSESSIONID=late")));
        assert!(SessionToken::from_set_cookies([]).is_none());
    }

    #[test]
    fn debug_output_redacts_value() {
        let rendered = format!("{:?}", token("JSESSIONID=secret-session"));
        assert!(rendered.contains("JSESSIONID"));
        assert!(!rendered.contains("secret-session"));
    }

    #[test]
    fn replace_keeps_last_token() {
        let store = SessionStore::new();
        assert!(store.replace(token("JSESSIONID=one")).is_none());
        let previous = store.replace(token("JSESSIONID=two"));
        assert_eq!(previous, Some(token("JSESSIONID=one")));
        assert_eq!(store.current(), Some(token("JSESSIONID=two")));
    }

    #[test]
    fn clones_share_the_slot() {
        let store = SessionStore::new();
        let shared = store.clone();
        shared.replace(token("JSESSIONID=shared"));
        assert!(store.has_token());
        store.clear();
        assert!(!shared.has_token());
    }

    #[test]
    fn invalidate_only_clears_the_rejected_token() {
        let store = SessionStore::new();
        let stale = token("JSESSIONID=stale");
        store.replace(token("JSESSIONID=fresh"));
        assert!(!store.invalidate(&stale));
        assert_eq!(store.current(), Some(token("JSESSIONID=fresh")));

        let fresh = token("JSESSIONID=fresh");
        assert!(store.invalidate(&fresh));
        assert!(store.current().is_none());
    }
}
