use dashmap::DashMap;
use uuid::Uuid;

/// In-process store of issued access tokens.
///
/// Tokens are opaque random strings; they are valid until the process
/// restarts. The map is concurrent so resolution takes no lock across
/// requests.
#[derive(Debug, Default)]
pub struct TokenStore {
    tokens: DashMap<String, Uuid>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token for a user and remember it.
    pub fn issue(&self, user_id: Uuid) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.tokens.insert(token.clone(), user_id);
        token
    }

    /// Resolve a token back to the user id it was issued for.
    pub fn resolve(&self, token: &str) -> Option<Uuid> {
        self.tokens.get(token).map(|entry| *entry.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_resolve_to_their_user() {
        let store = TokenStore::new();
        let user = Uuid::new_v4();

        let token = store.issue(user);
        assert_eq!(store.resolve(&token), Some(user));
        assert_eq!(store.resolve("no-such-token"), None);
    }

    #[test]
    fn tokens_are_unique_per_issue() {
        let store = TokenStore::new();
        let user = Uuid::new_v4();

        let a = store.issue(user);
        let b = store.issue(user);
        assert_ne!(a, b);
        assert_eq!(store.resolve(&a), Some(user));
        assert_eq!(store.resolve(&b), Some(user));
    }
}
