//! Owner restriction for the bot.
//!
//! The ledger belongs to one person. Identity is delegated to Discord: when
//! `OWNER_USER_ID` is set, only that user may run commands. When it is unset
//! the bot answers anyone who can see it.

/// Reads the configured owner id from the environment, ignoring blank values.
#[must_use]
pub fn get_owner_id() -> Option<String> {
    std::env::var("OWNER_USER_ID")
        .ok()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}

/// Whether `user_id` may use the bot given the configured `owner`.
#[must_use]
pub fn is_allowed(owner: Option<&str>, user_id: &str) -> bool {
    owner.is_none_or(|owner| owner == user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everyone_allowed_without_owner() {
        assert!(is_allowed(None, "123"));
    }

    #[test]
    fn test_only_owner_allowed() {
        assert!(is_allowed(Some("123"), "123"));
        assert!(!is_allowed(Some("123"), "456"));
    }
}
