//! Who is editing: the author recorded when no explicit author is configured.

use std::process::Command;

use tracing::debug;

/// Supplies the current user's display name.
pub trait IdentityProvider {
    fn current_user(&self) -> String;
}

/// Identity from the host: `git config user.name`, then `USER`, then `USERNAME`.
///
/// The version-control identity wins over the OS account name when both exist.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemIdentity;

impl SystemIdentity {
    fn git_user_name() -> Option<String> {
        let output = Command::new("git")
            .args(["config", "user.name"])
            .output()
            .ok()?;

        if !output.status.success() {
            return None;
        }

        let name = String::from_utf8(output.stdout).ok()?;
        non_empty(name.trim())
    }

    fn env_user_name() -> Option<String> {
        ["USER", "USERNAME"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find_map(|value| non_empty(value.trim()))
    }
}

impl IdentityProvider for SystemIdentity {
    fn current_user(&self) -> String {
        if let Some(name) = Self::git_user_name() {
            debug!("Using git identity '{}'", name);
            return name;
        }
        Self::env_user_name().unwrap_or_else(|| "unknown".to_string())
    }
}

/// A fixed identity, for callers that already know the user.
#[derive(Debug, Clone)]
pub struct StaticIdentity(pub String);

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> String {
        self.0.clone()
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_static_identity() {
        assert_eq!(StaticIdentity("alice".to_string()).current_user(), "alice");
    }

    #[test]
    fn test_system_identity_is_never_empty() {
        assert!(!SystemIdentity.current_user().is_empty());
    }

    #[test]
    #[serial]
    fn test_env_user_name_prefers_user() {
        let saved_user = std::env::var("USER").ok();
        std::env::set_var("USER", "  bob  ");

        assert_eq!(SystemIdentity::env_user_name().as_deref(), Some("bob"));

        match saved_user {
            Some(value) => std::env::set_var("USER", value),
            None => std::env::remove_var("USER"),
        }
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("x").as_deref(), Some("x"));
    }
}
