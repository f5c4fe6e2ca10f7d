//! The injected identity value.
//!
//! Authentication happens upstream; FieldOps receives the acting user's
//! display name and role names with each request and passes them explicitly
//! into authorization checks and write attributions. There is no ambient
//! session state.

use serde::{Deserialize, Serialize};

/// The acting user for a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Display name, used as free-text attribution on writes.
    pub name: String,
    /// Role names granted by the upstream directory.
    pub roles: Vec<String>,
}

impl CurrentUser {
    /// Creates a new identity value.
    #[must_use]
    pub fn new(name: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            name: name.into(),
            roles,
        }
    }

    /// Returns true if the user holds the named role.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_role() {
        let user = CurrentUser::new(
            "Dana Cruz",
            vec!["Managers".to_string(), "Finance".to_string()],
        );
        assert!(user.has_role("Managers"));
        assert!(user.has_role("Finance"));
        assert!(!user.has_role("Human Resources"));
    }

    #[test]
    fn test_no_roles() {
        let user = CurrentUser::new("Visitor", vec![]);
        assert!(!user.has_role("Managers"));
    }
}
