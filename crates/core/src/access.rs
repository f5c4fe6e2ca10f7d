//! Role-gated view visibility.
//!
//! Each view carries a static allow-list of role names; a user may see the
//! view when their role set intersects it. The gate is presentational - it
//! decides what a page renders, while the underlying data-access functions
//! remain callable by any handler that holds a connection.

use fieldops_shared::CurrentUser;

/// Static allow-list of role names for a view.
#[derive(Debug, Clone, Copy)]
pub struct AccessPolicy {
    allowed_roles: &'static [&'static str],
}

impl AccessPolicy {
    /// Creates a policy from a static allow-list.
    #[must_use]
    pub const fn new(allowed_roles: &'static [&'static str]) -> Self {
        Self { allowed_roles }
    }

    /// Returns true if the user's role set intersects the allow-list.
    #[must_use]
    pub fn permits(&self, user: &CurrentUser) -> bool {
        self.allowed_roles.iter().any(|role| user.has_role(role))
    }

    /// Returns the allow-list, for logging denied access attempts.
    #[must_use]
    pub const fn allowed_roles(&self) -> &'static [&'static str] {
        self.allowed_roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TRAVEL_DESK: AccessPolicy =
        AccessPolicy::new(&["Managers", "Travel Coordinators", "Finance"]);

    fn user_with(roles: &[&str]) -> CurrentUser {
        CurrentUser::new("Test User", roles.iter().map(ToString::to_string).collect())
    }

    #[rstest]
    #[case(&["Managers"], true)]
    #[case(&["Finance"], true)]
    #[case(&["Managers", "Human Resources"], true)]
    #[case(&["Human Resources"], false)]
    #[case(&[], false)]
    fn test_intersection_decides(#[case] roles: &[&str], #[case] expected: bool) {
        assert_eq!(TRAVEL_DESK.permits(&user_with(roles)), expected);
    }

    #[test]
    fn test_role_names_are_exact() {
        // "managers" is not "Managers"; the upstream directory is the
        // source of truth for casing.
        assert!(!TRAVEL_DESK.permits(&user_with(&["managers"])));
    }

    #[test]
    fn test_empty_allow_list_denies_everyone() {
        let closed = AccessPolicy::new(&[]);
        assert!(!closed.permits(&user_with(&["Managers"])));
    }
}
