// Superadmin roles
pub const SUPERADMIN_MASTER: &str = "superadmin-master"; // first superadmin, manages staff
pub const SUPERADMIN_STAFF: &str = "superadmin-staff"; // full system access, cannot create accounts

// Company roles
pub const ADMIN: &str = "admin";
pub const MANAGER: &str = "manager";
pub const STAFF: &str = "STAFF";

// Legacy
pub const USER: &str = "USER";

/// Console routes and the authorities allowed to open them. An empty list
/// means any signed-in user.
pub const PROTECTED_ROUTES: &[(&str, &[&str])] = &[
    ("/home", &[]),
    ("/dashboard", &[SUPERADMIN_MASTER, SUPERADMIN_STAFF]),
    ("/users", &[SUPERADMIN_MASTER]),
    ("/company", &[SUPERADMIN_MASTER, SUPERADMIN_STAFF]),
    ("/pricing-plans", &[SUPERADMIN_MASTER, SUPERADMIN_STAFF]),
];

/// Authorities required for a route, matching on the first path segment
/// (`/company/details/1` uses the `/company` entry).
pub fn route_authority(route: &str) -> Option<&'static [&'static str]> {
    let trimmed = route.trim_end_matches('/');
    let root = match trimmed.get(1..).and_then(|rest| rest.find('/')) {
        Some(idx) => &trimmed[..idx + 1],
        None => trimmed,
    };

    PROTECTED_ROUTES
        .iter()
        .find(|(path, _)| *path == root)
        .map(|(_, authority)| *authority)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_routes_use_root_entry() {
        assert_eq!(route_authority("/company/details/abc"), route_authority("/company"));
        assert_eq!(route_authority("/users/"), Some(&[SUPERADMIN_MASTER][..]));
        assert_eq!(route_authority("/home"), Some(&[][..]));
    }

    #[test]
    fn unknown_routes_have_no_entry() {
        assert!(route_authority("/billing").is_none());
        assert!(route_authority("").is_none());
    }
}
