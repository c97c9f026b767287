// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Role-gated view resolution.
//!
//! Order of rules: `/login` always wins, an unauthenticated session always
//! lands on Login, then a role may only reach views under its own prefix.
//! Anything under the own prefix that is not home or calendar falls through
//! to Messages; anything else redirects to the role's Home.

use agua_core::Role;
use tracing::debug;

use crate::route::Route;

/// The view a navigation resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    Home(Role),
    Calendar(Role),
    Messages(Role),
}

impl View {
    /// The canonical route for this view.
    pub fn route(&self) -> Route {
        match self {
            View::Login => Route::Login,
            View::Home(role) => Route::Home(*role),
            View::Calendar(role) => Route::Calendar(*role),
            View::Messages(role) => Route::Messages(*role),
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            View::Login => None,
            View::Home(role) | View::Calendar(role) | View::Messages(role) => Some(*role),
        }
    }

    /// Heading shown above the view.
    pub fn title(&self) -> String {
        match self {
            View::Login => "Login".to_string(),
            View::Home(role) => format!("Home {}", role_label(*role)),
            View::Calendar(role) => format!("Calendar {}", role_label(*role)),
            View::Messages(role) => format!("Messages {}", role_label(*role)),
        }
    }
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Admin => "Admin",
        Role::User => "User",
    }
}

/// Resolve `route` for a session holding `role` (or none).
pub fn resolve(route: &Route, role: Option<Role>) -> View {
    let Some(role) = role else {
        if *route != Route::Login {
            debug!(route = %route, "unauthenticated, redirecting to login");
        }
        return View::Login;
    };

    match route {
        Route::Login => View::Login,
        Route::Home(r) if *r == role => View::Home(role),
        Route::Calendar(r) if *r == role => View::Calendar(role),
        Route::Messages(r) | Route::Other { role: r, .. } if *r == role => View::Messages(role),
        _ => {
            debug!(route = %route, role = %role, "outside own namespace, redirecting home");
            View::Home(role)
        }
    }
}

/// Parse and resolve a raw path.
pub fn resolve_path(path: &str, role: Option<Role>) -> View {
    resolve(&Route::parse(path), role)
}

/// Landing route after a successful login.
pub fn home_route(role: Role) -> Route {
    Route::Home(role)
}

/// One entry of the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub label: &'static str,
    pub route: Route,
}

/// Navigation bar shown on every authenticated view. Logout navigates to
/// `/login`, which ends the session.
pub fn nav_routes(role: Role) -> Vec<NavEntry> {
    vec![
        NavEntry {
            label: "home",
            route: Route::Home(role),
        },
        NavEntry {
            label: "calendar",
            route: Route::Calendar(role),
        },
        NavEntry {
            label: "messages",
            route: Route::Messages(role),
        },
        NavEntry {
            label: "logout",
            route: Route::Login,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn login_resolves_regardless_of_session() {
        assert_eq!(resolve_path("/login", None), View::Login);
        assert_eq!(resolve_path("/login", Some(Role::Admin)), View::Login);
        assert_eq!(resolve_path("/login", Some(Role::User)), View::Login);
    }

    #[test]
    fn unauthenticated_always_lands_on_login() {
        for path in ["/admin/home", "/user/calendar", "/admin/whatever", "/", "garbage"] {
            assert_eq!(resolve_path(path, None), View::Login, "path {path}");
        }
    }

    #[test]
    fn own_sections_resolve() {
        assert_eq!(resolve_path("/admin/home", Some(Role::Admin)), View::Home(Role::Admin));
        assert_eq!(
            resolve_path("/admin/calendar", Some(Role::Admin)),
            View::Calendar(Role::Admin)
        );
        assert_eq!(
            resolve_path("/user/messages", Some(Role::User)),
            View::Messages(Role::User)
        );
    }

    #[test]
    fn unknown_section_falls_through_to_messages() {
        assert_eq!(
            resolve_path("/admin/whatever", Some(Role::Admin)),
            View::Messages(Role::Admin)
        );
        assert_eq!(
            resolve_path("/admin/calendar/2025", Some(Role::Admin)),
            View::Messages(Role::Admin)
        );
        assert_eq!(
            resolve_path("/user/calendar/2025", Some(Role::Admin)),
            View::Home(Role::Admin)
        );
    }

    #[test]
    fn other_role_prefix_redirects_home() {
        assert_eq!(resolve_path("/admin/home", Some(Role::User)), View::Home(Role::User));
        assert_eq!(
            resolve_path("/user/calendar", Some(Role::Admin)),
            View::Home(Role::Admin)
        );
        assert_eq!(resolve_path("/user/xyz", Some(Role::Admin)), View::Home(Role::Admin));
    }

    #[test]
    fn unparseable_path_redirects_home() {
        assert_eq!(resolve_path("/nope", Some(Role::User)), View::Home(Role::User));
    }

    #[test]
    fn home_route_and_nav() {
        assert_eq!(home_route(Role::Admin).to_string(), "/admin/home");
        let nav: Vec<String> = nav_routes(Role::User)
            .into_iter()
            .map(|e| e.route.to_string())
            .collect();
        assert_eq!(nav, ["/user/home", "/user/calendar", "/user/messages", "/login"]);
    }

    #[test]
    fn view_titles() {
        assert_eq!(View::Login.title(), "Login");
        assert_eq!(View::Home(Role::Admin).title(), "Home Admin");
        assert_eq!(View::Calendar(Role::User).title(), "Calendar User");
    }

    #[test]
    fn view_route_round_trips_through_resolve() {
        for role in Role::ALL {
            for view in [View::Home(role), View::Calendar(role), View::Messages(role)] {
                assert_eq!(resolve(&view.route(), Some(role)), view);
            }
        }
    }

    proptest! {
        #[test]
        fn resolved_view_never_crosses_roles(path in "/[a-z]{0,8}/[a-z]{0,10}", admin in any::<bool>()) {
            let role = if admin { Role::Admin } else { Role::User };
            let view = resolve_path(&path, Some(role));
            prop_assert!(view == View::Login || view.role() == Some(role));
        }

        #[test]
        fn no_session_never_reaches_a_role_view(path in "\\PC{0,30}") {
            prop_assert_eq!(resolve_path(&path, None), View::Login);
        }
    }
}
