// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Strict route parsing.
//!
//! A path is parsed whole into a [`Route`]; nothing is matched by substring.
//! One trailing slash is tolerated and any query string or fragment is
//! dropped before parsing.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use agua_core::Role;

/// Path of the login view.
pub const LOGIN_PATH: &str = "/login";

/// A parsed navigation target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/login`
    Login,
    /// `/{role}/home`
    Home(Role),
    /// `/{role}/calendar`
    Calendar(Role),
    /// `/{role}/messages`
    Messages(Role),
    /// `/{role}/{section}` for any other non-empty section, possibly
    /// spanning several segments (`calendar/2025`).
    Other { role: Role, section: String },
    /// Anything else, kept verbatim.
    Unknown(String),
}

impl Route {
    /// Parse a path. Never fails; unparseable input becomes [`Route::Unknown`].
    pub fn parse(path: &str) -> Self {
        let trimmed = normalize(path);
        if trimmed == LOGIN_PATH {
            return Route::Login;
        }

        let Some(rest) = trimmed.strip_prefix('/') else {
            return Route::Unknown(path.to_string());
        };
        let Some((role, section)) = rest.split_once('/') else {
            return Route::Unknown(path.to_string());
        };
        let Ok(role) = Role::from_str(role) else {
            return Route::Unknown(path.to_string());
        };
        if section.split('/').any(str::is_empty) {
            return Route::Unknown(path.to_string());
        }

        match section {
            "home" => Route::Home(role),
            "calendar" => Route::Calendar(role),
            "messages" => Route::Messages(role),
            other => Route::Other {
                role,
                section: other.to_string(),
            },
        }
    }

    /// The role namespace this route lives under, if any.
    pub fn role(&self) -> Option<Role> {
        match self {
            Route::Home(role) | Route::Calendar(role) | Route::Messages(role) => Some(*role),
            Route::Other { role, .. } => Some(*role),
            Route::Login | Route::Unknown(_) => None,
        }
    }
}

/// Drop the query string and fragment, then one trailing slash.
fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => path,
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => f.write_str(LOGIN_PATH),
            Route::Home(role) => write!(f, "/{role}/home"),
            Route::Calendar(role) => write!(f, "/{role}/calendar"),
            Route::Messages(role) => write!(f, "/{role}/messages"),
            Route::Other { role, section } => write!(f, "/{role}/{section}"),
            Route::Unknown(path) => f.write_str(path),
        }
    }
}

impl FromStr for Route {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Route {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_known_sections() {
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/admin/home"), Route::Home(Role::Admin));
        assert_eq!(Route::parse("/user/calendar"), Route::Calendar(Role::User));
        assert_eq!(Route::parse("/admin/messages"), Route::Messages(Role::Admin));
    }

    #[test]
    fn other_sections_keep_their_name() {
        assert_eq!(
            Route::parse("/admin/whatever"),
            Route::Other {
                role: Role::Admin,
                section: "whatever".to_string()
            }
        );
    }

    #[test]
    fn nested_sections_stay_in_the_role_namespace() {
        assert_eq!(
            Route::parse("/admin/calendar/2025"),
            Route::Other {
                role: Role::Admin,
                section: "calendar/2025".to_string()
            }
        );
        assert_eq!(Route::parse("/user/a/b/").role(), Some(Role::User));
        assert_eq!(
            Route::parse("/user/a//b"),
            Route::Unknown("/user/a//b".to_string())
        );
    }

    #[test]
    fn trailing_slash_and_query_are_ignored() {
        assert_eq!(Route::parse("/admin/home/"), Route::Home(Role::Admin));
        assert_eq!(Route::parse("/login/"), Route::Login);
        assert_eq!(
            Route::parse("/user/calendar?date=2025-01-01"),
            Route::Calendar(Role::User)
        );
        assert_eq!(Route::parse("/user/home#top"), Route::Home(Role::User));
    }

    #[test]
    fn substrings_do_not_match() {
        // Containment of a known path is not enough.
        for path in [
            "/x/admin/home",
            "/admin/home/extra",
            "admin/home",
            "/admin/homepage",
            "/Admin/home",
            "/login/again",
            "/",
            "",
            "/admin",
            "/admin//",
        ] {
            let route = Route::parse(path);
            assert!(
                !matches!(route, Route::Home(_) | Route::Login),
                "{path:?} parsed as {route:?}"
            );
        }
    }

    #[test]
    fn unknown_keeps_original_text() {
        assert_eq!(
            Route::parse("/nowhere/at/all"),
            Route::Unknown("/nowhere/at/all".to_string())
        );
    }

    #[test]
    fn role_of_route() {
        assert_eq!(Route::parse("/user/messages").role(), Some(Role::User));
        assert_eq!(Route::parse("/admin/xyz").role(), Some(Role::Admin));
        assert_eq!(Route::Login.role(), None);
        assert_eq!(Route::parse("/root/home").role(), None);
    }

    fn role_strategy() -> impl Strategy<Value = Role> {
        prop_oneof![Just(Role::Admin), Just(Role::User)]
    }

    fn known_route() -> impl Strategy<Value = Route> {
        prop_oneof![
            Just(Route::Login),
            role_strategy().prop_map(Route::Home),
            role_strategy().prop_map(Route::Calendar),
            role_strategy().prop_map(Route::Messages),
            (role_strategy(), "[a-z][a-z0-9_-]{0,12}(/[a-z0-9_-]{1,8}){0,2}")
                .prop_filter("reserved sections", |(_, s)| {
                    !matches!(s.as_str(), "home" | "calendar" | "messages")
                })
                .prop_map(|(role, section)| Route::Other { role, section }),
        ]
    }

    proptest! {
        #[test]
        fn display_parses_back(route in known_route()) {
            prop_assert_eq!(Route::parse(&route.to_string()), route);
        }

        #[test]
        fn parse_never_panics(path in "\\PC{0,40}") {
            let _ = Route::parse(&path);
        }
    }
}
