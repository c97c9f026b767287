// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The application dispatcher.
//!
//! Every handler takes the caller's [`Session`] explicitly, applies one user
//! action to completion and returns the [`Screen`] to show next. The app
//! holds no per-connection state of its own.

use std::sync::Arc;

use agua_auth::Authenticator;
use agua_core::{AguaError, CalendarEvent, EventDate, EventStore, Role};
use agua_router::{NavEntry, Route, View, home_route, nav_routes, resolve};
use tracing::{debug, info, warn};

use crate::forms::{EventForm, LoginForm};
use crate::session::Session;

/// Confirmation shown after the admin "create post" action.
pub const POST_CREATED: &str = "Post created successfully!";

/// Content specific to each view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Login form, with the inline error from a failed attempt.
    Login { error: Option<String> },
    /// Landing view. Admins get the "create post" action.
    Home { can_post: bool },
    /// Events the session owner created on `date`.
    Calendar {
        date: EventDate,
        events: Vec<CalendarEvent>,
    },
    /// Inbox placeholder.
    Messages,
}

/// What the presentation layer should draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub view: View,
    pub title: String,
    /// Empty on the login view.
    pub nav: Vec<NavEntry>,
    pub body: Body,
}

/// Ties the authenticator, the event store and the router together.
#[derive(Clone)]
pub struct App {
    authenticator: Arc<Authenticator>,
    events: Arc<dyn EventStore>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("authenticator", &self.authenticator)
            .field("events", &self.events.name())
            .finish()
    }
}

impl App {
    pub fn new(authenticator: Arc<Authenticator>, events: Arc<dyn EventStore>) -> Self {
        Self {
            authenticator,
            events,
        }
    }

    pub fn authenticator(&self) -> &Arc<Authenticator> {
        &self.authenticator
    }

    /// Submit the login form.
    ///
    /// Bad credentials are not an error here: the login view comes back with
    /// a generic inline message and any identity the session held is
    /// dropped. Storage failures still propagate.
    pub async fn login(&self, session: &mut Session, form: LoginForm) -> Result<Screen, AguaError> {
        match self
            .authenticator
            .verify(form.username.trim(), &form.password)
            .await
        {
            Ok(identity) => {
                session.begin(identity);
                self.show(session, home_route(identity.role)).await
            }
            Err(AguaError::AuthFailure) => {
                session.end();
                session.set_route(Route::Login);
                Ok(login_screen(Some(AguaError::AuthFailure.to_string())))
            }
            Err(e) => Err(e),
        }
    }

    /// Navigate to `path`. Navigating to `/login` logs the session out.
    pub async fn navigate(&self, session: &mut Session, path: &str) -> Result<Screen, AguaError> {
        let route = Route::parse(path);
        if route == Route::Login {
            session.end();
        }
        self.show(session, route).await
    }

    /// Log out and show the login view. Safe to call when logged out.
    pub async fn logout(&self, session: &mut Session) -> Result<Screen, AguaError> {
        self.navigate(session, agua_router::LOGIN_PATH).await
    }

    /// Re-render the view the session is on.
    pub async fn refresh(&self, session: &mut Session) -> Result<Screen, AguaError> {
        let route = session.route().clone();
        self.show(session, route).await
    }

    /// Pick the calendar date and show the calendar.
    pub async fn select_date(&self, session: &mut Session, date: &str) -> Result<Screen, AguaError> {
        let identity = session.current()?;
        let date = EventDate::parse(date.trim())?;
        session.select_date(date);
        debug!(session_id = %session.id(), date = %date, "date selected");
        self.show(session, Route::Calendar(identity.role)).await
    }

    /// Create an event on the selected date, owned by the session's user,
    /// and show the refreshed calendar.
    pub async fn add_event(&self, session: &mut Session, form: &EventForm) -> Result<Screen, AguaError> {
        let identity = session.current()?;
        let event = form.to_new_event(session.selected_date(), identity.user_id)?;
        let stored = self.events.create_event(&event).await?;
        info!(
            event_id = %stored.id,
            owner = %stored.owner,
            date = %stored.date,
            "event created"
        );
        self.show(session, Route::Calendar(identity.role)).await
    }

    /// The admin "create post" action. Nothing is persisted.
    pub fn create_post(&self, session: &Session) -> Result<&'static str, AguaError> {
        let identity = session.current()?;
        if identity.role != Role::Admin {
            warn!(user_id = %identity.user_id, "non-admin attempted to post");
            return Err(AguaError::Forbidden(
                "only admins can create posts".to_string(),
            ));
        }
        Ok(POST_CREATED)
    }

    async fn show(&self, session: &mut Session, route: Route) -> Result<Screen, AguaError> {
        let view = resolve(&route, session.role());
        session.set_route(view.route());
        self.render(session, view).await
    }

    async fn render(&self, session: &Session, view: View) -> Result<Screen, AguaError> {
        let body = match view {
            View::Login => return Ok(login_screen(None)),
            View::Home(role) => Body::Home {
                can_post: role == Role::Admin,
            },
            View::Calendar(_) => {
                let identity = session.current()?;
                let date = session.selected_date();
                let events = self.events.list_for_date(date, identity.user_id).await?;
                Body::Calendar { date, events }
            }
            View::Messages(_) => Body::Messages,
        };
        let nav = view.role().map(nav_routes).unwrap_or_default();
        Ok(Screen {
            view,
            title: view.title(),
            nav,
            body,
        })
    }
}

fn login_screen(error: Option<String>) -> Screen {
    Screen {
        view: View::Login,
        title: View::Login.title(),
        nav: Vec::new(),
        body: Body::Login { error },
    }
}
