// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `agua shell` command implementation.
//!
//! An interactive REPL over the application: each line is one user action
//! against the current session, and the resulting screen is printed.
//! Several sessions can be open at once to see that they stay isolated.

use agua_config::AguaConfig;
use agua_core::{AguaError, SessionId};
use agua_session::{Body, EventForm, LoginForm, Screen, SessionRegistry};
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::info;

use crate::runtime::Runtime;

const HELP: &str = "\
commands:
  login <username>          log in (password is prompted)
  go <path>                 navigate, e.g. go /admin/calendar
  date <YYYY-MM-DD>         pick the calendar date
  add <title> [| description [| color]]
                            add an event on the selected date
  post                      create a post (admins only)
  show                      redraw the current view
  logout                    end the session
  whoami                    show the session state
  open | close | sessions | use <n>
                            manage parallel sessions
  help                      this text
  quit                      leave the shell";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Login(String),
    Go(String),
    Date(String),
    Add(EventForm),
    Post,
    Show,
    Logout,
    WhoAmI,
    Open,
    Close,
    Sessions,
    Use(usize),
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let need_arg = |usage: &str| -> Result<String, String> {
        if rest.is_empty() {
            Err(format!("usage: {usage}"))
        } else {
            Ok(rest.to_string())
        }
    };

    match head {
        "login" => need_arg("login <username>").map(Command::Login),
        "go" => need_arg("go <path>").map(Command::Go),
        "date" => need_arg("date <YYYY-MM-DD>").map(Command::Date),
        "add" => need_arg("add <title> [| description [| color]]")
            .map(|arg| Command::Add(EventForm::parse(&arg))),
        "post" => Ok(Command::Post),
        "show" => Ok(Command::Show),
        "logout" => Ok(Command::Logout),
        "whoami" => Ok(Command::WhoAmI),
        "open" => Ok(Command::Open),
        "close" => Ok(Command::Close),
        "sessions" => Ok(Command::Sessions),
        "use" => need_arg("use <n>")?
            .parse::<usize>()
            .map(Command::Use)
            .map_err(|_| "usage: use <n>".to_string()),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

/// Plain-text lines for a screen, title first.
fn render_screen(screen: &Screen) -> Vec<String> {
    let mut lines = vec![format!("== {} ==", screen.title)];
    if !screen.nav.is_empty() {
        let nav: Vec<String> = screen
            .nav
            .iter()
            .map(|entry| format!("{} ({})", entry.label, entry.route))
            .collect();
        lines.push(format!("nav: {}", nav.join(" | ")));
    }
    match &screen.body {
        Body::Login { error } => {
            if let Some(error) = error {
                lines.push(format!("! {error}"));
            }
            lines.push("log in with: login <username>".to_string());
        }
        Body::Home { can_post } => {
            if *can_post {
                lines.push("actions: post".to_string());
            }
        }
        Body::Calendar { date, events } => {
            lines.push(format!("date: {date}"));
            if events.is_empty() {
                lines.push("no events".to_string());
            }
            for event in events {
                let mut line = format!("- {}", event.title);
                if let Some(color) = &event.color {
                    line.push_str(&format!(" [{color}]"));
                }
                if !event.description.is_empty() {
                    line.push_str(&format!(": {}", event.description));
                }
                lines.push(line);
            }
        }
        Body::Messages => lines.push("no messages".to_string()),
    }
    lines
}

fn print_screen(screen: &Screen) {
    let mut lines = render_screen(screen).into_iter();
    if let Some(title) = lines.next() {
        println!("{}", title.bold().cyan());
    }
    for line in lines {
        println!("{line}");
    }
}

/// Open sessions in the order they were created, plus which one is active.
struct Sessions {
    registry: SessionRegistry,
    order: Vec<SessionId>,
    current: usize,
}

impl Sessions {
    fn new() -> Self {
        let mut sessions = Self {
            registry: SessionRegistry::new(),
            order: Vec::new(),
            current: 0,
        };
        sessions.open();
        sessions
    }

    fn open(&mut self) -> usize {
        let id = self.registry.open();
        self.order.push(id);
        self.current = self.order.len() - 1;
        self.current
    }

    fn close_current(&mut self) {
        let id = self.order.remove(self.current);
        self.registry.close(&id);
        if self.order.is_empty() {
            self.open();
        } else {
            self.current = self.current.min(self.order.len() - 1);
        }
    }

    fn select(&mut self, index: usize) -> Result<(), AguaError> {
        if index >= self.order.len() {
            return Err(AguaError::not_found("session", index.to_string()));
        }
        self.current = index;
        Ok(())
    }

    fn current_id(&self) -> &SessionId {
        &self.order[self.current]
    }
}

/// Runs the `agua shell` interactive REPL.
pub async fn run_shell(config: &AguaConfig) -> Result<(), AguaError> {
    let runtime = Runtime::start(config).await?;
    let mut sessions = Sessions::new();

    let mut rl = DefaultEditor::new().map_err(|e| AguaError::Internal(e.to_string()))?;

    println!(
        "{}",
        format!("{} shell. Type 'help' for commands, Ctrl+D to exit.", config.app.name)
            .bold()
            .green()
    );
    print_screen(&runtime.app.refresh(current(&mut sessions)?).await?);

    loop {
        let prompt = {
            let session = current(&mut sessions)?;
            format!("{} {}> ", config.app.name.green(), session.route())
        };
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let command = match parse_command(trimmed) {
                    Ok(command) => command,
                    Err(msg) => {
                        eprintln!("{}", msg.yellow());
                        continue;
                    }
                };
                if command == Command::Quit {
                    break;
                }
                if let Err(e) = handle_command(&runtime, &mut sessions, command).await {
                    eprintln!("{}: {e}", "error".red());
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    runtime.shutdown().await?;
    println!("{}", "goodbye".dimmed());
    Ok(())
}

fn current(sessions: &mut Sessions) -> Result<&mut agua_session::Session, AguaError> {
    let id = sessions.current_id().clone();
    sessions
        .registry
        .get_mut(&id)
        .ok_or_else(|| AguaError::not_found("session", id.to_string()))
}

async fn handle_command(
    runtime: &Runtime,
    sessions: &mut Sessions,
    command: Command,
) -> Result<(), AguaError> {
    let app = &runtime.app;
    let screen = match command {
        Command::Login(username) => {
            let password = agua_auth::read_password("Password: ")?;
            let session = current(sessions)?;
            app.login(session, LoginForm::new(username, password)).await?
        }
        Command::Go(path) => app.navigate(current(sessions)?, &path).await?,
        Command::Date(date) => app.select_date(current(sessions)?, &date).await?,
        Command::Add(form) => app.add_event(current(sessions)?, &form).await?,
        Command::Post => {
            let message = app.create_post(current(sessions)?)?;
            println!("{}", message.green());
            return Ok(());
        }
        Command::Show => app.refresh(current(sessions)?).await?,
        Command::Logout => app.logout(current(sessions)?).await?,
        Command::WhoAmI => {
            let session = current(sessions)?;
            println!("session {} is {}", session.id(), session.state());
            return Ok(());
        }
        Command::Open => {
            let index = sessions.open();
            info!(session = index, "session opened");
            app.refresh(current(sessions)?).await?
        }
        Command::Close => {
            sessions.close_current();
            app.refresh(current(sessions)?).await?
        }
        Command::Sessions => {
            for (index, id) in sessions.order.iter().enumerate() {
                let marker = if index == sessions.current { "*" } else { " " };
                let state = sessions
                    .registry
                    .get(id)
                    .map(|s| s.state().to_string())
                    .unwrap_or_default();
                println!("{marker} {index}: {id} {state}");
            }
            return Ok(());
        }
        Command::Use(index) => {
            sessions.select(index)?;
            app.refresh(current(sessions)?).await?
        }
        Command::Help => {
            println!("{HELP}");
            return Ok(());
        }
        Command::Quit => return Ok(()),
    };
    print_screen(&screen);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agua_core::{CalendarEvent, EventDate, EventId, Role, UserId};
    use agua_router::{Route, View, nav_routes};

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(parse_command("login admin"), Ok(Command::Login("admin".into())));
        assert_eq!(
            parse_command("  go   /user/calendar "),
            Ok(Command::Go("/user/calendar".into()))
        );
        assert_eq!(parse_command("use 2"), Ok(Command::Use(2)));
        assert_eq!(parse_command("exit"), Ok(Command::Quit));
    }

    #[test]
    fn add_splits_event_fields() {
        let Ok(Command::Add(form)) = parse_command("add Standup | daily | blue") else {
            panic!("expected add");
        };
        assert_eq!(form.title, "Standup");
        assert_eq!(form.description, "daily");
        assert_eq!(form.color.as_deref(), Some("blue"));
    }

    #[test]
    fn missing_arguments_and_unknown_commands_are_rejected() {
        assert!(parse_command("login").unwrap_err().starts_with("usage"));
        assert!(parse_command("use x").is_err());
        assert!(parse_command("dance").unwrap_err().contains("unknown command"));
    }

    #[test]
    fn renders_login_error() {
        let screen = Screen {
            view: View::Login,
            title: View::Login.title(),
            nav: vec![],
            body: Body::Login {
                error: Some("invalid credentials".into()),
            },
        };
        let lines = render_screen(&screen);
        assert_eq!(lines[0], "== Login ==");
        assert!(lines.contains(&"! invalid credentials".to_string()));
    }

    #[test]
    fn renders_calendar_with_nav_and_events() {
        let view = View::Calendar(Role::User);
        let screen = Screen {
            view,
            title: view.title(),
            nav: nav_routes(Role::User),
            body: Body::Calendar {
                date: EventDate::parse("2025-03-01").unwrap(),
                events: vec![CalendarEvent {
                    id: EventId(1),
                    date: EventDate::parse("2025-03-01").unwrap(),
                    title: "Dentist".into(),
                    description: "10am".into(),
                    color: Some("red".into()),
                    owner: UserId(2),
                }],
            },
        };
        let lines = render_screen(&screen);
        assert!(lines[1].starts_with("nav: "));
        assert!(lines[1].contains(&Route::Calendar(Role::User).to_string()));
        assert!(lines.contains(&"date: 2025-03-01".to_string()));
        assert!(lines.contains(&"- Dentist [red]: 10am".to_string()));
    }

    #[test]
    fn renders_empty_calendar() {
        let view = View::Calendar(Role::Admin);
        let screen = Screen {
            view,
            title: view.title(),
            nav: nav_routes(Role::Admin),
            body: Body::Calendar {
                date: EventDate::parse("2025-03-01").unwrap(),
                events: vec![],
            },
        };
        assert_eq!(render_screen(&screen).last().unwrap(), "no events");
    }

    #[test]
    fn sessions_open_close_and_select() {
        let mut sessions = Sessions::new();
        assert_eq!(sessions.order.len(), 1);
        assert_eq!(sessions.open(), 1);
        assert!(sessions.select(5).is_err());
        sessions.select(0).unwrap();
        sessions.close_current();
        assert_eq!(sessions.order.len(), 1);
        assert_eq!(sessions.registry.len(), 1);
        sessions.close_current();
        assert_eq!(sessions.order.len(), 1, "closing the last session opens a fresh one");
    }
}
