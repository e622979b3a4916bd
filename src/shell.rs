// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Line-oriented runtime for the client.
//!
//! The shell owns the [`App`], parses one command per line, executes the
//! navigation effects returned by views and the router, and renders the
//! current view as plain text.

use crate::models::Todo;
use crate::routes::{Navigation, NavigationOutcome, Route};
use crate::time_utils::format_utc_rfc3339;
use crate::App;
use std::io::{self, Write};

const HELP: &str = "\
Commands:
  go <path>                   open a view (/home, /user, /todo, /auth/login)
  login                       start the identity provider login
  callback <url|fragment>     finish login with the URL the provider redirected to
  add <title> [| <desc>]      add a to-do (to-do view)
  complete <n>                mark to-do number n as complete (to-do view)
  delete <n>                  delete to-do number n (to-do view)
  logout                      end the session
  status                      show session state
  help                        show this help
  quit                        exit";

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(String),
    Login,
    Callback(String),
    Add { title: String, description: String },
    Complete(usize),
    Delete(usize),
    Logout,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown command: {0} (try 'help')")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(v, r)| (v, r.trim()))
            .unwrap_or((line, ""));

        let command = match verb.to_ascii_lowercase().as_str() {
            "go" | "open" => {
                if rest.is_empty() {
                    return Err(ParseError::Usage("go <path>"));
                }
                match rest.split_once('#') {
                    Some((path, fragment)) if Route::from_path(path) == Some(Route::Callback) => {
                        Command::Callback(fragment.to_string())
                    }
                    _ => Command::Go(rest.to_string()),
                }
            }
            "login" => Command::Login,
            "callback" => {
                if rest.is_empty() {
                    return Err(ParseError::Usage("callback <url|fragment>"));
                }
                Command::Callback(rest.to_string())
            }
            "add" => {
                let (title, description) = rest.split_once('|').unwrap_or((rest, ""));
                Command::Add {
                    title: title.trim().to_string(),
                    description: description.trim().to_string(),
                }
            }
            "complete" | "done" => Command::Complete(
                parse_index(rest).ok_or(ParseError::Usage("complete <n>"))?,
            ),
            "delete" | "rm" => {
                Command::Delete(parse_index(rest).ok_or(ParseError::Usage("delete <n>"))?)
            }
            "logout" => Command::Logout,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_index(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok().filter(|n| *n > 0)
}

/// Whether the shell should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Runtime executing commands against the application.
pub struct Shell {
    app: App,
}

impl Shell {
    pub fn new(app: App) -> Self {
        Self { app }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn help() -> &'static str {
        HELP
    }

    /// Run one command, writing any output to `out`.
    pub async fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<Control> {
        match command {
            Command::Go(path) => match Route::from_path(&path) {
                Some(route) => self.apply(Navigation::Route(route), out).await?,
                None => writeln!(out, "No such view: {}", path)?,
            },
            Command::Login => {
                let nav = self.app.home.on_login();
                self.apply(nav, out).await?;
            }
            Command::Callback(fragment) => {
                self.app.router.navigate(Route::Callback);
                let nav = self.app.callback.on_enter(&fragment);
                self.apply(nav, out).await?;
            }
            Command::Add { title, description } => {
                if self.require_todo_view(out)? {
                    self.app.todo.title = title;
                    self.app.todo.description = description;
                    if let Err(e) = self.app.todo.add_todo().await {
                        writeln!(out, "Could not add to-do: {}", e)?;
                    }
                    self.render_todo(out)?;
                }
            }
            Command::Complete(n) => {
                if let Some(todo) = self.pick_todo(n, out)? {
                    if let Err(e) = self.app.todo.complete_todo(&todo).await {
                        writeln!(out, "Could not complete to-do: {}", e)?;
                    }
                    self.render_todo(out)?;
                }
            }
            Command::Delete(n) => {
                if let Some(todo) = self.pick_todo(n, out)? {
                    if let Err(e) = self.app.todo.delete_todo(&todo).await {
                        writeln!(out, "Could not delete to-do: {}", e)?;
                    }
                    self.render_todo(out)?;
                }
            }
            Command::Logout => {
                let nav = self.app.user.on_logout().await;
                let return_to = self
                    .app
                    .config
                    .callback_origin()
                    .map(|origin| format!("{}{}", origin, Route::Home))
                    .unwrap_or_else(|_| Route::Home.path().to_string());
                writeln!(out, "Logged out.")?;
                writeln!(
                    out,
                    "To also end the identity provider session, open:\n  {}",
                    self.app.auth.logout_url(&return_to)
                )?;
                self.apply(nav, out).await?;
            }
            Command::Status => self.render_status(out).await?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Control::Quit),
        }

        Ok(Control::Continue)
    }

    /// Execute a navigation effect until nothing is left to do.
    async fn apply<W: Write>(&mut self, navigation: Navigation, out: &mut W) -> io::Result<()> {
        let mut next = navigation;
        loop {
            next = match next {
                Navigation::Stay => return Ok(()),
                Navigation::External(url) => {
                    writeln!(out, "Open this URL in your browser to log in:\n  {}", url)?;
                    writeln!(
                        out,
                        "When the browser lands on the callback page, run: callback <url>"
                    )?;
                    return Ok(());
                }
                Navigation::Route(route) => match self.app.router.navigate(route) {
                    NavigationOutcome::Entered(route) => self.enter(route, out).await?,
                    NavigationOutcome::Blocked(effect) => {
                        if effect == Navigation::Stay {
                            writeln!(
                                out,
                                "{} requires login, which is already in progress.",
                                route
                            )?;
                            writeln!(
                                out,
                                "Finish it with: callback <url> (run 'login' to see the URL again)"
                            )?;
                        } else {
                            writeln!(out, "{} requires login.", route)?;
                        }
                        effect
                    }
                    NavigationOutcome::Redirect(effect) => effect,
                },
            };
        }
    }

    /// Run a view's entry logic and render it.
    async fn enter<W: Write>(&mut self, route: Route, out: &mut W) -> io::Result<Navigation> {
        match route {
            Route::Home => self.render_home(out)?,
            Route::Callback => return Ok(self.app.callback.on_enter("")),
            Route::Login => return Ok(self.app.home.on_login()),
            Route::User => {
                if let Err(e) = self.app.user.load().await {
                    writeln!(out, "Could not load profile: {}", e)?;
                }
                self.render_user(out)?;
            }
            Route::Todo => {
                if let Err(e) = self.app.todo.load().await {
                    writeln!(out, "Could not load to-do list: {}", e)?;
                }
                self.render_todo(out)?;
            }
        }
        Ok(Navigation::Stay)
    }

    fn require_todo_view<W: Write>(&self, out: &mut W) -> io::Result<bool> {
        if self.app.router.current() == Route::Todo {
            return Ok(true);
        }
        writeln!(out, "Open the to-do list first: go /todo")?;
        Ok(false)
    }

    /// Look up to-do number `n` (active first, then completed).
    fn pick_todo<W: Write>(&self, n: usize, out: &mut W) -> io::Result<Option<Todo>> {
        if !self.require_todo_view(out)? {
            return Ok(None);
        }
        let todo = self
            .app
            .todo
            .active()
            .iter()
            .chain(self.app.todo.completed())
            .nth(n - 1)
            .cloned();
        if todo.is_none() {
            writeln!(out, "No to-do number {}", n)?;
        }
        Ok(todo)
    }

    fn render_home<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "== Home ==")?;
        if let Some(e) = self.app.home.take_login_error() {
            writeln!(out, "Login failed: {}", e)?;
        }
        if self.app.home.is_logged_in() {
            writeln!(out, "You are logged in. Try: go /user, go /todo")?;
        } else {
            writeln!(out, "You are not logged in. Try: login")?;
        }
        Ok(())
    }

    fn render_user<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let user = self.app.user.user();
        writeln!(out, "== User ==")?;
        writeln!(out, "  username: {}", user.username)?;
        writeln!(out, "  nickname: {}", user.nickname)?;
        writeln!(out, "  picture:  {}", user.picture)?;
        writeln!(out, "  updated:  {}", user.updated_at)?;
        Ok(())
    }

    fn render_todo<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let active = self.app.todo.active();
        let completed = self.app.todo.completed();

        writeln!(out, "== To-do ==")?;
        if active.is_empty() && completed.is_empty() {
            writeln!(out, "  (nothing yet, try: add <title> | <description>)")?;
            return Ok(());
        }
        for (i, todo) in active.iter().enumerate() {
            writeln!(out, "  {:>3}. [ ] {}", i + 1, describe(todo))?;
        }
        for (i, todo) in completed.iter().enumerate() {
            writeln!(out, "  {:>3}. [x] {}", active.len() + i + 1, describe(todo))?;
        }
        Ok(())
    }

    async fn render_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let session = &self.app.session;
        writeln!(out, "view:          {}", self.app.router.current())?;
        writeln!(out, "session valid: {}", session.is_valid())?;
        if let Some(expires_at) = session.expires_at() {
            writeln!(out, "expires at:    {}", format_utc_rfc3339(expires_at))?;
        }
        writeln!(out, "login pending: {}", self.app.auth.login_in_flight())?;
        writeln!(out, "gateway:       {}", self.app.backend.base_url())?;
        match self.app.backend.check_auth().await {
            Ok(authorized) => writeln!(out, "gateway auth:  {}", authorized)?,
            Err(e) => writeln!(out, "gateway auth:  unavailable ({})", e)?,
        }
        Ok(())
    }
}

fn describe(todo: &Todo) -> String {
    if todo.description.is_empty() {
        todo.title.clone()
    } else {
        format!("{} - {}", todo.title, todo.description)
    }
}
