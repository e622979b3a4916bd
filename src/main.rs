// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interactive to-do client
//!
//! Logs in through the identity provider's redirect flow and manages the
//! caller's to-do list on the gateway. One command per line on stdin.

use anyhow::Context;
use std::io::Write;
use todo_client::{
    config::Config,
    shell::{Command, Control, Shell},
    App,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured JSON logs on stderr; stdout belongs to the shell
    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;
    let app = App::new(config).context("Failed to resolve gateway URL")?;
    tracing::info!(
        gateway = %app.backend.base_url(),
        same_origin = app.config.is_same_origin(),
        "Starting to-do client"
    );

    let mut shell = Shell::new(app);
    let mut stdout = std::io::stdout();
    writeln!(stdout, "{}", Shell::help())?;
    shell
        .execute(Command::Go("/home".to_string()), &mut stdout)
        .await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(stdout, "{}", e)?;
                continue;
            }
        };

        if shell.execute(command, &mut stdout).await? == Control::Quit {
            break;
        }
    }

    tracing::info!("Shutting down");
    Ok(())
}

fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_client=debug,info")),
        )
        .with(format)
        .init();
}
