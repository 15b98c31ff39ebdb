use adease_cli::api::{ApiError, HttpApi};
use adease_cli::commands::{self, Cli, Command};
use adease_cli::console::Console;
use adease_cli::session::{Session, SessionStore};
use adease_cli::shell;
use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::Parser;
use dialoguer::{Input, Password};
use tracing::Level;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = SessionStore::default_location()?;

    match cli.command {
        Command::Login { email, password } => login(&store, &cli.server, email, password),
        Command::Logout => {
            store.clear().context("Failed to clear session")?;
            println!("Signed out.");
            Ok(())
        }
        Command::Shell => {
            let mut console = open_console(&store, &cli.server)?;
            shell::flush_notices(&mut console);
            shell::run(&mut console)
        }
        Command::Console(command) => {
            let mut console = open_console(&store, &cli.server)?;
            let output = commands::execute(&mut console, command)?;
            print!("{output}");
            shell::flush_notices(&mut console);
            Ok(())
        }
    }
}

fn login(
    store: &SessionStore,
    server: &str,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::<String>::new().with_prompt("Email").interact_text()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let response = match HttpApi::login(server, &email, &password) {
        Ok(response) => response,
        Err(e @ ApiError::Rejected { .. }) => bail!("{e}"),
        Err(e) => return Err(e).context("Sign-in request failed"),
    };

    let session = Session {
        server: server.to_string(),
        token: response.token,
        email: response.email,
        expires_at: response.expires_at,
    };
    store
        .save(&session)
        .with_context(|| format!("Failed to write {}", store.path().display()))?;
    println!("Signed in as {}.", session.email);
    Ok(())
}

/// Load the stored session and fetch both lists.
fn open_console(store: &SessionStore, server: &str) -> Result<Console<HttpApi>> {
    let session = match store.load().context("Failed to read session")? {
        Some(session) if !session.is_expired(Utc::now()) => session,
        Some(_) => bail!("Session expired; run `adease login` again"),
        None => bail!("Not signed in; run `adease login` first"),
    };
    if session.server.trim_end_matches('/') != server.trim_end_matches('/') {
        bail!(
            "Not signed in to {server} (current session is for {}); run `adease login --server {server}`",
            session.server
        );
    }

    let mut console = Console::new(HttpApi::new(&session)?, server);
    console.refresh();
    Ok(console)
}
