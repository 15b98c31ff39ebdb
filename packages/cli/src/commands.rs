//! Command-line surface of the operator console.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use common::ScreenType;
use common::screen::UpdateScreenRequest;
use dialoguer::Confirm;
use tracing::{info, warn};

use crate::api::SignageApi;
use crate::console::Console;
use crate::render;

pub const DEFAULT_SERVER: &str = "http://localhost:3000";

#[derive(Parser, Debug)]
#[command(name = "adease", version, about = "Manage AdEase screens and advertisements")]
pub struct Cli {
    /// Base URL of the AdEase server.
    #[arg(long, global = true, env = "ADEASE_SERVER", default_value = DEFAULT_SERVER)]
    pub server: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the session.
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session.
    Logout,
    /// Interactive shell that keeps the loaded lists between commands.
    Shell,
    #[command(flatten)]
    Console(ConsoleCommand),
}

/// Commands that run against a signed-in console.
#[derive(Subcommand, Debug)]
pub enum ConsoleCommand {
    /// Screen and advertisement totals plus the most recent screens.
    #[clap(aliases = ["d"])]
    Dashboard,
    #[command(subcommand)]
    #[clap(aliases = ["s"])]
    Screens(ScreensCommand),
    #[command(subcommand)]
    #[clap(aliases = ["a"])]
    Ads(AdsCommand),
}

#[derive(Subcommand, Debug)]
pub enum ScreensCommand {
    #[clap(aliases = ["ls"])]
    List,
    /// Register a screen. New screens start inactive.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long = "type", value_parser = parse_screen_type)]
        screen_type: ScreenType,
    },
    /// Flip a screen between active and inactive.
    Toggle { screen: String },
    Activate { screen: String },
    Deactivate { screen: String },
    /// Change a screen's title, location or type.
    Rename {
        screen: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long = "type", value_parser = parse_screen_type)]
        screen_type: Option<ScreenType>,
    },
    #[clap(aliases = ["rm"])]
    Delete {
        screen: String,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdsCommand {
    #[clap(aliases = ["ls"])]
    List,
    /// Upload an image and create an advertisement for it.
    Add {
        #[arg(long)]
        title: String,
        /// Screen identifier or title.
        #[arg(long)]
        screen: String,
        #[arg(long)]
        image: PathBuf,
    },
    #[clap(aliases = ["rm"])]
    Delete {
        id: String,
        #[arg(long, short)]
        yes: bool,
    },
    /// Open the playback page if the advertisement's screen is active.
    Preview {
        id: String,
        /// Print the link instead of opening a browser.
        #[arg(long)]
        no_open: bool,
    },
    /// Print the public playback link.
    Link { id: String },
}

fn parse_screen_type(s: &str) -> Result<ScreenType, String> {
    s.parse().map_err(|e: common::screen::ParseScreenTypeError| e.to_string())
}

fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

/// Run one console command and return the text to print.
///
/// Failures of the remote calls are queued on the console as notices; only
/// terminal interaction errors are returned.
pub fn execute<A: SignageApi>(console: &mut Console<A>, command: ConsoleCommand) -> Result<String> {
    let output = match command {
        ConsoleCommand::Dashboard => render::dashboard(&console.overview()),
        ConsoleCommand::Screens(cmd) => screens_cmd(console, cmd)?,
        ConsoleCommand::Ads(cmd) => ads_cmd(console, cmd)?,
    };
    Ok(output)
}

fn screens_cmd<A: SignageApi>(console: &mut Console<A>, command: ScreensCommand) -> Result<String> {
    match command {
        ScreensCommand::List => return Ok(render::screens_table(console.screens())),
        ScreensCommand::Add {
            title,
            location,
            screen_type,
        } => {
            console.add_screen(&title, &location, screen_type);
        }
        ScreensCommand::Toggle { screen } => {
            console.toggle(&screen);
        }
        ScreensCommand::Activate { screen } => {
            console.set_active(&screen, true);
        }
        ScreensCommand::Deactivate { screen } => {
            console.set_active(&screen, false);
        }
        ScreensCommand::Rename {
            screen,
            title,
            location,
            screen_type,
        } => {
            console.update_screen(
                &screen,
                UpdateScreenRequest {
                    title,
                    location,
                    screen_type,
                },
            );
        }
        ScreensCommand::Delete { screen, yes } => {
            if !confirm("Are you sure you want to delete this screen?", yes)? {
                return Ok("Cancelled.\n".into());
            }
            console.delete_screen(&screen);
        }
    }
    Ok(render::screens_table(console.screens()))
}

fn ads_cmd<A: SignageApi>(console: &mut Console<A>, command: AdsCommand) -> Result<String> {
    match command {
        AdsCommand::List => {}
        AdsCommand::Add {
            title,
            screen,
            image,
        } => {
            console.add_ad(&title, &screen, &image);
        }
        AdsCommand::Delete { id, yes } => {
            if !confirm("Are you sure you want to delete this advertisement?", yes)? {
                return Ok("Cancelled.\n".into());
            }
            console.delete_ad(&id);
        }
        AdsCommand::Preview { id, no_open } => {
            let Some(url) = console.preview(&id) else {
                return Ok(String::new());
            };
            if !no_open {
                info!(%url, "opening preview");
                if let Err(e) = open::that(&url) {
                    warn!(error = %e, "could not launch a browser");
                    return Ok(format!("{url}\n(could not open a browser: {e})\n"));
                }
            }
            return Ok(format!("{url}\n"));
        }
        AdsCommand::Link { id } => return Ok(format!("{}\n", console.playback_link(&id))),
    }
    Ok(render::ads_table(&console.overview().advertisements))
}
