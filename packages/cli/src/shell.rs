//! Interactive console session.
//!
//! One [`Console`] lives for the whole session, so lists that loaded once stay
//! visible when a later refresh fails.

use anyhow::Result;
use clap::{Parser, Subcommand};
use dialoguer::Input;
use tracing::{debug, warn};

use crate::api::SignageApi;
use crate::commands::{self, ConsoleCommand};
use crate::console::{Console, Notice};
use crate::render;

#[derive(Parser, Debug)]
#[command(no_binary_name = true, name = "adease>", disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    #[command(flatten)]
    Console(ConsoleCommand),
    /// Reload screens and advertisements.
    Refresh,
    /// Leave the shell.
    #[clap(aliases = ["quit", "q"])]
    Exit,
}

/// Parse one input line. Blank lines yield `Ok(None)`; errors carry the
/// rendered usage text.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, String> {
    let words = shlex::split(line).ok_or_else(|| "unbalanced quotes".to_string())?;
    if words.is_empty() {
        return Ok(None);
    }
    ShellLine::try_parse_from(words)
        .map(|l| Some(l.command))
        .map_err(|e| e.render().to_string())
}

/// Print and clear the console's queued notices.
pub fn flush_notices<A: SignageApi>(console: &mut Console<A>) {
    for notice in console.drain_notices() {
        eprintln!("{}", render::notice(&notice));
    }
}

/// Whether the shell keeps reading after a line.
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    Exit,
}

/// Handle one input line with `exec` running console commands.
///
/// Command errors become notices so the loaded lists survive them.
pub fn handle_line<A, F>(console: &mut Console<A>, line: &str, exec: F) -> Step
where
    A: SignageApi,
    F: FnOnce(&mut Console<A>, ConsoleCommand) -> Result<String>,
{
    match parse_line(line) {
        Ok(None) => {}
        Ok(Some(ShellCommand::Exit)) => return Step::Exit,
        Ok(Some(ShellCommand::Refresh)) => {
            console.refresh();
        }
        Ok(Some(ShellCommand::Console(command))) => match exec(console, command) {
            Ok(output) => print!("{output}"),
            Err(e) => {
                warn!(error = %e, "command failed");
                console.notify(Notice::Error(format!("{e:#}")));
            }
        },
        Err(usage) => eprintln!("{usage}"),
    }
    Step::Continue
}

pub fn run<A: SignageApi>(console: &mut Console<A>) -> Result<()> {
    println!("Type `help` for commands, `exit` to leave.");
    loop {
        let line = match Input::<String>::new()
            .with_prompt("adease")
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(e) => {
                debug!(error = %e, "input closed");
                break;
            }
        };

        let step = handle_line(console, &line, commands::execute);
        flush_notices(console);
        if step == Step::Exit {
            break;
        }
    }
    Ok(())
}
