//! src/main.rs
//! Line-oriented driver for the remote file browser core: wires config,
//! logging, the HTTP client, and the token store into the event loop, then
//! feeds it commands read from stdin.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use webfs_core::{
    Logger,
    config::Config,
    controller::{actions::Action, event_loop::EventLoop},
    net::request::RequestClient,
    notify::{manager::NotificationManager, surface::PlainSurface},
    remote::file_client::FileClient,
    settings::token::TokenStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    Logger::init_tracing();

    let config = Config::load()
        .await
        .context("failed to load configuration")?;

    let http = RequestClient::new().context("failed to build HTTP client")?;
    let base = reqwest::Url::parse(&config.server.base_url)
        .context("server.base_url is not a valid URL")?;
    let client = FileClient::new(http.clone(), base, config.server.opener_cmd.clone());

    let token_path = match config.token_file.clone() {
        Some(path) => path,
        None => TokenStore::default_path()?,
    };
    let tokens = TokenStore::new(token_path);

    let mut notifier =
        NotificationManager::new(PlainSurface).with_entry_delay(config.notify.entry_delay);
    if let Some(url) = config.notify.template_url.clone() {
        notifier = notifier.with_template_source(http, url);
    }
    notifier.prefetch_template().await;

    let (event_loop, actions) = EventLoop::new(client, notifier, tokens);
    let mut event_loop = event_loop.echo_listings(true);

    info!("browsing {}", config.server.base_url);
    println!("commands: ls | open <name> | nav <index> | rm <name> | quit");

    // Initial listing, like a page listing on mount.
    actions
        .send(Action::Refresh)
        .context("event loop closed before start")?;
    spawn_command_reader(actions);

    event_loop.run().await?;
    info!("exited cleanly");
    Ok(())
}

/// Reads stdin line by line and forwards parsed commands to the event loop.
fn spawn_command_reader(actions: UnboundedSender<Action>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match parse_command(line) {
                        Some(action) => {
                            let quitting = action == Action::Quit;
                            if actions.send(action).is_err() || quitting {
                                return;
                            }
                        }
                        None => warn!("unrecognized command: {line:?}"),
                    }
                }
                // stdin closed or unreadable: shut the loop down.
                Ok(None) | Err(_) => {
                    let _ = actions.send(Action::Quit);
                    return;
                }
            }
        }
    });
}

fn parse_command(line: &str) -> Option<Action> {
    let (command, argument) = line
        .split_once(' ')
        .map(|(c, a)| (c, a.trim()))
        .unwrap_or((line, ""));

    match (command, argument) {
        ("ls" | "refresh", _) => Some(Action::Refresh),
        ("nav", index) => index.parse().ok().map(Action::NavigateTo),
        ("open" | "cd", name) if !name.is_empty() => Some(Action::Activate(name.to_string())),
        ("rm" | "del", name) if !name.is_empty() => Some(Action::Delete(name.to_string())),
        ("quit" | "exit" | "q", _) => Some(Action::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_to_actions() {
        assert_eq!(parse_command("ls"), Some(Action::Refresh));
        assert_eq!(parse_command("nav 2"), Some(Action::NavigateTo(2)));
        assert_eq!(
            parse_command("open docs"),
            Some(Action::Activate("docs".to_string()))
        );
        assert_eq!(
            parse_command("rm a.txt"),
            Some(Action::Delete("a.txt".to_string()))
        );
        assert_eq!(parse_command("q"), Some(Action::Quit));
        assert_eq!(parse_command("nav docs"), None);
        assert_eq!(parse_command("open"), None);
        assert_eq!(parse_command("frobnicate"), None);
    }
}
