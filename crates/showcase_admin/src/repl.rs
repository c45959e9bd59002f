use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime};
use showcase_client::{AdminConsole, ApiError, ApiSettings, ReqwestApi};
use showcase_core::AnnotatedEntry;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::settings::ConsoleSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Login { username: String, password: String },
    Logout,
    Sync,
    List,
    Excluded,
    Add { name: String },
    Remove { name: String },
    Messages,
    Help,
    Quit,
}

pub(crate) async fn run(settings: ConsoleSettings) -> Result<()> {
    let base_url = Url::parse(&settings.base_url)?;
    let api = ReqwestApi::new(
        base_url,
        ApiSettings {
            connect_timeout: settings.connect_timeout(),
            request_timeout: settings.request_timeout(),
        },
    )?;
    let mut console = AdminConsole::new(api, settings.include_forks);

    println!("Portfolio admin console. Type 'help' for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(&console)?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => execute(&mut console, command).await,
            Err(usage) => println!("{usage}"),
        }
    }
    Ok(())
}

fn prompt(console: &AdminConsole<ReqwestApi>) -> Result<()> {
    let who = if console.is_authenticated() {
        "admin"
    } else {
        "guest"
    };
    print!("{who}> ");
    std::io::stdout().flush()?;
    Ok(())
}

fn parse(line: &str) -> std::result::Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let command = match verb {
        "login" => {
            let mut parts = rest.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some(username), Some(password)) => Command::Login {
                    username: username.to_string(),
                    password: password.to_string(),
                },
                _ => return Err("usage: login <username> <password>".to_string()),
            }
        }
        "logout" => Command::Logout,
        "sync" => Command::Sync,
        "list" => Command::List,
        "excluded" => Command::Excluded,
        "add" => Command::Add {
            name: rest.to_string(),
        },
        "remove" | "rm" => Command::Remove {
            name: rest.to_string(),
        },
        "messages" => Command::Messages,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{other}', type 'help'")),
    };
    Ok(Some(command))
}

/// Runs one command with a ctrl-c escape hatch: the token cancels the
/// in-flight call instead of killing the console.
async fn execute(console: &mut AdminConsole<ReqwestApi>, command: Command) {
    let cancel = CancellationToken::new();
    let watcher = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let outcome = dispatch(console, command, &cancel).await;
    watcher.abort();
    if let Err(err) = outcome {
        println!("error: {err}");
    }
}

async fn dispatch(
    console: &mut AdminConsole<ReqwestApi>,
    command: Command,
    cancel: &CancellationToken,
) -> std::result::Result<(), ApiError> {
    match command {
        Command::Login { username, password } => {
            console.login(&username, &password).await?;
            println!("logged in as {username}");
            // The original panel syncs straight after a login.
            run_sync(console, cancel).await?;
        }
        Command::Logout => {
            console.logout();
            println!("logged out");
        }
        Command::Sync => run_sync(console, cancel).await?,
        Command::List => {
            if console.catalog().is_empty() {
                println!("catalog is empty, try 'sync'");
            }
            for row in console.annotated() {
                println!("{}", catalog_line(&row));
            }
        }
        Command::Excluded => {
            if console.exclusions().is_empty() {
                println!("nothing is excluded");
            }
            for name in console.exclusions().names() {
                println!("{name}");
            }
        }
        Command::Add { name } => {
            let message = console.add_entry(&name, cancel).await?;
            println!("{message}");
        }
        Command::Remove { name } => {
            let message = console.remove_entry(&name, cancel).await?;
            println!("{message}");
        }
        Command::Messages => {
            if console.messages().is_empty() {
                println!("no contact messages, try 'sync'");
            }
            for message in console.messages() {
                println!(
                    "{} {} <{}>",
                    format_timestamp(&message.timestamp),
                    message.name,
                    message.email
                );
                println!("  {}", message.subject);
                println!("  {}", message.body);
            }
        }
        Command::Help => print_help(),
        Command::Quit => {}
    }
    Ok(())
}

async fn run_sync(
    console: &mut AdminConsole<ReqwestApi>,
    cancel: &CancellationToken,
) -> std::result::Result<(), ApiError> {
    let warnings = console.refresh(cancel).await?;
    println!(
        "synced: {} catalog entries, {} excluded, {} messages",
        console.catalog().len(),
        console.exclusions().len(),
        console.messages().len()
    );
    for warning in warnings {
        println!("warning: {warning}");
    }
    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  login <username> <password>  authenticate and sync");
    println!("  logout                       drop the session and caches");
    println!("  sync                         refresh catalog, exclusions and messages");
    println!("  list                         catalog with exclusion marks");
    println!("  excluded                     current exclusion set");
    println!("  add <name>                   exclude a project by name");
    println!("  remove <name>                stop excluding a project");
    println!("  messages                     contact messages");
    println!("  quit                         leave the console");
}

fn catalog_line(row: &AnnotatedEntry) -> String {
    let mark = if row.excluded { "x" } else { " " };
    format!("[{mark}] {:<30} {}", row.entry.name, row.entry.description)
}

fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    // The server writes naive ISO timestamps without an offset.
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}
