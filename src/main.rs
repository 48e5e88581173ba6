//! CLI adapter — wires commands to the core services.
//!
//! DESIGN
//! ======
//! Thin by intent: every operation lives in `services`, `llm`, `html` or
//! `state`; this file only parses arguments, loads settings, renders
//! output and turns errors into one-line status messages. Nothing here is
//! covered by the test suite.

mod html;
mod llm;
mod services;
mod state;

use clap::{Parser, Subcommand};

use llm::{AzureOpenAiClient, Transport};
use services::settings::SettingsStore;
use services::token::{Severity, token_status};
use services::workitem::{WorkItem, extract_dropped_url, fetch_work_item};
use services::{clipboard, respond};
use state::Session;

#[derive(Parser)]
#[command(
    name = "dcrgen",
    version,
    about = "Draft customer-friendly DCR rejection responses from tracked work items"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show or update the saved settings record.
    Settings {
        /// Organization base URL of the tracking service.
        #[arg(long)]
        org_url: Option<String>,
        /// Personal access token for the tracking service.
        #[arg(long)]
        access_token: Option<String>,
        /// Azure OpenAI endpoint URL.
        #[arg(long)]
        ai_endpoint: Option<String>,
        /// Azure OpenAI deployment name.
        #[arg(long)]
        ai_deployment: Option<String>,
        /// Azure OpenAI bearer token (from `az account get-access-token`).
        #[arg(long)]
        ai_token: Option<String>,
    },

    /// Show freshness of the saved AI token.
    Token,

    /// Fetch a work item and display its fields.
    Fetch {
        /// Work-item edit link; omit to paste one on stdin.
        url: Option<String>,
    },

    /// Fetch a work item and draft a rejection response for it.
    Generate {
        /// Work-item edit link; omit to paste one on stdin.
        url: Option<String>,
        /// Additional context from the support engineer.
        #[arg(long, default_value = "")]
        notes: String,
        /// Send the chat request through the pass-through relay instead
        /// of directly to the endpoint.
        #[arg(long)]
        relay: bool,
        /// Skip the clipboard; leave the response on stdout only.
        #[arg(long)]
        no_copy: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    if let Err(message) = run(Cli::parse()).await {
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let store = SettingsStore::default_location().map_err(|e| e.to_string())?;

    match cli.command {
        Command::Settings { org_url, access_token, ai_endpoint, ai_deployment, ai_token } => {
            cmd_settings(&store, org_url, access_token, ai_endpoint, ai_deployment, ai_token)
        }
        Command::Token => {
            let settings = store.load_with_env().map_err(|e| e.to_string())?;
            show_token_status(&settings.ai_token);
            Ok(())
        }
        Command::Fetch { url } => {
            let settings = store.load_with_env().map_err(|e| e.to_string())?;
            let mut session = Session::new(settings);
            let url = resolve_url(url)?;

            let outcome = fetch_work_item(&url, &session.settings).await;
            let item = session.record_fetch(outcome).map_err(|e| e.to_string())?;
            print_work_item(item);
            Ok(())
        }
        Command::Generate { url, notes, relay, no_copy } => {
            let settings = store.load_with_env().map_err(|e| e.to_string())?;
            let mut session = Session::new(settings);
            let url = resolve_url(url)?;

            let outcome = fetch_work_item(&url, &session.settings).await;
            let item = session.record_fetch(outcome).map_err(|e| e.to_string())?.clone();
            print_work_item(&item);

            let transport = if relay { Transport::relay() } else { Transport::Direct };
            let client = AzureOpenAiClient::from_settings(&session.settings, transport)
                .map_err(|e| e.to_string())?;

            let outcome = respond::generate(&item, &notes, &client).await;
            let response = session
                .record_response(outcome)
                .map_err(|e| e.to_string())?
                .to_owned();

            println!("\n{response}");
            if !no_copy {
                if clipboard::copy(&response) {
                    eprintln!("Copied to clipboard!");
                } else {
                    eprintln!("Clipboard unavailable - select the text above to copy manually.");
                }
            }
            Ok(())
        }
    }
}

fn cmd_settings(
    store: &SettingsStore,
    org_url: Option<String>,
    access_token: Option<String>,
    ai_endpoint: Option<String>,
    ai_deployment: Option<String>,
    ai_token: Option<String>,
) -> Result<(), String> {
    let mut settings = store.load().map_err(|e| e.to_string())?;

    let mut changed = false;
    let mut apply = |slot: &mut String, value: Option<String>| {
        if let Some(value) = value {
            *slot = value;
            changed = true;
        }
    };
    apply(&mut settings.org_url, org_url);
    apply(&mut settings.access_token, access_token);
    apply(&mut settings.ai_endpoint, ai_endpoint);
    apply(&mut settings.ai_deployment, ai_deployment);
    apply(&mut settings.ai_token, ai_token);

    if changed {
        settings = store.save(&settings).map_err(|e| e.to_string())?;
        eprintln!("Saved!");
    }

    println!("org_url:       {}", settings.org_url);
    println!("access_token:  {}", mask(&settings.access_token));
    println!("ai_endpoint:   {}", settings.ai_endpoint);
    println!("ai_deployment: {}", settings.ai_deployment);
    println!("ai_token:      {}", mask(&settings.ai_token));

    // Token freshness is shown right after every save.
    show_token_status(&settings.ai_token);
    Ok(())
}

/// URL from the argument, or from a pasted stdin line — the drag-and-drop
/// analog: only text naming a tracking-service host is accepted.
fn resolve_url(arg: Option<String>) -> Result<String, String> {
    match arg {
        Some(url) => Ok(url),
        None => {
            let mut line = String::new();
            std::io::stdin()
                .read_line(&mut line)
                .map_err(|e| e.to_string())?;
            extract_dropped_url(&line)
                .map(str::to_owned)
                .ok_or_else(|| "input does not contain a work-item link".to_string())
        }
    }
}

fn show_token_status(ai_token: &str) {
    let status = token_status(ai_token);
    let label = status.label();
    match status.severity() {
        Severity::Valid | Severity::None => println!("{label}"),
        _ => eprintln!("{label}"),
    }
}

fn print_work_item(item: &WorkItem) {
    println!("{} #{} - {}", item.kind, item.id, item.title);
    println!(
        "State: {}  Area: {}  Assigned: {}",
        item.state,
        item.area_path,
        item.assigned_display()
    );
    println!("\n{}", item.description_text());
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() { "(not set)" } else { "(set)" }
}
