//! Airdrop Portal CLI - Main entry point

use airdrop_core::{AirdropDetails, PortalConfig, WindowStatus};
use airdrop_engine::rules::View;
use airdrop_engine::{AirdropPortal, HistorySnapshot, PortalSession};
use airdrop_networking::{AirdropBackend, PortalClient};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: airdrop-portal [status | windows | history [ACCOUNT]]";

/// The CLI never signs; wallet and chain slots stay empty
type ReadOnlyPortal = AirdropPortal<PortalClient, (), (), ()>;

#[derive(Serialize)]
struct StatusReport<'a> {
    token_name: &'a str,
    now: DateTime<Utc>,
    deadline: DateTime<Utc>,
    deadline_label: &'a str,
    view: View,
    banner: Option<&'static str>,
    session: &'a PortalSession,
}

#[derive(Serialize)]
struct WindowLine {
    order: u64,
    status: WindowStatus,
    label: &'static str,
    action: &'static str,
    registration_start: Option<DateTime<Utc>>,
    claim_start: Option<DateTime<Utc>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "airdrop_cli=info,airdrop_engine=info,airdrop_networking=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = PortalConfig::from_env().context("invalid portal configuration")?;
    tracing::info!("Using airdrop {} at {}", config.airdrop_id, config.api_base_url);

    let client = PortalClient::new(&config).context("failed to build HTTP client")?;
    let portal: ReadOnlyPortal = AirdropPortal::new(client, (), (), (), config.reward_format.clone());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("status");
    let now = Utc::now();

    match command {
        "status" => {
            let details = fetch_details(&portal, &config).await?;
            let mut session = PortalSession::new();
            session.set_windows(&details.airdrop_windows, now);
            session.set_account(config.account.clone(), false);
            let outcome = portal
                .refresh_history(session.account.as_deref(), session.active.as_ref())
                .await;
            session.apply(outcome);

            let label = session
                .active
                .as_ref()
                .map(|a| a.window.airdrop_window_status.label())
                .unwrap_or("");
            print_json(&StatusReport {
                token_name: &details.token_name,
                now,
                deadline: session.deadline(now),
                deadline_label: label,
                view: session.view(now),
                banner: session.airdrop_status.map(|s| s.text()),
                session: &session,
            })
        }
        "windows" => {
            let details = fetch_details(&portal, &config).await?;
            let lines: Vec<WindowLine> = details
                .airdrop_windows
                .iter()
                .map(|w| WindowLine {
                    order: w.airdrop_window_order,
                    status: w.airdrop_window_status,
                    label: w.airdrop_window_status.label(),
                    action: w.airdrop_window_status.action(),
                    registration_start: w.airdrop_window_registration_start_period,
                    claim_start: w.airdrop_window_claim_start_period,
                })
                .collect();
            print_json(&lines)
        }
        "history" => {
            let Some(account) = args.get(1).cloned().or_else(|| config.account.clone()) else {
                bail!("history needs an account (argument or AIRDROP_ACCOUNT)");
            };
            let details = fetch_details(&portal, &config).await?;
            let mut session = PortalSession::new();
            session.set_windows(&details.airdrop_windows, now);
            let Some(active) = session.active.as_ref() else {
                bail!("airdrop {} has no windows", config.airdrop_id);
            };
            let snapshot: HistorySnapshot = portal
                .history(&account, active)
                .await
                .with_context(|| format!("failed to load claim history for {}", account))?;
            print_json(&snapshot)
        }
        _ => {
            eprintln!("{}", USAGE);
            bail!("unknown command: {}", command);
        }
    }
}

async fn fetch_details(portal: &ReadOnlyPortal, config: &PortalConfig) -> Result<AirdropDetails> {
    let details = portal
        .backend()
        .airdrop_details(config.airdrop_id)
        .await
        .with_context(|| format!("failed to load airdrop {}", config.airdrop_id))?;
    tracing::info!("Loaded {} windows for {}", details.airdrop_windows.len(), details.token_name);
    Ok(details)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
