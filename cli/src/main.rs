pub mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde_json::Value;

use cli::{Cli, Command};
use common::logger::{LogFormat, init_logger};
use portal::api::{Credentials, Registration};
use portal::flows::{self, Portal};
use portal::routes::home_link;
use portal::{ApiClient, Navigation, PortalConfig, navigate};
use session::SessionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logger("portal-cli", LogFormat::from_env());

    let cfg = cli.apply(PortalConfig::from_env());

    // Each invocation is a "reload": restore whatever the last one persisted.
    let storage = cfg.storage.open().await.context("failed to open session storage")?;
    let session = Arc::new(SessionStore::open(storage, cfg.session_key.clone()).await);
    let client = ApiClient::new(&cfg, session)?;

    tracing::debug!(api = %cfg.api_base_url, "portal client ready");

    run(cli.command, &client).await
}

async fn run(command: Command, client: &ApiClient) -> anyhow::Result<()> {
    match command {
        Command::Login {
            username,
            password,
            admin,
        } => {
            let portal = if admin { Portal::Admin } else { Portal::General };
            let landing = flows::login(client, &Credentials::new(username, password), portal).await?;
            println!("logged in; continue at {landing}");
        }

        Command::Register { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let registration: Registration =
                serde_json::from_str(&raw).context("invalid registration file")?;
            let receipt = flows::register(client, &registration).await?;
            println!("registered patient {}", receipt.patient_id);
        }

        Command::Logout => {
            let next = flows::logout(client.session()).await?;
            println!("logged out; continue at {next}");
        }

        Command::Whoami => match client.session().identity() {
            Some(identity) => {
                println!("{} ({})", identity.name, identity.role);
                if let Some(pid) = &identity.patient_id {
                    println!("patient record: {pid}");
                }
                println!("home: {}", home_link(Some(identity.role)));
            }
            None => println!("not logged in"),
        },

        Command::Open { route } => match navigate(client.session().role(), &route) {
            Navigation::Render(view) => println!("render {view}"),
            Navigation::Redirect(view) => println!("redirect {view}"),
            Navigation::NotFound => println!("not found: {route}"),
        },

        Command::Get { path } => {
            let body: Value = client.get(&path).await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }

        Command::Post { path, data } => {
            let payload: Value = serde_json::from_str(&data).context("--data is not valid JSON")?;
            let body: Value = client.post(&path, &payload).await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}
