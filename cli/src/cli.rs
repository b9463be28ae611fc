use std::path::PathBuf;

use clap::{Parser, Subcommand};

use portal::{PortalConfig, StorageLocation};

#[derive(Debug, Parser)]
#[clap(name = "portal-cli", version, about = "Terminal client for the healthcare portal")]
pub struct Cli {
    /// Backend base URL (overrides PORTAL_API_URL)
    #[clap(long, global = true)]
    pub api_url: Option<String>,

    /// Session storage, `file://<dir>` or `sqlite://<path>` (overrides PORTAL_STORAGE)
    #[clap(long, global = true)]
    pub storage: Option<String>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and persist the session
    Login {
        #[clap(long)]
        username: String,

        #[clap(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
        password: String,

        /// Use the admin portal (refuses non-admin accounts)
        #[clap(long)]
        admin: bool,
    },

    /// Register a patient account from a JSON file
    Register {
        #[clap(long)]
        file: PathBuf,
    },

    /// End the persisted session
    Logout,

    /// Show the current session
    Whoami,

    /// Show where navigating to a route would lead
    Open { route: String },

    /// Authenticated GET against an API path, e.g. /admin/users
    Get { path: String },

    /// Authenticated POST of a JSON body
    Post {
        path: String,

        #[clap(long, default_value = "{}")]
        data: String,
    },
}

impl Cli {
    /// Command-line flags win over the environment.
    pub(crate) fn apply(&self, mut cfg: PortalConfig) -> PortalConfig {
        if let Some(url) = &self.api_url {
            cfg.api_base_url = url.clone();
        }
        if let Some(raw) = &self.storage {
            cfg.storage = StorageLocation::parse(raw);
        }
        cfg
    }
}
