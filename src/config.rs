use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use crate::lookup::Endpoints;

pub const DEFAULT_PRIMARY_URL: &str = "https://back.braindrop.fun/api/chart/user";
pub const DEFAULT_FALLBACK_URL: &str = "https://back.braindrop.fun/api/twitter/details";

const DATA_DIR_NAME: &str = "score-graph";

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Endpoint returning the full score record for a username.
    #[arg(long, default_value = DEFAULT_PRIMARY_URL)]
    primary_url: String,

    /// Twitter-only endpoint queried when the primary lookup is rejected.
    #[arg(long, default_value = DEFAULT_FALLBACK_URL)]
    fallback_url: String,

    /// Where plotted users are kept between runs.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Generate random users instead of calling the endpoints.
    #[arg(long)]
    offline: bool,

    #[arg(long, default_value_t = 10)]
    request_timeout_secs: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub primary_url: String,
    pub fallback_url: String,
    pub data_dir: PathBuf,
    pub offline: bool,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_args(args: Args) -> Result<Self> {
        let data_dir = match args.data_dir {
            Some(dir) => dir,
            None => dirs::data_dir()
                .map(|dir| dir.join(DATA_DIR_NAME))
                .context("no data directory for this platform, pass --data-dir")?,
        };

        Ok(Self {
            primary_url: args.primary_url,
            fallback_url: args.fallback_url,
            data_dir,
            offline: args.offline,
            request_timeout: Duration::from_secs(args.request_timeout_secs),
        })
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            chart_user_url: self.primary_url.clone(),
            twitter_details_url: self.fallback_url.clone(),
        }
    }
}
