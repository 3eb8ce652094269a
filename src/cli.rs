use std::path::PathBuf;

use chrono::{FixedOffset, NaiveDate};
use clap::{Parser, Subcommand};
use reqwest::Url;

use crate::{
    api::entsoe::{self, DEFAULT_BASE_URL},
    dashboard::Dashboard,
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the interactive dashboard.
    #[clap(name = "serve")]
    Serve(Box<ServeArgs>),

    /// Print the heatmap for a single day and optionally save the chart.
    #[clap(name = "show")]
    Show(Box<ShowArgs>),
}

#[derive(Parser)]
pub struct ServeArgs {
    #[clap(long, default_value = "0.0.0.0:8080", env = "BIND_ADDRESS")]
    pub bind_address: String,

    #[clap(flatten)]
    pub entsoe: EntsoeArgs,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Delivery date, defaults to tomorrow.
    #[clap(long)]
    pub date: Option<NaiveDate>,

    /// Write the SVG chart to the file.
    #[clap(long)]
    pub output: Option<PathBuf>,

    #[clap(flatten)]
    pub entsoe: EntsoeArgs,
}

#[derive(Parser)]
pub struct EntsoeArgs {
    /// Transparency Platform security token.
    #[clap(long = "entsoe-api-token", env = "ENTSOE_API_TOKEN", hide_env_values = true)]
    pub api_token: String,

    /// Bidding zone EIC code.
    #[clap(long = "entsoe-zone-id", default_value = "10YBE----------2", env = "ENTSOE_ZONE_ID")]
    pub zone_id: String,

    #[clap(long = "entsoe-timeout", default_value = "10s", env = "ENTSOE_TIMEOUT")]
    pub timeout: humantime::Duration,

    #[clap(long = "entsoe-base-url", default_value = DEFAULT_BASE_URL, env = "ENTSOE_BASE_URL")]
    pub base_url: Url,

    /// Local wall-clock offset from UTC in whole hours, daylight saving time is not applied.
    #[clap(
        long = "utc-offset-hours",
        default_value = "1",
        env = "UTC_OFFSET_HOURS",
        allow_hyphen_values = true
    )]
    pub utc_offset_hours: i32,
}

impl EntsoeArgs {
    pub fn config(&self) -> entsoe::Config {
        entsoe::Config::builder()
            .api_token(&self.api_token)
            .zone_id(&self.zone_id)
            .timeout(*self.timeout)
            .base_url(self.base_url.clone())
            .build()
    }

    pub fn utc_offset(&self) -> Result<FixedOffset> {
        self.utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .with_context(|| format!("invalid UTC offset: {} hours", self.utc_offset_hours))
    }

    pub fn try_new_dashboard(&self) -> Result<Dashboard<entsoe::Api>> {
        Ok(Dashboard::new(entsoe::Api::new(self.config())?, self.utc_offset()?))
    }
}
