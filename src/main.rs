#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod api;
mod cli;
mod core;
mod dashboard;
mod prelude;
mod quantity;
mod render;
mod tables;

use chrono::Utc;
use clap::{Parser, crate_version};
use tokio::net::TcpListener;

use crate::{
    cli::{Args, Command, ServeArgs, ShowArgs},
    dashboard::{
        Outcome,
        default_date,
        server::{AppState, router, shutdown_signal},
    },
    prelude::*,
    render::layout,
    tables::build_heatmap_table,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Serve(args) => serve(*args).await?,
        Command::Show(args) => show(*args).await?,
    }

    info!("done!");
    Ok(())
}

#[instrument(skip_all, fields(bind_address = %args.bind_address))]
async fn serve(args: ServeArgs) -> Result {
    let state = AppState {
        dashboard: args.entsoe.try_new_dashboard()?,
        zone_id: args.entsoe.zone_id.clone(),
    };
    let listener =
        TcpListener::bind(&args.bind_address).await.context("failed to bind to the address")?;
    info!("serving…");
    axum::serve(listener, router(state)).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

#[instrument(skip_all)]
async fn show(args: ShowArgs) -> Result {
    let today = Utc::now().date_naive();
    let requested = args.date.unwrap_or_else(|| default_date(today));
    match args.entsoe.try_new_dashboard()?.handle(requested, today).await {
        Outcome::Report(report) => {
            if report.fell_back {
                warn!(%requested, date = %report.date, "no data for the chosen date, showing today");
            }
            let bars = layout(&report.hourly);
            println!("{}", build_heatmap_table(&bars));
            if let Some(output) = args.output {
                let chart = render::svg::render(&bars, report.date)?;
                std::fs::write(&output, chart)
                    .with_context(|| format!("failed to write `{}`", output.display()))?;
                info!(output = %output.display(), "saved the chart");
            }
            Ok(())
        }
        Outcome::NoData(no_data) => Err(Error::new(no_data.reason).context("no data available")),
    }
}
