pub mod page;
pub mod server;

use chrono::{Days, FixedOffset, NaiveDate};

use crate::{
    api::entsoe::{
        DocumentSource,
        FetchError,
        document::{self, ParseError},
    },
    core::aggregate::{AverageHourly, HourlyAverage},
    prelude::*,
};

/// Reasons why a day yields nothing to show.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("the document contains no prices")]
    Empty,
}

impl Error {
    /// Whether the day itself is missing, as opposed to a broken document.
    #[must_use]
    pub const fn is_missing_day(&self) -> bool {
        match self {
            Self::Fetch(_) => true,
            Self::Parse(error) => {
                matches!(error, ParseError::Acknowledgement { .. } | ParseError::Empty)
            }
            Self::Empty => false,
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Report(Report),
    NoData(NoData),
}

impl Outcome {
    #[must_use]
    pub const fn requested(&self) -> NaiveDate {
        match self {
            Self::Report(report) => report.requested,
            Self::NoData(no_data) => no_data.requested,
        }
    }

    #[must_use]
    pub const fn fell_back(&self) -> bool {
        match self {
            Self::Report(report) => report.fell_back,
            Self::NoData(no_data) => no_data.fell_back,
        }
    }
}

#[derive(Debug)]
pub struct Report {
    pub requested: NaiveDate,

    /// Date the prices are actually for.
    pub date: NaiveDate,

    pub fell_back: bool,
    pub hourly: Vec<HourlyAverage>,
}

#[derive(Debug)]
pub struct NoData {
    pub requested: NaiveDate,
    pub fell_back: bool,
    pub reason: Error,
}

/// Day-ahead prices are normally known for tomorrow.
#[must_use]
pub fn default_date(today: NaiveDate) -> NaiveDate {
    today.checked_add_days(Days::new(1)).unwrap_or(today)
}

/// Fetches, parses and aggregates a single day per user action.
pub struct Dashboard<S> {
    source: S,
    utc_offset: FixedOffset,
}

impl<S: DocumentSource> Dashboard<S> {
    pub const fn new(source: S, utc_offset: FixedOffset) -> Self {
        Self { source, utc_offset }
    }

    /// Handle the request for the date, falling back to `today` once.
    #[instrument(skip_all, fields(requested = %requested, today = %today))]
    pub async fn handle(&self, requested: NaiveDate, today: NaiveDate) -> Outcome {
        let (date, fell_back, result) = match self.try_get_hourly(requested).await {
            Err(error) if error.is_missing_day() => {
                warn!(?error, "no data for the requested date, trying today");
                (today, true, self.try_get_hourly(today).await)
            }
            result => (requested, false, result),
        };
        match result {
            Ok(hourly) => {
                info!(%date, n_hours = hourly.len(), "ready");
                Outcome::Report(Report { requested, date, fell_back, hourly })
            }
            Err(reason) => {
                error!(?reason, "no data available");
                Outcome::NoData(NoData { requested, fell_back, reason })
            }
        }
    }

    async fn try_get_hourly(&self, on: NaiveDate) -> Result<Vec<HourlyAverage>, Error> {
        let document = self.source.get_document(on).await?;
        let hourly = document::parse(&document)?.average_hourly(self.utc_offset);
        if hourly.is_empty() { Err(Error::Empty) } else { Ok(hourly) }
    }
}
