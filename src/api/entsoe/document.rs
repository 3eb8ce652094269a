//! Market documents returned by the Transparency Platform.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use quick_xml::{Reader, events::Event};
use serde::Deserialize;

use crate::{core::point::PricePoint, prelude::*, quantity::rate::MegawattHourRate};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read the XML")]
    Xml(#[from] quick_xml::Error),

    #[error("failed to deserialize the market document")]
    Malformed(#[from] quick_xml::DeError),

    #[error("the document has no root element")]
    Empty,

    /// The API replied with an acknowledgement instead of the data,
    /// for example, code `999` when nothing matches the query.
    #[error("acknowledgement `{code}`: {text}")]
    Acknowledgement { code: String, text: String },

    #[error("unexpected root element `{0}`")]
    UnexpectedRoot(String),

    #[error("unsupported resolution `{0}`")]
    UnknownResolution(String),

    #[error("invalid period start `{0}`")]
    InvalidTimestamp(String),

    #[error("invalid point position `{0}`")]
    InvalidPosition(u32),
}

/// Parse the day-ahead price document into a flat series of price points.
///
/// Points of all the time series and periods are returned in the document order.
#[instrument(skip_all, fields(len = xml.len()))]
pub fn parse(xml: &str) -> Result<Vec<PricePoint>, ParseError> {
    match root_element(xml)?.as_str() {
        "Publication_MarketDocument" => {
            let document: PublicationDocument = quick_xml::de::from_str(xml)?;
            let mut points = Vec::new();
            for period in document.time_series.into_iter().flat_map(|series| series.periods) {
                points.extend(period.into_points()?);
            }
            debug!(n_points = points.len(), "parsed");
            Ok(points)
        }
        "Acknowledgement_MarketDocument" => {
            let document: AcknowledgementDocument = quick_xml::de::from_str(xml)?;
            let reason = document.reasons.into_iter().next().unwrap_or_default();
            Err(ParseError::Acknowledgement {
                code: reason.code,
                text: reason.text.unwrap_or_default(),
            })
        }
        other => Err(ParseError::UnexpectedRoot(other.to_owned())),
    }
}

fn root_element(xml: &str) -> Result<String, ParseError> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event()? {
            Event::Start(element) | Event::Empty(element) => {
                break Ok(String::from_utf8_lossy(element.local_name().as_ref()).into_owned());
            }
            Event::Eof => break Err(ParseError::Empty),
            _ => {}
        }
    }
}

/// Sampling interval of a time series period.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Resolution {
    QuarterHourly,
    HalfHourly,
    Hourly,
}

impl Resolution {
    #[must_use]
    pub fn step(self) -> TimeDelta {
        match self {
            Self::QuarterHourly => TimeDelta::minutes(15),
            Self::HalfHourly => TimeDelta::minutes(30),
            Self::Hourly => TimeDelta::hours(1),
        }
    }
}

impl FromStr for Resolution {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "PT15M" => Ok(Self::QuarterHourly),
            "PT30M" => Ok(Self::HalfHourly),
            "PT60M" => Ok(Self::Hourly),
            other => Err(ParseError::UnknownResolution(other.to_owned())),
        }
    }
}

#[derive(Deserialize)]
struct PublicationDocument {
    #[serde(rename = "TimeSeries", default)]
    time_series: Vec<TimeSeries>,
}

#[derive(Deserialize)]
struct TimeSeries {
    #[serde(rename = "Period", default)]
    periods: Vec<Period>,
}

#[derive(Deserialize)]
struct Period {
    #[serde(rename = "timeInterval")]
    time_interval: TimeInterval,

    resolution: String,

    #[serde(rename = "Point", default)]
    points: Vec<Point>,
}

impl Period {
    fn into_points(self) -> Result<impl Iterator<Item = PricePoint>, ParseError> {
        let start = parse_start(&self.time_interval.start)?;
        let step = self.resolution.parse::<Resolution>()?.step();
        let points = self
            .points
            .into_iter()
            .map(|point| {
                let offset = point
                    .position
                    .checked_sub(1)
                    .and_then(|index| i32::try_from(index).ok())
                    .ok_or(ParseError::InvalidPosition(point.position))?;
                Ok(PricePoint {
                    timestamp: start + step * offset,
                    price: MegawattHourRate(point.price),
                })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;
        Ok(points.into_iter())
    }
}

/// Period boundaries come as `2024-01-01T23:00Z`.
fn parse_start(start: &str) -> Result<DateTime<Utc>, ParseError> {
    NaiveDateTime::parse_from_str(start.trim(), "%Y-%m-%dT%H:%MZ")
        .map(|start| start.and_utc())
        .map_err(|_| ParseError::InvalidTimestamp(start.to_owned()))
}

#[derive(Deserialize)]
struct TimeInterval {
    start: String,
}

#[derive(Deserialize)]
struct Point {
    /// One-based.
    position: u32,

    #[serde(rename = "price.amount")]
    price: f64,
}

#[derive(Deserialize)]
struct AcknowledgementDocument {
    #[serde(rename = "Reason", default)]
    reasons: Vec<Reason>,
}

#[derive(Default, Deserialize)]
struct Reason {
    code: String,
    text: Option<String>,
}
