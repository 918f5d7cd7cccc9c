//! Windowed aggregation stage
//!
//! `aggregateWindow` groups rows into fixed windows of `every` and applies a
//! reducer function to each window. Calendar units are supported: `1mo`
//! windows follow calendar months and `1w` windows are aligned to the Unix
//! epoch (a Thursday).

use crate::duration::Duration;
use crate::error::FluxResult;
use crate::pipe::pipe_line;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reducer functions usable inside an aggregation window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reducer {
    Mean,
    Min,
    Max,
    Sum,
    Count,
    Stddev,
    Median,
    First,
    Last,
    Integral,
    Mode,
    Skew,
    Spread,
    Distinct,
    Unique,
}

impl fmt::Display for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mean => "mean",
            Self::Min => "min",
            Self::Max => "max",
            Self::Sum => "sum",
            Self::Count => "count",
            Self::Stddev => "stddev",
            Self::Median => "median",
            Self::First => "first",
            Self::Last => "last",
            Self::Integral => "integral",
            Self::Mode => "mode",
            Self::Skew => "skew",
            Self::Spread => "spread",
            Self::Distinct => "distinct",
            Self::Unique => "unique",
        };
        write!(f, "{name}")
    }
}

/// `|> aggregateWindow(...)`
///
/// Requires a window cadence (`every`) and a reducer; the remaining fields
/// are emitted only when present, so the remote defaults apply when omitted.
/// `period` defaults remotely to the `every` value and may be negative.
#[derive(Debug, Clone, Deserialize)]
pub struct AggregateWindowPipe {
    /// Reducer applied to each window
    #[serde(rename = "fn")]
    pub func: Reducer,
    /// Duration of each window
    #[serde(default)]
    pub every: Duration,
    /// Length of each interval, when different from `every`
    pub period: Option<Duration>,
    /// Column to operate on, remote default `_value`
    pub column: Option<String>,
    /// Which time column each window takes its timestamp from
    pub time_src: Option<String>,
    /// Time column the window timestamp is written to
    pub time_dst: Option<String>,
    /// Whether empty windows produce rows; present-false and absent differ
    pub create_empty: Option<bool>,
}

impl AggregateWindowPipe {
    pub fn render(&self) -> FluxResult<String> {
        let mut params = vec![format!("fn: {}", self.func)];
        self.every.validate()?;
        params.push(format!("every: {}", self.every));
        if let Some(period) = &self.period {
            period.validate()?;
            params.push(format!("period: {period}"));
        }
        if let Some(column) = &self.column {
            params.push(format!(r#"column: "{column}""#));
        }
        if let Some(src) = &self.time_src {
            params.push(format!(r#"timeSrc: "{src}""#));
        }
        if let Some(dst) = &self.time_dst {
            params.push(format!(r#"timeDst: "{dst}""#));
        }
        if let Some(create_empty) = self.create_empty {
            params.push(format!("createEmpty: {create_empty}"));
        }
        Ok(pipe_line("aggregateWindow", &params))
    }
}
