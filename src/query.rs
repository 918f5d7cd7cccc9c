//! Query assembly
//!
//! A [`FluxQuery`] orders source selection, the time range, filter predicate
//! trees, and transform stages into the final Flux query text. Lines are
//! emitted newline-joined in a fixed order; the assembler never reorders or
//! deduplicates.
//!
//! # Example
//!
//! ```rust
//! use fluxcraft::{FluxFilter, FluxQuery};
//!
//! let text = FluxQuery::new("agriculture")
//!     .start("-1h")
//!     .filter(FluxFilter::new().measurement("sensor"))
//!     .render()
//!     .unwrap();
//!
//! assert_eq!(
//!     text,
//!     "from(bucket: \"agriculture\")\n\
//!      |> range(start: -1h)\n\
//!      |> filter(fn: (r) => r._measurement == \"sensor\")"
//! );
//! ```

use crate::error::{FluxError, FluxResult};
use crate::filter::FluxFilter;
use crate::pipe::Transform;

/// A buildable Flux query
///
/// Built once through chained setters, rendered any number of times.
/// At least one of start/stop must be set before rendering.
#[derive(Debug, Clone, Default)]
pub struct FluxQuery {
    bucket: String,
    timezone: Option<String>,
    start: Option<String>,
    stop: Option<String>,
    filters: Vec<FluxFilter>,
    transforms: Vec<Transform>,
}

impl FluxQuery {
    /// Create a query against the named bucket
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Self::default()
        }
    }

    /// Set the IANA timezone the query's location option points at
    pub fn timezone(mut self, tz: impl Into<String>) -> Self {
        self.timezone = Some(tz.into());
        self
    }

    /// Set the range start bound (duration literal or timestamp, verbatim)
    pub fn start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Set the range stop bound (duration literal or timestamp, verbatim)
    pub fn stop(mut self, stop: impl Into<String>) -> Self {
        self.stop = Some(stop.into());
        self
    }

    /// Append a filter predicate tree; `None` is silently skipped
    pub fn filter(mut self, filter: impl Into<Option<FluxFilter>>) -> Self {
        if let Some(filter) = filter.into() {
            self.filters.push(filter);
        }
        self
    }

    /// Append a transform stage; `None` is silently skipped
    pub fn transform(mut self, transform: impl Into<Option<Transform>>) -> Self {
        if let Some(transform) = transform.into() {
            self.transforms.push(transform);
        }
        self
    }

    /// Render the full query text
    ///
    /// Emission order: timezone directives (when set), source selection, the
    /// range line, filters in list order, transforms in list order. The
    /// first error from any line aborts the render with no partial output.
    pub fn render(&self) -> FluxResult<String> {
        let mut lines = Vec::with_capacity(3 + self.filters.len() + self.transforms.len());

        if let Some(tz) = &self.timezone {
            lines.push("import \"timezone\"".to_string());
            lines.push(format!(
                r#"option location = timezone.location(name: "{tz}")"#
            ));
        }

        lines.push(format!(r#"from(bucket: "{}")"#, self.bucket));

        match (&self.start, &self.stop) {
            (Some(start), Some(stop)) => {
                lines.push(format!("|> range(start: {start}, stop: {stop})"));
            }
            (Some(start), None) => lines.push(format!("|> range(start: {start})")),
            (None, Some(stop)) => lines.push(format!("|> range(stop: {stop})")),
            (None, None) => return Err(FluxError::MissingRange),
        }

        for filter in &self.filters {
            lines.push(filter.to_pipe()?);
        }

        for transform in &self.transforms {
            lines.push(transform.render()?);
        }

        tracing::debug!(bucket = %self.bucket, lines = lines.len(), "rendered flux query");
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipe::{KeepPipe, MeanPipe, MovingAveragePipe, TopPipe};

    #[test]
    fn test_minimal_query_exact_output() {
        let text = FluxQuery::new("agriculture")
            .start("-1h")
            .filter(FluxFilter::new().measurement("sensor"))
            .render()
            .unwrap();
        assert_eq!(
            text,
            "from(bucket: \"agriculture\")\n|> range(start: -1h)\n|> filter(fn: (r) => r._measurement == \"sensor\")"
        );
    }

    #[test]
    fn test_missing_range_fails() {
        let query = FluxQuery::new("agriculture")
            .filter(FluxFilter::new().measurement("sensor"))
            .transform(Transform::Mean(MeanPipe::default()));
        assert!(matches!(query.render(), Err(FluxError::MissingRange)));
    }

    #[test]
    fn test_range_variants() {
        let text = FluxQuery::new("b").start("-1h").render().unwrap();
        assert!(text.contains("|> range(start: -1h)"));

        let text = FluxQuery::new("b").stop("now()").render().unwrap();
        assert!(text.contains("|> range(stop: now())"));

        let text = FluxQuery::new("b").start("-1h").stop("now()").render().unwrap();
        assert!(text.contains("|> range(start: -1h, stop: now())"));
    }

    #[test]
    fn test_timezone_directives_lead() {
        let text = FluxQuery::new("b")
            .timezone("Asia/Shanghai")
            .start("-1d")
            .render()
            .unwrap();
        assert_eq!(
            text,
            "import \"timezone\"\n\
             option location = timezone.location(name: \"Asia/Shanghai\")\n\
             from(bucket: \"b\")\n\
             |> range(start: -1d)"
        );
    }

    #[test]
    fn test_filters_and_transforms_in_order() {
        let text = FluxQuery::new("telemetry")
            .start("-6h")
            .filter(FluxFilter::new().measurement("cpu"))
            .filter(FluxFilter::new().field("usage_idle"))
            .transform(Transform::Mean(MeanPipe::default()))
            .transform(Transform::Top(TopPipe {
                n: 5,
                columns: vec!["_value".to_string()],
            }))
            .render()
            .unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2], "|> filter(fn: (r) => r._measurement == \"cpu\")");
        assert_eq!(lines[3], "|> filter(fn: (r) => r._field == \"usage_idle\")");
        assert_eq!(lines[4], "|> mean()");
        assert_eq!(lines[5], "|> top(n: 5, columns: [\"_value\"])");
    }

    #[test]
    fn test_none_entries_are_skipped() {
        let text = FluxQuery::new("b")
            .start("-1h")
            .filter(None)
            .filter(FluxFilter::new().measurement("m"))
            .transform(None)
            .render()
            .unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_filter_error_aborts_render() {
        let query = FluxQuery::new("b")
            .start("-1h")
            .filter(FluxFilter::new())
            .transform(Transform::Mean(MeanPipe::default()));
        assert!(matches!(query.render(), Err(FluxError::EmptyPredicate)));
    }

    #[test]
    fn test_transform_error_aborts_render() {
        let query = FluxQuery::new("b")
            .start("-1h")
            .transform(Transform::MovingAverage(MovingAveragePipe { n: 0 }));
        assert!(matches!(query.render(), Err(FluxError::InvalidParameter(_))));

        let query = FluxQuery::new("b")
            .start("-1h")
            .transform(Transform::Keep(KeepPipe::default()));
        assert!(query.render().is_err());
    }

    #[test]
    fn test_render_is_idempotent() {
        let query = FluxQuery::new("telemetry")
            .timezone("UTC")
            .start("-1h")
            .stop("now()")
            .filter(FluxFilter::new().measurement("cpu"))
            .transform(Transform::Mean(MeanPipe::default()));
        assert_eq!(query.render().unwrap(), query.render().unwrap());
    }
}
