//! # Fluxcraft
//!
//! A builder for InfluxDB Flux queries: given a source bucket, a time range,
//! filter predicate trees, and an ordered list of transform stages, it
//! assembles syntactically valid Flux text. The crate never executes
//! queries; the rendered string is handed unmodified to whatever client
//! talks to the database.
//!
//! ## Modules
//!
//! - [`duration`]: Flux duration tokens with lazy grammar validation
//! - [`filter`]: boolean filter predicate trees (NOT / AND / OR over row conditions)
//! - [`pipe`]: the transform stage library and the dynamic `{name, params}` decoder
//! - [`query`]: the top-level query assembler
//!
//! ## Quick Start
//!
//! ```rust
//! use fluxcraft::{FluxFilter, FluxQuery, MeanPipe, Transform, TransformInput};
//!
//! // Typed construction
//! let text = FluxQuery::new("telemetry")
//!     .start("-1h")
//!     .filter(FluxFilter::new().measurement("cpu").field("usage_idle"))
//!     .transform(Transform::Mean(MeanPipe::default()))
//!     .render()
//!     .unwrap();
//! assert!(text.ends_with("|> mean()"));
//!
//! // Dynamic decoding from a JSON payload
//! let input: TransformInput =
//!     serde_json::from_str(r#"{"name": "fill", "params": {"value": 5}}"#).unwrap();
//! assert_eq!(input.decode().unwrap().render().unwrap(), "|> fill(value: 5)");
//! ```

pub mod duration;
pub mod error;
pub mod filter;
pub mod pipe;
pub mod query;

pub use duration::Duration;
pub use error::{FluxError, FluxResult};
pub use filter::FluxFilter;
pub use query::FluxQuery;

pub use pipe::{
    AggregateWindowPipe, BottomPipe, CountPipe, CumulativeSumPipe, DerivativePipe, DifferencePipe,
    DistinctPipe, DoubleEmaPipe, DropPipe, ElapsedPipe, Estimate, ExponentialMovingAveragePipe,
    FillPipe, FilterPipe, GroupPipe, IncreasePipe, IntegralPipe, KaufmansAmaPipe, KaufmansErPipe,
    KeepPipe, LimitPipe, MaxPipe, MeanPipe, MedianPipe, MinPipe, ModePipe, MovingAveragePipe,
    QuantilePipe, Reducer, RelativeStrengthIndexPipe, SkewPipe, SortPipe, SpreadPipe,
    StateCountPipe, StateDurationPipe, StddevMode, StddevPipe, SumPipe, TailPipe,
    TimeMovingAveragePipe, TimeShiftPipe, TimeWeightedAvgPipe, TopPipe, Transform, TransformInput,
    TripleEmaPipe, TripleExponentialDerivativePipe, TruncateTimeColumnPipe, UniquePipe, WindowPipe,
    YieldPipe,
};
