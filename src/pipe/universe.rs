//! Universe transform stages
//!
//! One struct per parameterized Flux stage. Every struct owns its own
//! validation and renders a single `|> name(key: value, ...)` line.
//!
//! Shared conventions:
//! - optional fields emit a parameter only when present; omission defers to
//!   the remote default
//! - strings are double-quoted, booleans and numbers are bare, column lists
//!   render as `["a", "b"]` and vanish when empty
//! - duration fields are validated against the duration grammar at render
//!   time, never at construction
//! - a handful of stages require a strictly positive `n`; the constraint is
//!   per-stage, not universal

use crate::duration::Duration;
use crate::error::{FluxError, FluxResult};
use crate::pipe::{pipe_line, quoted_columns};
use serde::Deserialize;
use serde_json::Value;

fn positive(n: i64) -> FluxResult<()> {
    if n <= 0 {
        return Err(FluxError::InvalidParameter("n must be greater than 0".to_string()));
    }
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// `|> bottom(...)` - lowest `n` rows, no positivity constraint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BottomPipe {
    #[serde(default)]
    pub n: i64,
    #[serde(default)]
    pub columns: Vec<String>,
}

impl BottomPipe {
    pub fn render(&self) -> FluxResult<String> {
        let mut params = vec![format!("n: {}", self.n)];
        if !self.columns.is_empty() {
            params.push(format!("columns: {}", quoted_columns(&self.columns)));
        }
        Ok(pipe_line("bottom", &params))
    }
}

/// `|> top(...)` - highest `n` rows, no positivity constraint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopPipe {
    #[serde(default)]
    pub n: i64,
    #[serde(default)]
    pub columns: Vec<String>,
}

impl TopPipe {
    pub fn render(&self) -> FluxResult<String> {
        let mut params = vec![format!("n: {}", self.n)];
        if !self.columns.is_empty() {
            params.push(format!("columns: {}", quoted_columns(&self.columns)));
        }
        Ok(pipe_line("top", &params))
    }
}

/// `|> count()`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountPipe {
    pub column: Option<String>,
}

impl CountPipe {
    pub fn render(&self) -> FluxResult<String> {
        match &self.column {
            Some(column) => Ok(format!(r#"|> count(column: "{column}")"#)),
            None => Ok("|> count()".to_string()),
        }
    }
}

/// `|> cumulativeSum()`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CumulativeSumPipe {
    #[serde(default)]
    pub columns: Vec<String>,
}

impl CumulativeSumPipe {
    pub fn render(&self) -> FluxResult<String> {
        if self.columns.is_empty() {
            Ok("|> cumulativeSum()".to_string())
        } else {
            Ok(format!("|> cumulativeSum(columns: {})", quoted_columns(&self.columns)))
        }
    }
}

/// `|> derivative(...)`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DerivativePipe {
    pub unit: Option<Duration>,
    pub non_negative: Option<bool>,
    #[serde(default)]
    pub columns: Vec<String>,
    pub time_column: Option<String>,
}

impl DerivativePipe {
    pub fn render(&self) -> FluxResult<String> {
        let mut params = Vec::new();
        if !self.columns.is_empty() {
            params.push(format!("columns: {}", quoted_columns(&self.columns)));
        }
        if let Some(time_column) = &self.time_column {
            params.push(format!(r#"timeColumn: "{time_column}""#));
        }
        if let Some(unit) = &self.unit {
            unit.validate()?;
            params.push(format!("unit: {unit}"));
        }
        if let Some(non_negative) = self.non_negative {
            params.push(format!("nonNegative: {non_negative}"));
        }
        Ok(pipe_line("derivative", &params))
    }
}

/// `|> difference(...)`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DifferencePipe {
    pub non_negative: Option<bool>,
    #[serde(default)]
    pub columns: Vec<String>,
    pub keep_first: Option<bool>,
    pub initial_zero: Option<bool>,
}

impl DifferencePipe {
    pub fn render(&self) -> FluxResult<String> {
        let mut params = Vec::new();
        if !self.columns.is_empty() {
            params.push(format!("columns: {}", quoted_columns(&self.columns)));
        }
        if let Some(keep_first) = self.keep_first {
            params.push(format!("keepFirst: {keep_first}"));
        }
        if let Some(initial_zero) = self.initial_zero {
            params.push(format!("initialZero: {initial_zero}"));
        }
        if let Some(non_negative) = self.non_negative {
            params.push(format!("nonNegative: {non_negative}"));
        }
        Ok(pipe_line("difference", &params))
    }
}

/// `|> distinct()`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DistinctPipe {
    pub column: Option<String>,
}

impl DistinctPipe {
    pub fn render(&self) -> FluxResult<String> {
        match &self.column {
            Some(column) => Ok(format!(r#"|> distinct(column: "{column}")"#)),
            None => Ok("|> distinct()".to_string()),
        }
    }
}

/// `|> doubleEMA(n: ...)` - requires n > 0
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoubleEmaPipe {
    #[serde(default)]
    pub n: i64,
}

impl DoubleEmaPipe {
    pub fn render(&self) -> FluxResult<String> {
        positive(self.n)?;
        Ok(format!("|> doubleEMA(n: {})", self.n))
    }
}

/// `|> elapsed(...)`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ElapsedPipe {
    pub unit: Option<Duration>,
    pub column_name: Option<String>,
    pub time_column: Option<String>,
}

impl ElapsedPipe {
    pub fn render(&self) -> FluxResult<String> {
        let mut params = Vec::new();
        if let Some(time_column) = &self.time_column {
            params.push(format!(r#"timeColumn: "{time_column}""#));
        }
        if let Some(unit) = &self.unit {
            unit.validate()?;
            params.push(format!("unit: {unit}"));
        }
        if let Some(column_name) = &self.column_name {
            params.push(format!(r#"columnName: "{column_name}""#));
        }
        Ok(pipe_line("elapsed", &params))
    }
}

/// `|> exponentialMovingAverage(n: ...)` - any integer accepted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExponentialMovingAveragePipe {
    #[serde(default)]
    pub n: i64,
}

impl ExponentialMovingAveragePipe {
    pub fn render(&self) -> FluxResult<String> {
        Ok(format!("|> exponentialMovingAverage(n: {})", self.n))
    }
}

/// `|> filter(fn: ...)` with a verbatim row predicate
///
/// Escape hatch for predicates the [`FluxFilter`](crate::FluxFilter) tree
/// cannot express. Direct construction only; not part of the decode registry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterPipe {
    #[serde(rename = "fn")]
    pub func: String,
}

impl FilterPipe {
    pub fn render(&self) -> FluxResult<String> {
        Ok(format!("|> filter(fn: {})", self.func))
    }
}

/// `|> fill(...)` - requires exactly one of `use_previous = true` or a value
///
/// The value is held untyped; string, integer, float, and boolean values are
/// accepted and anything else is rejected at render time citing its type.
/// A set `use_previous = true` takes precedence over a value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FillPipe {
    pub value: Option<Value>,
    pub column: Option<String>,
    pub use_previous: Option<bool>,
}

impl FillPipe {
    pub fn render(&self) -> FluxResult<String> {
        let mut params = Vec::new();
        if self.use_previous == Some(true) {
            params.push("usePrevious: true".to_string());
        } else if let Some(value) = &self.value {
            match value {
                Value::String(s) => params.push(format!(r#"value: "{s}""#)),
                Value::Number(n) => params.push(format!("value: {n}")),
                Value::Bool(b) => params.push(format!("value: {b}")),
                Value::Null => {}
                other => {
                    return Err(FluxError::InvalidParameter(format!(
                        "unsupported fill value type: {}",
                        json_type_name(other)
                    )))
                }
            }
        }
        if params.is_empty() {
            return Err(FluxError::InvalidParameter(
                "fill requires at least one parameter".to_string(),
            ));
        }
        if let Some(column) = &self.column {
            params.push(format!(r#"column: "{column}""#));
        }
        Ok(pipe_line("fill", &params))
    }
}

/// `|> group(...)`
///
/// Any mode other than `"except"` normalizes to `"by"`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupPipe {
    pub mode: Option<String>,
    #[serde(default)]
    pub columns: Vec<String>,
}

impl GroupPipe {
    pub fn render(&self) -> FluxResult<String> {
        let mut params = Vec::new();
        if let Some(mode) = &self.mode {
            let mode = if mode == "except" { "except" } else { "by" };
            params.push(format!(r#"mode: "{mode}""#));
        }
        if !self.columns.is_empty() {
            params.push(format!("columns: {}", quoted_columns(&self.columns)));
        }
        Ok(pipe_line("group", &params))
    }
}

/// `|> increase()`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncreasePipe {
    #[serde(default)]
    pub columns: Vec<String>,
}

impl IncreasePipe {
    pub fn render(&self) -> FluxResult<String> {
        if self.columns.is_empty() {
            Ok("|> increase()".to_string())
        } else {
            Ok(format!("|> increase(columns: {})", quoted_columns(&self.columns)))
        }
    }
}

/// `|> integral(...)` - the unit duration is required
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntegralPipe {
    #[serde(default)]
    pub unit: Duration,
    pub column: Option<String>,
    pub time_column: Option<String>,
    pub interpolate: Option<String>,
}

impl IntegralPipe {
    pub fn render(&self) -> FluxResult<String> {
        let mut params = Vec::new();
        if let Some(time_column) = &self.time_column {
            params.push(format!(r#"timeColumn: "{time_column}""#));
        }
        self.unit.validate()?;
        params.push(format!("unit: {}", self.unit));
        if let Some(column) = &self.column {
            params.push(format!(r#"column: "{column}""#));
        }
        if let Some(interpolate) = &self.interpolate {
            params.push(format!(r#"interpolate: "{interpolate}""#));
        }
        Ok(pipe_line("integral", &params))
    }
}

/// `|> kaufmansAMA(...)` - any integer accepted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KaufmansAmaPipe {
    #[serde(default)]
    pub n: i64,
    pub column: Option<String>,
}

impl KaufmansAmaPipe {
    pub fn render(&self) -> FluxResult<String> {
        let mut params = vec![format!("n: {}", self.n)];
        if let Some(column) = &self.column {
            params.push(format!(r#"column: "{column}""#));
        }
        Ok(pipe_line("kaufmansAMA", &params))
    }
}

/// `|> kaufmansER(n: ...)` - any integer accepted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KaufmansErPipe {
    #[serde(default)]
    pub n: i64,
}

impl KaufmansErPipe {
    pub fn render(&self) -> FluxResult<String> {
        Ok(format!("|> kaufmansER(n: {})", self.n))
    }
}

/// `|> limit(...)` - any integer accepted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitPipe {
    #[serde(default)]
    pub n: i64,
    pub offset: Option<i64>,
}

impl LimitPipe {
    pub fn render(&self) -> FluxResult<String> {
        let mut params = vec![format!("n: {}", self.n)];
        if let Some(offset) = self.offset {
            params.push(format!("offset: {offset}"));
        }
        Ok(pipe_line("limit", &params))
    }
}

/// `|> max()`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaxPipe {
    pub column: Option<String>,
}

impl MaxPipe {
    pub fn render(&self) -> FluxResult<String> {
        match &self.column {
            Some(column) => Ok(format!(r#"|> max(column: "{column}")"#)),
            None => Ok("|> max()".to_string()),
        }
    }
}

/// `|> min()`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MinPipe {
    pub column: Option<String>,
}

impl MinPipe {
    pub fn render(&self) -> FluxResult<String> {
        match &self.column {
            Some(column) => Ok(format!(r#"|> min(column: "{column}")"#)),
            None => Ok("|> min()".to_string()),
        }
    }
}

/// `|> mean()`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeanPipe {
    pub column: Option<String>,
}

impl MeanPipe {
    pub fn render(&self) -> FluxResult<String> {
        match &self.column {
            Some(column) => Ok(format!(r#"|> mean(column: "{column}")"#)),
            None => Ok("|> mean()".to_string()),
        }
    }
}

/// `|> mode()`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModePipe {
    pub column: Option<String>,
}

impl ModePipe {
    pub fn render(&self) -> FluxResult<String> {
        match &self.column {
            Some(column) => Ok(format!(r#"|> mode(column: "{column}")"#)),
            None => Ok("|> mode()".to_string()),
        }
    }
}

/// Quantile estimation methods for `median` and `quantile`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Estimate {
    EstimateTdigest,
    ExactMean,
    EstimateSelector,
}

impl Estimate {
    fn as_str(&self) -> &'static str {
        match self {
            Self::EstimateTdigest => "estimate_tdigest",
            Self::ExactMean => "exact_mean",
            Self::EstimateSelector => "estimate_selector",
        }
    }
}

/// `|> median(...)`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MedianPipe {
    pub column: Option<String>,
    pub method: Option<Estimate>,
    pub compression: Option<f64>,
}

impl MedianPipe {
    pub fn render(&self) -> FluxResult<String> {
        let mut params = Vec::new();
        if let Some(method) = &self.method {
            params.push(format!(r#"method: "{}""#, method.as_str()));
        }
        if let Some(compression) = self.compression {
            params.push(format!("compression: {compression}"));
        }
        if let Some(column) = &self.column {
            params.push(format!(r#"column: "{column}""#));
        }
        Ok(pipe_line("median", &params))
    }
}

/// `|> movingAverage(n: ...)` - requires n > 0
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovingAveragePipe {
    #[serde(default)]
    pub n: i64,
}

impl MovingAveragePipe {
    pub fn render(&self) -> FluxResult<String> {
        positive(self.n)?;
        Ok(format!("|> movingAverage(n: {})", self.n))
    }
}

/// `|> quantile(...)`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuantilePipe {
    #[serde(default)]
    pub q: f64,
    pub column: Option<String>,
    pub method: Option<Estimate>,
    pub compression: Option<f64>,
}

impl QuantilePipe {
    pub fn render(&self) -> FluxResult<String> {
        let mut params = vec![format!("q: {}", self.q)];
        if let Some(method) = &self.method {
            params.push(format!(r#"method: "{}""#, method.as_str()));
        }
        if let Some(compression) = self.compression {
            params.push(format!("compression: {compression}"));
        }
        if let Some(column) = &self.column {
            params.push(format!(r#"column: "{column}""#));
        }
        Ok(pipe_line("quantile", &params))
    }
}

/// `|> relativeStrengthIndex(...)` - requires n > 0
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelativeStrengthIndexPipe {
    #[serde(default)]
    pub n: i64,
    #[serde(default)]
    pub columns: Vec<String>,
}

impl RelativeStrengthIndexPipe {
    pub fn render(&self) -> FluxResult<String> {
        positive(self.n)?;
        let mut params = vec![format!("n: {}", self.n)];
        if !self.columns.is_empty() {
            params.push(format!("columns: {}", quoted_columns(&self.columns)));
        }
        Ok(pipe_line("relativeStrengthIndex", &params))
    }
}

/// `|> skew()`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkewPipe {
    pub column: Option<String>,
}

impl SkewPipe {
    pub fn render(&self) -> FluxResult<String> {
        match &self.column {
            Some(column) => Ok(format!(r#"|> skew(column: "{column}")"#)),
            None => Ok("|> skew()".to_string()),
        }
    }
}

/// `|> sort(...)`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SortPipe {
    #[serde(default)]
    pub columns: Vec<String>,
    pub desc: Option<bool>,
}

impl SortPipe {
    pub fn render(&self) -> FluxResult<String> {
        let mut params = Vec::new();
        if !self.columns.is_empty() {
            params.push(format!("columns: {}", quoted_columns(&self.columns)));
        }
        if let Some(desc) = self.desc {
            params.push(format!("desc: {desc}"));
        }
        Ok(pipe_line("sort", &params))
    }
}

/// `|> spread()`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpreadPipe {
    pub column: Option<String>,
}

impl SpreadPipe {
    pub fn render(&self) -> FluxResult<String> {
        match &self.column {
            Some(column) => Ok(format!(r#"|> spread(column: "{column}")"#)),
            None => Ok("|> spread()".to_string()),
        }
    }
}

/// `|> stateCount(...)` - `fn` is a verbatim row predicate
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateCountPipe {
    #[serde(rename = "fn")]
    pub func: String,
    pub column: Option<String>,
}

impl StateCountPipe {
    pub fn render(&self) -> FluxResult<String> {
        let mut params = vec![format!("fn: {}", self.func)];
        if let Some(column) = &self.column {
            params.push(format!(r#"column: "{column}""#));
        }
        Ok(pipe_line("stateCount", &params))
    }
}

/// `|> stateDuration(...)` - `fn` is a verbatim row predicate
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateDurationPipe {
    #[serde(rename = "fn")]
    pub func: String,
    pub column: Option<String>,
    pub unit: Option<Duration>,
}

impl StateDurationPipe {
    pub fn render(&self) -> FluxResult<String> {
        let mut params = vec![format!("fn: {}", self.func)];
        if let Some(column) = &self.column {
            params.push(format!(r#"column: "{column}""#));
        }
        if let Some(unit) = &self.unit {
            unit.validate()?;
            params.push(format!("unit: {unit}"));
        }
        Ok(pipe_line("stateDuration", &params))
    }
}

/// Standard deviation modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StddevMode {
    Population,
    Sample,
}

impl StddevMode {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Population => "population",
            Self::Sample => "sample",
        }
    }
}

/// `|> stddev(...)`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StddevPipe {
    pub column: Option<String>,
    pub mode: Option<StddevMode>,
}

impl StddevPipe {
    pub fn render(&self) -> FluxResult<String> {
        let mut params = Vec::new();
        if let Some(mode) = &self.mode {
            params.push(format!(r#"mode: "{}""#, mode.as_str()));
        }
        if let Some(column) = &self.column {
            params.push(format!(r#"column: "{column}""#));
        }
        Ok(pipe_line("stddev", &params))
    }
}

/// `|> sum()`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SumPipe {
    pub column: Option<String>,
}

impl SumPipe {
    pub fn render(&self) -> FluxResult<String> {
        match &self.column {
            Some(column) => Ok(format!(r#"|> sum(column: "{column}")"#)),
            None => Ok("|> sum()".to_string()),
        }
    }
}

/// `|> tail(...)` - requires n > 0
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TailPipe {
    #[serde(default)]
    pub n: i64,
    pub offset: Option<i64>,
}

impl TailPipe {
    pub fn render(&self) -> FluxResult<String> {
        positive(self.n)?;
        let mut params = vec![format!("n: {}", self.n)];
        if let Some(offset) = self.offset {
            params.push(format!("offset: {offset}"));
        }
        Ok(pipe_line("tail", &params))
    }
}

/// `|> timeMovingAverage(...)` - both durations are required
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeMovingAveragePipe {
    #[serde(default)]
    pub every: Duration,
    #[serde(default)]
    pub period: Duration,
    pub column: Option<String>,
}

impl TimeMovingAveragePipe {
    pub fn render(&self) -> FluxResult<String> {
        self.every.validate()?;
        self.period.validate()?;
        let mut params = vec![
            format!("every: {}", self.every),
            format!("period: {}", self.period),
        ];
        if let Some(column) = &self.column {
            params.push(format!(r#"column: "{column}""#));
        }
        Ok(pipe_line("timeMovingAverage", &params))
    }
}

/// `|> timeShift(...)` - the shift duration is required
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeShiftPipe {
    #[serde(default)]
    pub duration: Duration,
    #[serde(default)]
    pub columns: Vec<String>,
}

impl TimeShiftPipe {
    pub fn render(&self) -> FluxResult<String> {
        self.duration.validate()?;
        let mut params = vec![format!("duration: {}", self.duration)];
        if !self.columns.is_empty() {
            params.push(format!("columns: {}", quoted_columns(&self.columns)));
        }
        Ok(pipe_line("timeShift", &params))
    }
}

/// `|> keep(...)` - requires a non-empty column list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeepPipe {
    #[serde(default)]
    pub columns: Vec<String>,
}

impl KeepPipe {
    pub fn render(&self) -> FluxResult<String> {
        if self.columns.is_empty() {
            return Err(FluxError::InvalidParameter(
                "keep requires at least one column".to_string(),
            ));
        }
        Ok(format!("|> keep(columns: {})", quoted_columns(&self.columns)))
    }
}

/// `|> drop(...)` - requires a non-empty column list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DropPipe {
    #[serde(default)]
    pub columns: Vec<String>,
}

impl DropPipe {
    pub fn render(&self) -> FluxResult<String> {
        if self.columns.is_empty() {
            return Err(FluxError::InvalidParameter(
                "drop requires at least one column".to_string(),
            ));
        }
        Ok(format!("|> drop(columns: {})", quoted_columns(&self.columns)))
    }
}

/// `|> timeWeightedAvg(unit: ...)`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeWeightedAvgPipe {
    #[serde(default)]
    pub unit: Duration,
}

impl TimeWeightedAvgPipe {
    pub fn render(&self) -> FluxResult<String> {
        self.unit.validate()?;
        Ok(format!("|> timeWeightedAvg(unit: {})", self.unit))
    }
}

/// `|> tripleEMA(n: ...)` - requires n > 0
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripleEmaPipe {
    #[serde(default)]
    pub n: i64,
}

impl TripleEmaPipe {
    pub fn render(&self) -> FluxResult<String> {
        positive(self.n)?;
        Ok(format!("|> tripleEMA(n: {})", self.n))
    }
}

/// `|> tripleExponentialDerivative(n: ...)` - requires n > 0
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripleExponentialDerivativePipe {
    #[serde(default)]
    pub n: i64,
}

impl TripleExponentialDerivativePipe {
    pub fn render(&self) -> FluxResult<String> {
        positive(self.n)?;
        Ok(format!("|> tripleExponentialDerivative(n: {})", self.n))
    }
}

/// `|> truncateTimeColumn(unit: ...)`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TruncateTimeColumnPipe {
    #[serde(default)]
    pub unit: Duration,
}

impl TruncateTimeColumnPipe {
    pub fn render(&self) -> FluxResult<String> {
        self.unit.validate()?;
        Ok(format!("|> truncateTimeColumn(unit: {})", self.unit))
    }
}

/// `|> unique()`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UniquePipe {
    pub column: Option<String>,
}

impl UniquePipe {
    pub fn render(&self) -> FluxResult<String> {
        match &self.column {
            Some(column) => Ok(format!(r#"|> unique(column: "{column}")"#)),
            None => Ok("|> unique()".to_string()),
        }
    }
}

/// `|> window(...)` - requires at least one of `every` or `period`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindowPipe {
    pub every: Option<Duration>,
    pub period: Option<Duration>,
    pub offset: Option<Duration>,
    pub time_column: Option<String>,
    pub start_column: Option<String>,
    pub stop_column: Option<String>,
    pub location: Option<String>,
    pub create_empty: Option<bool>,
}

impl WindowPipe {
    pub fn render(&self) -> FluxResult<String> {
        let mut params = Vec::new();
        if let Some(every) = &self.every {
            every.validate()?;
            params.push(format!("every: {every}"));
        }
        if let Some(period) = &self.period {
            period.validate()?;
            params.push(format!("period: {period}"));
        }
        if params.is_empty() {
            return Err(FluxError::InvalidParameter(
                r#"window requires at least one of "every" or "period" to be set and non-zero"#
                    .to_string(),
            ));
        }
        if let Some(offset) = &self.offset {
            offset.validate()?;
            params.push(format!("offset: {offset}"));
        }
        if let Some(time_column) = &self.time_column {
            params.push(format!(r#"timeColumn: "{time_column}""#));
        }
        if let Some(start_column) = &self.start_column {
            params.push(format!(r#"startColumn: "{start_column}""#));
        }
        if let Some(stop_column) = &self.stop_column {
            params.push(format!(r#"stopColumn: "{stop_column}""#));
        }
        if let Some(location) = &self.location {
            params.push(format!(r#"location: "{location}""#));
        }
        if let Some(create_empty) = self.create_empty {
            params.push(format!("createEmpty: {create_empty}"));
        }
        Ok(pipe_line("window", &params))
    }
}

/// `|> yield()`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct YieldPipe {
    pub name: Option<String>,
}

impl YieldPipe {
    pub fn render(&self) -> FluxResult<String> {
        match &self.name {
            Some(name) => Ok(format!(r#"|> yield(name: "{name}")"#)),
            None => Ok("|> yield()".to_string()),
        }
    }
}
