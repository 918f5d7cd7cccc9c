//! Transform pipe stages
//!
//! A query's data-processing chain is an ordered list of [`Transform`]
//! stages, each rendering to one `|> name(...)` line. Stages come from two
//! places:
//!
//! - **Typed construction**: build the stage struct directly and wrap it in
//!   its [`Transform`] variant.
//! - **Dynamic decoding**: a `{name, params}` pair from a deserialized
//!   payload, resolved through [`TransformInput`] / [`Transform::decode`].
//!
//! The variant set is closed: dispatch over stages is an exhaustive match,
//! so a stage added to the enum without a render arm or a registry entry is
//! a compile error or an immediate test failure rather than a silent gap.

mod aggregate;
mod registry;
mod universe;

pub use aggregate::{AggregateWindowPipe, Reducer};
pub use registry::TransformInput;
pub use universe::{
    BottomPipe, CountPipe, CumulativeSumPipe, DerivativePipe, DifferencePipe, DistinctPipe,
    DoubleEmaPipe, DropPipe, ElapsedPipe, Estimate, ExponentialMovingAveragePipe, FillPipe,
    FilterPipe, GroupPipe, IncreasePipe, IntegralPipe, KaufmansAmaPipe, KaufmansErPipe, KeepPipe,
    LimitPipe, MaxPipe, MeanPipe, MedianPipe, MinPipe, ModePipe, MovingAveragePipe, QuantilePipe,
    RelativeStrengthIndexPipe, SkewPipe, SortPipe, SpreadPipe, StateCountPipe, StateDurationPipe,
    StddevMode, StddevPipe, SumPipe, TailPipe, TimeMovingAveragePipe, TimeShiftPipe,
    TimeWeightedAvgPipe, TopPipe, TripleEmaPipe, TripleExponentialDerivativePipe,
    TruncateTimeColumnPipe, UniquePipe, WindowPipe, YieldPipe,
};

use crate::error::FluxResult;

/// Format one pipe line from a stage name and its rendered parameters
pub(crate) fn pipe_line(name: &str, params: &[String]) -> String {
    format!("|> {}({})", name, params.join(", "))
}

/// Render a column list as `["a", "b"]`
pub(crate) fn quoted_columns(columns: &[String]) -> String {
    format!(r#"["{}"]"#, columns.join(r#"", ""#))
}

/// One transformation stage in a query's pipe chain
///
/// Closed union over every supported stage. The parameterless casts and
/// terminals are plain variants; everything else carries its stage struct.
#[derive(Debug, Clone)]
pub enum Transform {
    AggregateWindow(AggregateWindowPipe),
    Bottom(BottomPipe),
    Top(TopPipe),
    Count(CountPipe),
    CumulativeSum(CumulativeSumPipe),
    Derivative(DerivativePipe),
    Difference(DifferencePipe),
    Distinct(DistinctPipe),
    DoubleEma(DoubleEmaPipe),
    Drop(DropPipe),
    Elapsed(ElapsedPipe),
    ExponentialMovingAverage(ExponentialMovingAveragePipe),
    Fill(FillPipe),
    Filter(FilterPipe),
    First,
    Group(GroupPipe),
    Increase(IncreasePipe),
    Integral(IntegralPipe),
    KaufmansAma(KaufmansAmaPipe),
    KaufmansEr(KaufmansErPipe),
    Keep(KeepPipe),
    Last,
    Limit(LimitPipe),
    Max(MaxPipe),
    Mean(MeanPipe),
    Median(MedianPipe),
    Min(MinPipe),
    Mode(ModePipe),
    MovingAverage(MovingAveragePipe),
    Quantile(QuantilePipe),
    RelativeStrengthIndex(RelativeStrengthIndexPipe),
    Skew(SkewPipe),
    Sort(SortPipe),
    Spread(SpreadPipe),
    StateCount(StateCountPipe),
    StateDuration(StateDurationPipe),
    Stddev(StddevPipe),
    Sum(SumPipe),
    Tail(TailPipe),
    TimeMovingAverage(TimeMovingAveragePipe),
    TimeShift(TimeShiftPipe),
    TimeWeightedAvg(TimeWeightedAvgPipe),
    ToBool,
    ToFloat,
    ToInt,
    ToString,
    ToTime,
    ToUInt,
    TripleEma(TripleEmaPipe),
    TripleExponentialDerivative(TripleExponentialDerivativePipe),
    TruncateTimeColumn(TruncateTimeColumnPipe),
    Unique(UniquePipe),
    Window(WindowPipe),
    Yield(YieldPipe),
}

impl Transform {
    /// The Flux stage name this variant renders as
    pub fn name(&self) -> &'static str {
        match self {
            Self::AggregateWindow(_) => "aggregateWindow",
            Self::Bottom(_) => "bottom",
            Self::Top(_) => "top",
            Self::Count(_) => "count",
            Self::CumulativeSum(_) => "cumulativeSum",
            Self::Derivative(_) => "derivative",
            Self::Difference(_) => "difference",
            Self::Distinct(_) => "distinct",
            Self::DoubleEma(_) => "doubleEMA",
            Self::Drop(_) => "drop",
            Self::Elapsed(_) => "elapsed",
            Self::ExponentialMovingAverage(_) => "exponentialMovingAverage",
            Self::Fill(_) => "fill",
            Self::Filter(_) => "filter",
            Self::First => "first",
            Self::Group(_) => "group",
            Self::Increase(_) => "increase",
            Self::Integral(_) => "integral",
            Self::KaufmansAma(_) => "kaufmansAMA",
            Self::KaufmansEr(_) => "kaufmansER",
            Self::Keep(_) => "keep",
            Self::Last => "last",
            Self::Limit(_) => "limit",
            Self::Max(_) => "max",
            Self::Mean(_) => "mean",
            Self::Median(_) => "median",
            Self::Min(_) => "min",
            Self::Mode(_) => "mode",
            Self::MovingAverage(_) => "movingAverage",
            Self::Quantile(_) => "quantile",
            Self::RelativeStrengthIndex(_) => "relativeStrengthIndex",
            Self::Skew(_) => "skew",
            Self::Sort(_) => "sort",
            Self::Spread(_) => "spread",
            Self::StateCount(_) => "stateCount",
            Self::StateDuration(_) => "stateDuration",
            Self::Stddev(_) => "stddev",
            Self::Sum(_) => "sum",
            Self::Tail(_) => "tail",
            Self::TimeMovingAverage(_) => "timeMovingAverage",
            Self::TimeShift(_) => "timeShift",
            Self::TimeWeightedAvg(_) => "timeWeightedAvg",
            Self::ToBool => "toBool",
            Self::ToFloat => "toFloat",
            Self::ToInt => "toInt",
            Self::ToString => "toString",
            Self::ToTime => "toTime",
            Self::ToUInt => "toUInt",
            Self::TripleEma(_) => "tripleEMA",
            Self::TripleExponentialDerivative(_) => "tripleExponentialDerivative",
            Self::TruncateTimeColumn(_) => "truncateTimeColumn",
            Self::Unique(_) => "unique",
            Self::Window(_) => "window",
            Self::Yield(_) => "yield",
        }
    }

    /// Render this stage as a single pipe line
    ///
    /// Pure and idempotent; validation failures surface here, never during
    /// construction.
    pub fn render(&self) -> FluxResult<String> {
        match self {
            Self::AggregateWindow(p) => p.render(),
            Self::Bottom(p) => p.render(),
            Self::Top(p) => p.render(),
            Self::Count(p) => p.render(),
            Self::CumulativeSum(p) => p.render(),
            Self::Derivative(p) => p.render(),
            Self::Difference(p) => p.render(),
            Self::Distinct(p) => p.render(),
            Self::DoubleEma(p) => p.render(),
            Self::Drop(p) => p.render(),
            Self::Elapsed(p) => p.render(),
            Self::ExponentialMovingAverage(p) => p.render(),
            Self::Fill(p) => p.render(),
            Self::Filter(p) => p.render(),
            Self::First => Ok("|> first()".to_string()),
            Self::Group(p) => p.render(),
            Self::Increase(p) => p.render(),
            Self::Integral(p) => p.render(),
            Self::KaufmansAma(p) => p.render(),
            Self::KaufmansEr(p) => p.render(),
            Self::Keep(p) => p.render(),
            Self::Last => Ok("|> last()".to_string()),
            Self::Limit(p) => p.render(),
            Self::Max(p) => p.render(),
            Self::Mean(p) => p.render(),
            Self::Median(p) => p.render(),
            Self::Min(p) => p.render(),
            Self::Mode(p) => p.render(),
            Self::MovingAverage(p) => p.render(),
            Self::Quantile(p) => p.render(),
            Self::RelativeStrengthIndex(p) => p.render(),
            Self::Skew(p) => p.render(),
            Self::Sort(p) => p.render(),
            Self::Spread(p) => p.render(),
            Self::StateCount(p) => p.render(),
            Self::StateDuration(p) => p.render(),
            Self::Stddev(p) => p.render(),
            Self::Sum(p) => p.render(),
            Self::Tail(p) => p.render(),
            Self::TimeMovingAverage(p) => p.render(),
            Self::TimeShift(p) => p.render(),
            Self::TimeWeightedAvg(p) => p.render(),
            Self::ToBool => Ok("|> toBool()".to_string()),
            Self::ToFloat => Ok("|> toFloat()".to_string()),
            Self::ToInt => Ok("|> toInt()".to_string()),
            Self::ToString => Ok("|> toString()".to_string()),
            Self::ToTime => Ok("|> toTime()".to_string()),
            Self::ToUInt => Ok("|> toUInt()".to_string()),
            Self::TripleEma(p) => p.render(),
            Self::TripleExponentialDerivative(p) => p.render(),
            Self::TruncateTimeColumn(p) => p.render(),
            Self::Unique(p) => p.render(),
            Self::Window(p) => p.render(),
            Self::Yield(p) => p.render(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_stages_always_succeed() {
        assert_eq!(Transform::ToBool.render().unwrap(), "|> toBool()");
        assert_eq!(Transform::ToFloat.render().unwrap(), "|> toFloat()");
        assert_eq!(Transform::ToInt.render().unwrap(), "|> toInt()");
        assert_eq!(Transform::ToString.render().unwrap(), "|> toString()");
        assert_eq!(Transform::ToTime.render().unwrap(), "|> toTime()");
        assert_eq!(Transform::ToUInt.render().unwrap(), "|> toUInt()");
    }

    #[test]
    fn test_terminal_stages_always_succeed() {
        assert_eq!(Transform::First.render().unwrap(), "|> first()");
        assert_eq!(Transform::Last.render().unwrap(), "|> last()");
        assert_eq!(Transform::Yield(YieldPipe::default()).render().unwrap(), "|> yield()");
    }

    #[test]
    fn test_name_matches_rendered_stage() {
        let t = Transform::Top(TopPipe { n: 1, columns: vec![] });
        assert_eq!(t.name(), "top");
        assert!(t.render().unwrap().starts_with("|> top("));

        let t = Transform::MovingAverage(MovingAveragePipe { n: 3 });
        assert_eq!(t.name(), "movingAverage");
        assert_eq!(t.render().unwrap(), "|> movingAverage(n: 3)");
    }

    #[test]
    fn test_render_error_propagates_through_dispatch() {
        let t = Transform::Keep(KeepPipe::default());
        assert!(t.render().is_err());
    }
}
