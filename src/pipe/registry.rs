//! Dynamic stage decoding
//!
//! Maps a stage name plus an untyped key/value parameter bag to a typed
//! [`Transform`]. The bag is expected to originate from a deserialized
//! payload such as a JSON request body of the shape
//! `{"name": "fill", "params": {"value": 5}}`.
//!
//! Parameter keys are matched case-insensitively-friendly: camelCase,
//! PascalCase, and snake_case spellings all resolve to the same field, so
//! `{"Value": 5}`, `{"value": 5}`, and `{"timeColumn": ...}` /
//! `{"time_column": ...}` decode alike.

use crate::error::{FluxError, FluxResult};
use crate::pipe::{Transform, YieldPipe};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A named stage with its raw parameter bag, as received from a payload
#[derive(Debug, Clone, Deserialize)]
pub struct TransformInput {
    /// Registered stage name, e.g. `"aggregateWindow"`
    pub name: String,
    /// Raw parameters; absent means "construct the zero-argument form"
    #[serde(default)]
    pub params: Option<Map<String, Value>>,
}

impl TransformInput {
    /// Create an input from a name and an optional parameter bag
    pub fn new(name: impl Into<String>, params: Option<Map<String, Value>>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// Decode into a typed stage
    pub fn decode(&self) -> FluxResult<Transform> {
        Transform::decode(&self.name, self.params.as_ref())
    }
}

/// Normalize a parameter key to the snake_case field spelling
fn snake_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower = false;
        } else {
            prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
            out.push(ch);
        }
    }
    out
}

/// Decode a parameter bag into one stage's typed fields
///
/// An absent bag decodes like an empty one: scalar fields take their
/// defaulted zero values and optionals stay absent.
fn decode_stage<T: DeserializeOwned>(
    name: &str,
    params: Option<&Map<String, Value>>,
) -> FluxResult<T> {
    let normalized: Map<String, Value> = params
        .map(|bag| bag.iter().map(|(k, v)| (snake_key(k), v.clone())).collect())
        .unwrap_or_default();
    serde_json::from_value(Value::Object(normalized)).map_err(|source| FluxError::Decode {
        name: name.to_string(),
        source,
    })
}

/// Like [`decode_stage`], but an absent bag short-circuits to the stage's
/// zero-argument form without attempting a decode
fn decode_or_default<T: DeserializeOwned + Default>(
    name: &str,
    params: Option<&Map<String, Value>>,
) -> FluxResult<T> {
    match params {
        None => Ok(T::default()),
        Some(_) => decode_stage(name, params),
    }
}

impl Transform {
    /// Look up `name` in the stage registry and decode `params` into its
    /// typed form
    ///
    /// Unknown names fail with [`FluxError::UnknownTransform`]; a bag that
    /// cannot be coerced into the stage's fields fails with
    /// [`FluxError::Decode`].
    pub fn decode(name: &str, params: Option<&Map<String, Value>>) -> FluxResult<Transform> {
        let transform = match name {
            "aggregateWindow" => Transform::AggregateWindow(decode_stage(name, params)?),
            "bottom" => Transform::Bottom(decode_stage(name, params)?),
            "top" => Transform::Top(decode_stage(name, params)?),
            "count" => Transform::Count(decode_or_default(name, params)?),
            "cumulativeSum" => Transform::CumulativeSum(decode_or_default(name, params)?),
            "derivative" => Transform::Derivative(decode_or_default(name, params)?),
            "difference" => Transform::Difference(decode_or_default(name, params)?),
            "distinct" => Transform::Distinct(decode_or_default(name, params)?),
            "doubleEMA" => Transform::DoubleEma(decode_stage(name, params)?),
            "drop" => Transform::Drop(decode_stage(name, params)?),
            "elapsed" => Transform::Elapsed(decode_or_default(name, params)?),
            "exponentialMovingAverage" => {
                Transform::ExponentialMovingAverage(decode_stage(name, params)?)
            }
            "fill" => Transform::Fill(decode_stage(name, params)?),
            "first" => Transform::First,
            "group" => Transform::Group(decode_or_default(name, params)?),
            "increase" => Transform::Increase(decode_or_default(name, params)?),
            "integral" => Transform::Integral(decode_stage(name, params)?),
            "kaufmansAMA" => Transform::KaufmansAma(decode_stage(name, params)?),
            "kaufmansER" => Transform::KaufmansEr(decode_stage(name, params)?),
            "keep" => Transform::Keep(decode_stage(name, params)?),
            "last" => Transform::Last,
            "limit" => Transform::Limit(decode_stage(name, params)?),
            "max" => Transform::Max(decode_or_default(name, params)?),
            "mean" => Transform::Mean(decode_or_default(name, params)?),
            "median" => Transform::Median(decode_or_default(name, params)?),
            "min" => Transform::Min(decode_or_default(name, params)?),
            "mode" => Transform::Mode(decode_or_default(name, params)?),
            "movingAverage" => Transform::MovingAverage(decode_stage(name, params)?),
            "quantile" => Transform::Quantile(decode_stage(name, params)?),
            "relativeStrengthIndex" => {
                Transform::RelativeStrengthIndex(decode_stage(name, params)?)
            }
            "skew" => Transform::Skew(decode_or_default(name, params)?),
            "sort" => Transform::Sort(decode_or_default(name, params)?),
            "spread" => Transform::Spread(decode_or_default(name, params)?),
            "stateCount" => Transform::StateCount(decode_stage(name, params)?),
            "stateDuration" => Transform::StateDuration(decode_stage(name, params)?),
            "stddev" => Transform::Stddev(decode_or_default(name, params)?),
            "sum" => Transform::Sum(decode_or_default(name, params)?),
            "tail" => Transform::Tail(decode_stage(name, params)?),
            "timeMovingAverage" => Transform::TimeMovingAverage(decode_stage(name, params)?),
            "timeShift" => Transform::TimeShift(decode_stage(name, params)?),
            "timeWeightedAvg" => Transform::TimeWeightedAvg(decode_stage(name, params)?),
            "toBool" => Transform::ToBool,
            "toFloat" => Transform::ToFloat,
            "toInt" => Transform::ToInt,
            "toString" => Transform::ToString,
            "toTime" => Transform::ToTime,
            "toUInt" => Transform::ToUInt,
            "tripleEMA" => Transform::TripleEma(decode_stage(name, params)?),
            "tripleExponentialDerivative" => {
                Transform::TripleExponentialDerivative(decode_stage(name, params)?)
            }
            "truncateTimeColumn" => Transform::TruncateTimeColumn(decode_stage(name, params)?),
            "unique" => Transform::Unique(decode_or_default(name, params)?),
            "window" => Transform::Window(decode_stage(name, params)?),
            "yield" => Transform::Yield(YieldPipe::default()),
            _ => return Err(FluxError::UnknownTransform(name.to_string())),
        };

        tracing::trace!(transform = name, "decoded transform stage");
        Ok(transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: Value) -> Option<Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_snake_key_spellings() {
        assert_eq!(snake_key("value"), "value");
        assert_eq!(snake_key("Value"), "value");
        assert_eq!(snake_key("N"), "n");
        assert_eq!(snake_key("timeColumn"), "time_column");
        assert_eq!(snake_key("TimeColumn"), "time_column");
        assert_eq!(snake_key("time_column"), "time_column");
        assert_eq!(snake_key("createEmpty"), "create_empty");
        assert_eq!(snake_key("nonNegative"), "non_negative");
        assert_eq!(snake_key("fn"), "fn");
    }

    #[test]
    fn test_decode_fill_with_pascal_case_key() {
        let t = Transform::decode("fill", bag(json!({"Value": 5})).as_ref()).unwrap();
        assert_eq!(t.render().unwrap(), "|> fill(value: 5)");
    }

    #[test]
    fn test_decode_fill_empty_params_fails_at_render() {
        let t = Transform::decode("fill", bag(json!({})).as_ref()).unwrap();
        let err = t.render().unwrap_err();
        assert!(matches!(err, FluxError::InvalidParameter(_)));
        assert!(err.to_string().contains("fill requires at least one parameter"));
    }

    #[test]
    fn test_decode_unknown_name() {
        let err = Transform::decode("blargh", None).unwrap_err();
        assert!(matches!(err, FluxError::UnknownTransform(name) if name == "blargh"));
    }

    #[test]
    fn test_decode_type_mismatch() {
        let err = Transform::decode("top", bag(json!({"n": "five"})).as_ref()).unwrap_err();
        assert!(matches!(err, FluxError::Decode { name, .. } if name == "top"));
    }

    #[test]
    fn test_nil_params_construct_zero_forms() {
        for name in [
            "count",
            "cumulativeSum",
            "derivative",
            "difference",
            "distinct",
            "elapsed",
            "group",
            "increase",
            "max",
            "mean",
            "median",
            "min",
            "mode",
            "skew",
            "sort",
            "spread",
            "stddev",
            "sum",
            "unique",
        ] {
            let t = Transform::decode(name, None).unwrap();
            assert_eq!(t.render().unwrap(), format!("|> {name}()"));
        }
    }

    #[test]
    fn test_zero_argument_stages_ignore_params() {
        let t = Transform::decode("first", None).unwrap();
        assert_eq!(t.render().unwrap(), "|> first()");
        let t = Transform::decode("toUInt", None).unwrap();
        assert_eq!(t.render().unwrap(), "|> toUInt()");
        // yield always constructs the bare form
        let t = Transform::decode("yield", bag(json!({"name": "ignored"})).as_ref()).unwrap();
        assert_eq!(t.render().unwrap(), "|> yield()");
    }

    #[test]
    fn test_decode_aggregate_window() {
        let params = bag(json!({
            "Fn": "mean",
            "Every": "1h",
            "createEmpty": true,
            "TimeSrc": "_stop"
        }));
        let t = Transform::decode("aggregateWindow", params.as_ref()).unwrap();
        assert_eq!(
            t.render().unwrap(),
            r#"|> aggregateWindow(fn: mean, every: 1h, timeSrc: "_stop", createEmpty: true)"#
        );
    }

    #[test]
    fn test_decode_aggregate_window_missing_fn_is_decode_error() {
        let err = Transform::decode("aggregateWindow", bag(json!({"every": "1h"})).as_ref())
            .unwrap_err();
        assert!(matches!(err, FluxError::Decode { .. }));
    }

    #[test]
    fn test_decoded_duration_stays_lazy() {
        // Decode accepts an invalid duration literal; the error surfaces at render.
        let t = Transform::decode("timeShift", bag(json!({"duration": "soon"})).as_ref()).unwrap();
        assert!(matches!(t.render(), Err(FluxError::MalformedDuration(_))));
    }

    #[test]
    fn test_decode_moving_average_defaults_to_zero_then_fails_validation() {
        let t = Transform::decode("movingAverage", bag(json!({})).as_ref()).unwrap();
        assert!(matches!(t.render(), Err(FluxError::InvalidParameter(_))));
    }

    #[test]
    fn test_decode_window_with_mixed_key_spellings() {
        let params = bag(json!({
            "every": "1h",
            "time_column": "_time",
            "CreateEmpty": false
        }));
        let t = Transform::decode("window", params.as_ref()).unwrap();
        assert_eq!(
            t.render().unwrap(),
            r#"|> window(every: 1h, timeColumn: "_time", createEmpty: false)"#
        );
    }

    #[test]
    fn test_keep_and_drop_are_registered() {
        let t = Transform::decode("keep", bag(json!({"columns": ["_value"]})).as_ref()).unwrap();
        assert_eq!(t.render().unwrap(), r#"|> keep(columns: ["_value"])"#);
        let t = Transform::decode("drop", bag(json!({"columns": ["host"]})).as_ref()).unwrap();
        assert_eq!(t.render().unwrap(), r#"|> drop(columns: ["host"])"#);
    }

    #[test]
    fn test_transform_input_from_json() {
        let input: TransformInput =
            serde_json::from_str(r#"{"name": "top", "params": {"n": 5, "columns": ["_value"]}}"#)
                .unwrap();
        let t = input.decode().unwrap();
        assert_eq!(t.render().unwrap(), r#"|> top(n: 5, columns: ["_value"])"#);

        let input: TransformInput = serde_json::from_str(r#"{"name": "count"}"#).unwrap();
        assert_eq!(input.decode().unwrap().render().unwrap(), "|> count()");
    }

    #[test]
    fn test_unknown_params_are_ignored() {
        let t = Transform::decode("count", bag(json!({"bogus": 1})).as_ref()).unwrap();
        assert_eq!(t.render().unwrap(), "|> count()");
    }
}
