//! Filter predicate trees
//!
//! A [`FluxFilter`] is a recursive boolean expression over row-level
//! conditions: measurement, field, and tag comparisons (equality, inequality,
//! regex match, regex non-match) plus a raw `_value` comparison, combined
//! with NOT / AND / OR. A tree renders to a single boolean expression used
//! inside a Flux `filter(fn: (r) => ...)` pipe line.
//!
//! # Example
//!
//! ```rust
//! use fluxcraft::FluxFilter;
//!
//! let filter = FluxFilter::new()
//!     .measurement("sensor")
//!     .tag_key("room")
//!     .tag("kitchen");
//!
//! assert_eq!(
//!     filter.to_pipe().unwrap(),
//!     r#"|> filter(fn: (r) => r._measurement == "sensor" and r.room == "kitchen")"#
//! );
//! ```

use crate::error::{FluxError, FluxResult};

/// A node in a boolean filter expression tree
///
/// Built once through chained setters, rendered any number of times.
/// Rendering a node with zero populated conditions fails with
/// [`FluxError::EmptyPredicate`]: an empty node is never a structural no-op.
#[derive(Debug, Clone, Default)]
pub struct FluxFilter {
    not: Option<Box<FluxFilter>>,
    or: Vec<FluxFilter>,
    and: Vec<FluxFilter>,

    measurement: Option<String>,
    measurement_neq: Option<String>,
    measurement_match: Option<String>,
    measurement_nmatch: Option<String>,

    field: Option<String>,
    field_neq: Option<String>,
    field_match: Option<String>,
    field_nmatch: Option<String>,

    tag_key: Option<String>,
    tag: Option<String>,
    tag_neq: Option<String>,
    tag_match: Option<String>,
    tag_nmatch: Option<String>,

    value: Option<String>,
}

impl FluxFilter {
    /// Create an empty filter node
    pub fn new() -> Self {
        Self::default()
    }

    /// Negate a child node, rendered as `not (<child>)`
    pub fn not(mut self, child: FluxFilter) -> Self {
        self.not = Some(Box::new(child));
        self
    }

    /// Add a child to the OR group
    pub fn or(mut self, child: FluxFilter) -> Self {
        self.or.push(child);
        self
    }

    /// Add a child to the AND group
    pub fn and(mut self, child: FluxFilter) -> Self {
        self.and.push(child);
        self
    }

    /// `r._measurement == "<name>"`
    pub fn measurement(mut self, name: impl Into<String>) -> Self {
        self.measurement = Some(name.into());
        self
    }

    /// `r._measurement != "<name>"`
    pub fn measurement_neq(mut self, name: impl Into<String>) -> Self {
        self.measurement_neq = Some(name.into());
        self
    }

    /// `r._measurement =~ "<pattern>"`
    pub fn measurement_match(mut self, pattern: impl Into<String>) -> Self {
        self.measurement_match = Some(pattern.into());
        self
    }

    /// `r._measurement !~ "<pattern>"`
    pub fn measurement_nmatch(mut self, pattern: impl Into<String>) -> Self {
        self.measurement_nmatch = Some(pattern.into());
        self
    }

    /// `r._field == "<name>"`
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.field = Some(name.into());
        self
    }

    /// `r._field != "<name>"`
    pub fn field_neq(mut self, name: impl Into<String>) -> Self {
        self.field_neq = Some(name.into());
        self
    }

    /// `r._field =~ "<pattern>"`
    pub fn field_match(mut self, pattern: impl Into<String>) -> Self {
        self.field_match = Some(pattern.into());
        self
    }

    /// `r._field !~ "<pattern>"`
    pub fn field_nmatch(mut self, pattern: impl Into<String>) -> Self {
        self.field_nmatch = Some(pattern.into());
        self
    }

    /// Name the tag key the tag conditions apply to
    ///
    /// Tag conditions contribute nothing unless a key is set.
    pub fn tag_key(mut self, key: impl Into<String>) -> Self {
        self.tag_key = Some(key.into());
        self
    }

    /// `r.<key> == "<value>"`
    pub fn tag(mut self, value: impl Into<String>) -> Self {
        self.tag = Some(value.into());
        self
    }

    /// `r.<key> != "<value>"`
    pub fn tag_neq(mut self, value: impl Into<String>) -> Self {
        self.tag_neq = Some(value.into());
        self
    }

    /// `r.<key> =~ "<pattern>"`
    pub fn tag_match(mut self, pattern: impl Into<String>) -> Self {
        self.tag_match = Some(pattern.into());
        self
    }

    /// `r.<key> !~ "<pattern>"`
    pub fn tag_nmatch(mut self, pattern: impl Into<String>) -> Self {
        self.tag_nmatch = Some(pattern.into());
        self
    }

    /// Raw comparison against `r._value`, appended verbatim (e.g. `"> 10"`)
    pub fn value(mut self, expr: impl Into<String>) -> Self {
        self.value = Some(expr.into());
        self
    }

    /// Render the boolean expression for this node
    ///
    /// Clauses are contributed in fixed order (NOT, OR, AND, measurement,
    /// field, tag, value) and joined with ` and `. The first error from a
    /// recursive render aborts the whole render.
    pub fn render(&self) -> FluxResult<String> {
        let mut clauses: Vec<String> = Vec::new();

        if let Some(not) = &self.not {
            clauses.push(format!("not ({})", not.render()?));
        }

        match self.or.len() {
            0 => {}
            1 => clauses.push(self.or[0].render()?),
            _ => {
                let parts = self
                    .or
                    .iter()
                    .map(|n| n.render())
                    .collect::<FluxResult<Vec<_>>>()?;
                clauses.push(format!("({})", parts.join(" or ")));
            }
        }

        match self.and.len() {
            0 => {}
            1 => clauses.push(self.and[0].render()?),
            _ => {
                let parts = self
                    .and
                    .iter()
                    .map(|n| n.render())
                    .collect::<FluxResult<Vec<_>>>()?;
                clauses.push(format!("({})", parts.join(" and ")));
            }
        }

        if let Some(m) = &self.measurement {
            clauses.push(format!(r#"r._measurement == "{m}""#));
        }
        if let Some(m) = &self.measurement_neq {
            clauses.push(format!(r#"r._measurement != "{m}""#));
        }
        if let Some(m) = &self.measurement_match {
            clauses.push(format!(r#"r._measurement =~ "{m}""#));
        }
        if let Some(m) = &self.measurement_nmatch {
            clauses.push(format!(r#"r._measurement !~ "{m}""#));
        }

        if let Some(f) = &self.field {
            clauses.push(format!(r#"r._field == "{f}""#));
        }
        if let Some(f) = &self.field_neq {
            clauses.push(format!(r#"r._field != "{f}""#));
        }
        if let Some(f) = &self.field_match {
            clauses.push(format!(r#"r._field =~ "{f}""#));
        }
        if let Some(f) = &self.field_nmatch {
            clauses.push(format!(r#"r._field !~ "{f}""#));
        }

        if let Some(key) = &self.tag_key {
            if let Some(t) = &self.tag {
                clauses.push(format!(r#"r.{key} == "{t}""#));
            }
            if let Some(t) = &self.tag_neq {
                clauses.push(format!(r#"r.{key} != "{t}""#));
            }
            if let Some(t) = &self.tag_match {
                clauses.push(format!(r#"r.{key} =~ "{t}""#));
            }
            if let Some(t) = &self.tag_nmatch {
                clauses.push(format!(r#"r.{key} !~ "{t}""#));
            }
        }

        if let Some(v) = &self.value {
            clauses.push(format!("r._value {v}"));
        }

        if clauses.is_empty() {
            return Err(FluxError::EmptyPredicate);
        }
        Ok(clauses.join(" and "))
    }

    /// Render the full `|> filter(...)` pipe line for this tree
    pub fn to_pipe(&self) -> FluxResult<String> {
        Ok(format!("|> filter(fn: (r) => {})", self.render()?))
    }
}
