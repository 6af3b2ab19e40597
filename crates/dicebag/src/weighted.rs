//! Weighted entries and the cumulative-weight sampler.

use crate::error::{RandomError, Result};
use crate::source::UniformSource;
use serde_json::Value;
use tracing::debug;

/// Largest total for which every integer is exactly representable as `f64`.
const MAX_EXACT_TOTAL: f64 = 9_007_199_254_740_992.0;

/// One selectable branch of a discrete distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightEntry {
    weight: f64,
    parameters: Vec<Value>,
}

impl WeightEntry {
    /// Create an entry. The weight must be finite and strictly positive.
    pub fn new(weight: f64, parameters: Vec<Value>) -> Result<Self> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(RandomError::invalid_argument(format!(
                "weight '{}' must be a positive number",
                weight
            )));
        }
        Ok(Self { weight, parameters })
    }

    /// Create an entry from a dynamic weight, which must be numeric.
    ///
    /// Numeric strings such as `"12.5"` are accepted.
    pub fn from_value(weight: &Value, parameters: Vec<Value>) -> Result<Self> {
        let numeric = match weight {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match numeric {
            Some(w) => Self::new(w, parameters),
            None => Err(RandomError::invalid_argument(format!(
                "weight '{}' must be numeric",
                weight
            ))),
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn parameters(&self) -> &[Value] {
        &self.parameters
    }
}

/// Normalize a parameter into a positional list: arrays pass through, anything else is wrapped.
fn into_parameter_list(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// Build entries from `(weight, parameter-or-parameter-list)` pairs.
///
/// # Example
/// ```
/// use dicebag::make_entries;
/// use serde_json::json;
///
/// let entries = make_entries(vec![(json!(70), json!("A")), (json!(30), json!(["B", 2]))]).unwrap();
/// assert_eq!(entries[0].parameters(), &[json!("A")]);
/// assert_eq!(entries[1].parameters(), &[json!("B"), json!(2)]);
/// ```
pub fn make_entries<I, W, P>(pairs: I) -> Result<Vec<WeightEntry>>
where
    I: IntoIterator<Item = (W, P)>,
    W: Into<Value>,
    P: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(weight, params)| {
            WeightEntry::from_value(&weight.into(), into_parameter_list(params.into()))
        })
        .collect()
}

/// Build entries from a JSON array of `[weight, parameter]` pairs.
///
/// Anything that is not a two-element pair is rejected.
pub fn entries_from_json(value: &Value) -> Result<Vec<WeightEntry>> {
    let items = value.as_array().ok_or_else(|| {
        RandomError::invalid_argument(format!(
            "expected an array of weighted pairs, got '{}'",
            value
        ))
    })?;

    items
        .iter()
        .map(|item| match item.as_array().map(Vec::as_slice) {
            Some([weight, params]) => {
                WeightEntry::from_value(weight, into_parameter_list(params.clone()))
            }
            _ => Err(RandomError::invalid_argument(format!(
                "'{}' is not a weighted pair",
                item
            ))),
        })
        .collect()
}

/// Pick one entry with probability proportional to its weight.
///
/// Entries own contiguous sub-ranges of `[1, total]` in sequence order, and the
/// entry whose sub-range contains the draw wins. When any weight is fractional
/// the draw is real-valued over `(0, total]` instead. Returns `Ok(None)` if the
/// walk never reaches the draw.
pub fn select<'a>(
    source: &dyn UniformSource,
    entries: &'a [WeightEntry],
) -> Result<Option<(usize, &'a WeightEntry)>> {
    if entries.is_empty() {
        return Err(RandomError::invalid_argument(
            "entry sequence must not be empty",
        ));
    }

    let total: f64 = entries.iter().map(|e| e.weight).sum();
    if !total.is_finite() {
        return Err(RandomError::invalid_argument("sum of weights overflows"));
    }

    let integral = entries.iter().all(|e| e.weight.fract() == 0.0);
    let index = if integral && total <= MAX_EXACT_TOTAL {
        let total = total as i64;
        let pick = source.int_in_range(1, total);
        let mut cumulative = 0i64;
        let index = entries.iter().position(|e| {
            cumulative += e.weight as i64;
            cumulative >= pick
        });
        debug!(total, pick, ?index, "weighted integer draw");
        index
    } else {
        let pick = total - source.real_in_range(0.0, total);
        let mut cumulative = 0.0;
        let index = entries.iter().position(|e| {
            cumulative += e.weight;
            cumulative >= pick
        });
        debug!(total, pick, ?index, "weighted real draw");
        index
    };

    Ok(index.map(|i| (i, &entries[i])))
}
