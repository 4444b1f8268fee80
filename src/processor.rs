use crate::{errors::PeopleError, models::Attribute, traits::Attributes};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Sum,
    Average,
    Min,
    Max,
}

impl Operator {
    pub fn label(&self) -> &'static str {
        match self {
            Operator::Sum => "sum",
            Operator::Average => "average",
            Operator::Min => "minimum",
            Operator::Max => "maximum",
        }
    }

    /// Folds the values into a single number.
    pub fn apply(&self, values: &[i64]) -> Result<f64, PeopleError> {
        match self {
            Operator::Sum => sum(values),
            Operator::Average => Ok(sum(values)? / values.len() as f64),
            Operator::Min => {
                reduce(values, |acc, x| Ok(if x < acc { x } else { acc })).map(|v| v as f64)
            }
            Operator::Max => {
                reduce(values, |acc, x| Ok(if x > acc { x } else { acc })).map(|v| v as f64)
            }
        }
    }
}

/// Left fold seeded with the first value.
pub fn reduce<T, F>(values: &[T], func: F) -> Result<T, PeopleError>
where
    T: Copy,
    F: Fn(T, T) -> Result<T, PeopleError>,
{
    let (first, rest) = values.split_first().ok_or(PeopleError::EmptyGroup)?;
    rest.iter().try_fold(*first, |acc, &x| func(acc, x))
}

fn sum(values: &[i64]) -> Result<f64, PeopleError> {
    reduce(values, |acc, x| {
        acc.checked_add(x).ok_or(PeopleError::ValueOverflow)
    })
    .map(|v| v as f64)
}

/// Collects one attribute from every record and folds it with `operator`.
pub fn evaluate<R: Attributes>(
    records: &[R],
    attribute: Attribute,
    operator: Operator,
) -> Result<f64, PeopleError> {
    let values: Vec<i64> = records
        .iter()
        .map(|record| record.attribute(attribute))
        .collect();
    operator.apply(&values)
}

/// Formats a float the way it reads back unchanged, keeping `.0` on whole
/// numbers and switching to exponent form below `1e-4` and from `1e16` on.
pub struct Shortest(pub f64);

impl fmt::Display for Shortest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value.is_nan() {
            return f.write_str("nan");
        }
        if value.is_infinite() {
            return f.write_str(if value < 0.0 { "-inf" } else { "inf" });
        }
        if value == 0.0 {
            return f.write_str(if value.is_sign_negative() { "-0.0" } else { "0.0" });
        }

        let scientific = format!("{value:e}");
        let (mantissa, exponent) = scientific
            .split_once('e')
            .unwrap_or((scientific.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        if !(-4..16).contains(&exponent) {
            let sign = if exponent < 0 { '-' } else { '+' };
            write!(f, "{mantissa}e{sign}{:02}", exponent.abs())
        } else if value.fract() == 0.0 {
            write!(f, "{value:.1}")
        } else {
            write!(f, "{value}")
        }
    }
}
