use crate::domain::model::Scalar;
use rusqlite::types::Value;

/// Collapse the raw first-column value into an answer scalar.
///
/// No row and SQL `NULL` both mean "no activity" and become `0`.
pub fn normalize(raw: Option<Value>) -> Scalar {
    match raw {
        None | Some(Value::Null) => Scalar::Integer(0),
        Some(Value::Integer(v)) => Scalar::Integer(v),
        Some(Value::Real(v)) => normalize_float(v),
        Some(Value::Text(s)) => normalize_text(s),
        Some(Value::Blob(b)) => Scalar::Blob(b),
    }
}

pub fn normalize_float(v: f64) -> Scalar {
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
    if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        Scalar::Integer(v as i64)
    } else {
        Scalar::Float(v)
    }
}

fn normalize_text(s: String) -> Scalar {
    let candidate = s.trim();
    if let Ok(v) = candidate.parse::<i64>() {
        return Scalar::Integer(v);
    }
    // "inf" and "NaN" parse too and stay floats
    match candidate.parse::<f64>() {
        Ok(v) => Scalar::Float(v),
        Err(_) => Scalar::Text(s),
    }
}
