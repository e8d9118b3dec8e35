//! Value types for emustore
//!
//! This module defines:
//! - Value: Tagged union of everything a store can hold
//! - Number: Orderable view of the numeric variants
//!
//! ### Type Rules
//!
//! - No implicit type coercions: `Int(1) != Float(1.0)`
//! - Float uses IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`
//! - `Null` is indistinguishable from an absent key at the store surface
//! - Ordering across `Int` and `Float` is exact (see [`Number`])

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Value stored under a key
///
/// `Int` and `Float` are the two numeric forms. `Array` and `Object` are the
/// two shapes a nested table can take.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Null value (same as absent)
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Array-shaped table
    Array(Vec<Value>),
    /// Map-shaped table with string keys
    Object(HashMap<String, Value>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (String(a), String(b)) => a == b,
            (Array(a), Array(b)) => a == b,
            (Object(a), Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    /// Variant name, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }

    /// Whether this is `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this is `Int` or `Float`
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Whether this is `Array` or `Object`
    pub fn is_table(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    /// Orderable numeric view
    ///
    /// `None` for non-numeric variants and for NaN, which has no place in
    /// an ordering.
    pub fn as_number(&self) -> Option<Number> {
        match *self {
            Value::Int(i) => Some(Number::Int(i)),
            Value::Float(f) if !f.is_nan() => Some(Number::Float(f)),
            _ => None,
        }
    }

    /// `Some` if this is `Bool`
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// `Some` if this is `Int`
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// `Some` if this is `Float`
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// `Some` if this is `String`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// `Some` if this is `Array`
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// `Some` if this is `Object`
    pub fn as_object(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }
}

// ============================================================================
// Number
// ============================================================================

/// A non-NaN numeric value with exact ordering
///
/// Two `Int`s compare as `i64`. An `Int` and a `Float` compare by their exact
/// mathematical values, so integers beyond 2^53 never collapse onto the same
/// `f64`.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// Integer value
    Int(i64),
    /// Float value, never NaN
    Float(f64),
}

impl Number {
    /// Compare against a plain `f64` bound (NaN bounds compare equal)
    pub fn cmp_f64(&self, bound: f64) -> Ordering {
        match *self {
            Number::Int(i) => cmp_int_float(i, bound),
            Number::Float(f) => f.partial_cmp(&bound).unwrap_or(Ordering::Equal),
        }
    }

    /// Lossy `f64` view, for display and metrics only
    pub fn to_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

/// Exact comparison of an `i64` with an `f64`
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    // 2^63 is exactly representable; i64 covers [-2^63, 2^63)
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() {
        return Ordering::Equal;
    }
    if f >= TWO_POW_63 {
        return Ordering::Less;
    }
    if f < -TWO_POW_63 {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    // In range, so the cast is exact
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0f64.partial_cmp(&(f - whole)).unwrap_or(Ordering::Equal),
        other => other,
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => a.cmp(&b),
            (Number::Int(a), Number::Float(b)) => cmp_int_float(a, b),
            (Number::Float(a), Number::Int(b)) => cmp_int_float(b, a).reverse(),
            (Number::Float(a), Number::Float(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Value::Array(a)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(o: HashMap<String, Value>) -> Self {
        Value::Object(o)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_POW_53: i64 = 1 << 53;

    #[test]
    fn test_numeric_view() {
        assert_eq!(Value::Int(42).as_number(), Some(Number::Int(42)));
        assert_eq!(Value::Float(2.5).as_number(), Some(Number::Float(2.5)));
        assert_eq!(Value::Null.as_number(), None);
        assert_eq!(Value::from("5").as_number(), None);
        assert_eq!(Value::Bool(true).as_number(), None);
        assert_eq!(Value::Array(vec![Value::Int(1)]).as_number(), None);
    }

    #[test]
    fn test_nan_is_not_orderable() {
        let value = Value::Float(f64::NAN);
        assert!(value.is_number());
        assert_eq!(value.as_number(), None);
    }

    #[test]
    fn test_large_ints_order_exactly() {
        let a = Number::Int(TWO_POW_53 + 1);
        let b = Number::Int(TWO_POW_53);
        assert!(b < a);
        // Both collapse onto the same f64
        assert_eq!(a.to_f64(), b.to_f64());
    }

    #[test]
    fn test_int_float_cross_order() {
        assert!(Number::Int(2) < Number::Float(2.5));
        assert!(Number::Float(2.5) < Number::Int(3));
        assert_eq!(Number::Int(2), Number::Float(2.0));
        assert!(Number::Int(-3) < Number::Float(-2.5));
        assert!(Number::Int(-2) > Number::Float(-2.5));
        assert!(Number::Int(TWO_POW_53 + 1) > Number::Float(TWO_POW_53 as f64));
        assert!(Number::Int(i64::MAX) < Number::Float(f64::INFINITY));
        assert!(Number::Int(i64::MIN) > Number::Float(f64::NEG_INFINITY));
        assert!(Number::Int(i64::MAX) < Number::Float(9_223_372_036_854_775_808.0));
        assert_eq!(Number::Int(i64::MIN), Number::Float(-9_223_372_036_854_775_808.0));
    }

    #[test]
    fn test_cmp_against_bound() {
        let n = Number::Int(TWO_POW_53 + 1);
        assert_eq!(n.cmp_f64(TWO_POW_53 as f64), Ordering::Greater);
        assert_eq!(Number::Int(3).cmp_f64(3.0), Ordering::Equal);
        assert_eq!(Number::Float(-0.0).cmp_f64(0.0), Ordering::Equal);
    }

    #[test]
    fn test_cross_type_values_are_not_equal() {
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Null, Value::Bool(false));
    }

    #[test]
    fn test_float_equality_is_ieee() {
        assert_ne!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_eq!(Value::Float(-0.0), Value::Float(0.0));
    }

    #[test]
    fn test_object_equality_ignores_insertion_order() {
        let forward: HashMap<_, _> = [("a", 1i64), ("b", 2)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::Int(v)))
            .collect();
        let backward: HashMap<_, _> = [("b", 2i64), ("a", 1)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::Int(v)))
            .collect();
        assert_eq!(Value::Object(forward), Value::Object(backward));
    }

    #[test]
    fn test_tables() {
        let array = Value::from(vec![Value::Int(1), Value::from("two")]);
        assert!(array.is_table());
        assert_eq!(array.as_array().map(<[Value]>::len), Some(2));
        assert!(Value::Object(HashMap::new()).is_table());
        assert!(!Value::from("x").is_table());
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Value::Null.type_name(), "Null");
        assert_eq!(Value::Int(1).type_name(), "Int");
        assert_eq!(Value::Float(1.0).type_name(), "Float");
        assert_eq!(Value::Object(HashMap::new()).type_name(), "Object");
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(42i32), Value::Int(42));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(()), Value::Null);
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(7i64)), Value::Int(7));
    }

    #[test]
    fn test_value_serialization() {
        let original = Value::Array(vec![Value::Int(1), Value::from("a"), Value::Null]);
        let serialized = serde_json::to_string(&original).unwrap();
        let restored: Value = serde_json::from_str(&serialized).unwrap();
        assert_eq!(original, restored);
    }
}
