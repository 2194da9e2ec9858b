//! Existence guard for repository lookups.
//!
//! Repositories signal "no such resource" in more than one way: an empty
//! `Option`, a JSON `null`, a zero or an empty string from a loosely typed
//! upstream. [`require_found`] folds all of them into one
//! [`ApiError::NotFound`] so callers never see a different outcome per
//! representation.

use serde_json::Value;

use crate::error::ApiError;

/// A value that may represent an absent resource.
pub trait Presence {
    /// The value handed back when present.
    type Output;

    /// Returns the value if it counts as present.
    fn into_present(self) -> Option<Self::Output>;
}

impl<T> Presence for Option<T> {
    type Output = T;

    fn into_present(self) -> Option<T> {
        self
    }
}

impl Presence for bool {
    type Output = bool;

    fn into_present(self) -> Option<bool> {
        self.then_some(true)
    }
}

impl Presence for String {
    type Output = String;

    fn into_present(self) -> Option<String> {
        (!self.is_empty()).then_some(self)
    }
}

impl<'a> Presence for &'a str {
    type Output = &'a str;

    fn into_present(self) -> Option<&'a str> {
        (!self.is_empty()).then_some(self)
    }
}

impl Presence for f64 {
    type Output = f64;

    fn into_present(self) -> Option<f64> {
        (self != 0.0 && !self.is_nan()).then_some(self)
    }
}

macro_rules! integer_presence {
    ($($ty:ty),*) => {
        $(
            impl Presence for $ty {
                type Output = $ty;

                fn into_present(self) -> Option<$ty> {
                    (self != 0).then_some(self)
                }
            }
        )*
    };
}

integer_presence!(i32, i64, u32, u64, usize);

impl Presence for Value {
    type Output = Value;

    fn into_present(self) -> Option<Value> {
        let present = match &self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        };
        present.then_some(self)
    }
}

/// Returns the present value or a not-found error naming the resource.
pub fn require_found<P: Presence>(value: P, resource: &str, id: &str) -> Result<P::Output, ApiError> {
    value
        .into_present()
        .ok_or_else(|| ApiError::not_found(resource, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn expected() -> ApiError {
        ApiError::NotFound("Agent with ID agent-999 not found".into())
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!(false))]
    #[case(json!(0))]
    #[case(json!(0.0))]
    #[case(json!(""))]
    fn absent_json_values_are_not_found(#[case] value: Value) {
        assert_eq!(require_found(value, "Agent", "agent-999"), Err(expected()));
    }

    #[test]
    fn absent_native_values_are_not_found() {
        assert_eq!(require_found(None::<String>, "Agent", "agent-999"), Err(expected()));
        assert_eq!(require_found(false, "Agent", "agent-999"), Err(expected()));
        assert_eq!(require_found(0_i64, "Agent", "agent-999"), Err(expected()));
        assert_eq!(require_found(0.0_f64, "Agent", "agent-999"), Err(expected()));
        assert_eq!(require_found(f64::NAN, "Agent", "agent-999"), Err(expected()));
        assert_eq!(require_found(String::new(), "Agent", "agent-999"), Err(expected()));
        assert_eq!(require_found("", "Agent", "agent-999"), Err(expected()));
    }

    #[test]
    fn every_absent_variant_maps_to_404() {
        let statuses = [
            require_found(json!(null), "Agent", "x").unwrap_err().status_code(),
            require_found(false, "Agent", "x").unwrap_err().status_code(),
            require_found(0_u32, "Agent", "x").unwrap_err().status_code(),
            require_found(f64::NAN, "Agent", "x").unwrap_err().status_code(),
            require_found("", "Agent", "x").unwrap_err().status_code(),
            require_found(None::<i32>, "Agent", "x").unwrap_err().status_code(),
        ];
        assert!(statuses.iter().all(|s| *s == 404));
    }

    #[test]
    fn present_values_pass_through() {
        assert_eq!(require_found(Some(7), "Agent", "x"), Ok(7));
        assert_eq!(require_found(json!({"id": "a"}), "Agent", "x"), Ok(json!({"id": "a"})));
        assert_eq!(require_found(json!([]), "Agent", "x"), Ok(json!([])));
        assert_eq!(require_found("agent", "Agent", "x"), Ok("agent"));
        assert_eq!(require_found(-1_i32, "Agent", "x"), Ok(-1));
    }
}
