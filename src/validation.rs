//! Payload validation for student writes.
//!
//! Runs before any statement is issued, so a rejected payload never costs a
//! database round-trip.

use crate::db::NewStudent;
use crate::models::StudentPayload;
use serde_json::Value;
use thiserror::Error;

/// Which write the payload is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// `POST /students`: age must coerce to a positive integer.
    Create,
    /// `PUT /students/{id}`: required fields only; any exact integer age is
    /// accepted, nothing is truncated.
    Update,
}

/// Reasons a payload is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `name`, `age` or `email` is missing or empty.
    #[error("name, age and email are required")]
    MissingRequired,
    /// Create-time age is not a positive integer.
    #[error("age must be a positive integer")]
    InvalidAge,
    /// Update-time age is not an exact integer.
    #[error("age must be an integer")]
    AgeNotInteger,
}

/// Checks a create or update payload and produces the column values to write.
///
/// `phone` and `address` are optional; absent or empty values become `None`.
/// Email and phone are not format-checked.
///
/// # Errors
/// Returns [`ValidationError`] describing the first rule the payload breaks.
pub fn validate_for_write(
    payload: &StudentPayload,
    mode: WriteMode,
) -> Result<NewStudent, ValidationError> {
    let name = non_empty(payload.name.as_deref()).ok_or(ValidationError::MissingRequired)?;
    let email = non_empty(payload.email.as_deref()).ok_or(ValidationError::MissingRequired)?;
    let raw_age = match &payload.age {
        None | Some(Value::Null) => return Err(ValidationError::MissingRequired),
        Some(value) => value,
    };

    let age = match mode {
        WriteMode::Create => coerce_age(raw_age)
            .filter(|age| *age > 0)
            .and_then(|age| i32::try_from(age).ok())
            .ok_or(ValidationError::InvalidAge)?,
        WriteMode::Update => exact_integer(raw_age)
            .and_then(|age| i32::try_from(age).ok())
            .ok_or(ValidationError::AgeNotInteger)?,
    };

    Ok(NewStudent {
        name: name.to_string(),
        age,
        email: email.to_string(),
        phone: non_empty(payload.phone.as_deref()).map(str::to_string),
        address: non_empty(payload.address.as_deref()).map(str::to_string),
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Reads an integer from a JSON number or from the leading digits of a string.
///
/// Fractions are truncated, so `20.9` and `"20 years"` both read as `20`.
/// Returns `None` for booleans, arrays, objects and strings with no leading
/// integer.
pub fn coerce_age(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            let f = n.as_f64()?;
            if !f.is_finite() || f.abs() >= i64::MAX as f64 {
                return None;
            }
            Some(f.trunc() as i64)
        }
        Value::String(s) => parse_leading_int(s),
        _ => None,
    }
}

/// Reads an integer only when the value is one exactly: an integral JSON
/// number or a string holding nothing but an integer (surrounding whitespace
/// allowed). `20.9` and `"20abc"` are rejected.
fn exact_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            let f = n.as_f64()?;
            if f.fract() != 0.0 || !f.is_finite() || f.abs() >= i64::MAX as f64 {
                return None;
            }
            Some(f as i64)
        }
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> StudentPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_create_payload() {
        let student = validate_for_write(
            &payload(json!({"name": "张三", "age": 20, "email": "a@b.com"})),
            WriteMode::Create,
        )
        .unwrap();

        assert_eq!(student.name, "张三");
        assert_eq!(student.age, 20);
        assert_eq!(student.email, "a@b.com");
        assert!(student.phone.is_none());
        assert!(student.address.is_none());
    }

    #[test]
    fn test_missing_required_fields() {
        let cases = [
            json!({"age": 20, "email": "a@b.com"}),
            json!({"name": "", "age": 20, "email": "a@b.com"}),
            json!({"name": "张三", "email": "a@b.com"}),
            json!({"name": "张三", "age": null, "email": "a@b.com"}),
            json!({"name": "张三", "age": 20}),
            json!({"name": "张三", "age": 20, "email": ""}),
        ];

        for case in cases {
            for mode in [WriteMode::Create, WriteMode::Update] {
                assert_eq!(
                    validate_for_write(&payload(case.clone()), mode),
                    Err(ValidationError::MissingRequired),
                    "payload {case} in {mode:?}"
                );
            }
        }
    }

    #[test]
    fn test_create_rejects_non_positive_age() {
        for age in [json!(0), json!(-3), json!("abc"), json!(true), json!("")] {
            let result = validate_for_write(
                &payload(json!({"name": "张三", "age": age, "email": "a@b.com"})),
                WriteMode::Create,
            );
            assert_eq!(result, Err(ValidationError::InvalidAge), "age {age}");
        }
    }

    #[test]
    fn test_create_coerces_age() {
        for (age, expected) in [
            (json!("21"), 21),
            (json!(" 22abc"), 22),
            (json!(23.9), 23),
            (json!("+24"), 24),
        ] {
            let student = validate_for_write(
                &payload(json!({"name": "张三", "age": age, "email": "a@b.com"})),
                WriteMode::Create,
            )
            .unwrap();
            assert_eq!(student.age, expected);
        }
    }

    #[test]
    fn test_create_rejects_age_beyond_column_range() {
        let result = validate_for_write(
            &payload(json!({"name": "张三", "age": 3_000_000_000_i64, "email": "a@b.com"})),
            WriteMode::Create,
        );
        assert_eq!(result, Err(ValidationError::InvalidAge));
    }

    #[test]
    fn test_update_skips_positivity_check() {
        let student = validate_for_write(
            &payload(json!({"name": "张三", "age": -1, "email": "a@b.com"})),
            WriteMode::Update,
        )
        .unwrap();
        assert_eq!(student.age, -1);

        let student = validate_for_write(
            &payload(json!({"name": "张三", "age": 0, "email": "a@b.com"})),
            WriteMode::Update,
        )
        .unwrap();
        assert_eq!(student.age, 0);
    }

    #[test]
    fn test_update_rejects_non_integer_age() {
        let result = validate_for_write(
            &payload(json!({"name": "张三", "age": "abc", "email": "a@b.com"})),
            WriteMode::Update,
        );
        assert_eq!(result, Err(ValidationError::AgeNotInteger));
    }

    #[test]
    fn test_update_rejects_truncatable_age() {
        for age in [json!("20abc"), json!(20.9), json!("20.5"), json!(true)] {
            let result = validate_for_write(
                &payload(json!({"name": "张三", "age": age, "email": "a@b.com"})),
                WriteMode::Update,
            );
            assert_eq!(result, Err(ValidationError::AgeNotInteger), "age {age}");
        }
    }

    #[test]
    fn test_update_accepts_exact_integer_age() {
        for (age, expected) in [
            (json!(21), 21),
            (json!("22"), 22),
            (json!(" 23 "), 23),
            (json!(24.0), 24),
            (json!("-5"), -5),
        ] {
            let student = validate_for_write(
                &payload(json!({"name": "张三", "age": age, "email": "a@b.com"})),
                WriteMode::Update,
            )
            .unwrap();
            assert_eq!(student.age, expected, "age {age}");
        }
    }

    #[test]
    fn test_empty_optional_fields_become_null() {
        let student = validate_for_write(
            &payload(json!({
                "name": "张三",
                "age": 20,
                "email": "a@b.com",
                "phone": "",
                "address": "北京市朝阳区1号"
            })),
            WriteMode::Create,
        )
        .unwrap();
        assert!(student.phone.is_none());
        assert_eq!(student.address.as_deref(), Some("北京市朝阳区1号"));
    }

    #[test]
    fn test_email_format_is_not_checked() {
        let student = validate_for_write(
            &payload(json!({"name": "张三", "age": 20, "email": "not-an-email"})),
            WriteMode::Create,
        )
        .unwrap();
        assert_eq!(student.email, "not-an-email");
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  -7x"), Some(-7));
        assert_eq!(parse_leading_int("x7"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int(""), None);
    }
}
