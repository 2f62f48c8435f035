use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::record::{is_degree_type, StudentFields};

/// Field name -> human-readable message, one message per violated field.
pub type FieldErrors = BTreeMap<String, String>;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").expect("email pattern")
    })
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{10}$").expect("phone pattern"))
}

/// Check a candidate record against every field rule and either hand back a
/// normalized `StudentFields` or the full set of violations. Never
/// short-circuits: a submission with three bad fields reports all three.
///
/// Numeric fields tolerate JSON strings ("85" and 85 both pass) since form
/// inputs arrive as text. Unknown keys in `params` are ignored, so callers
/// may pass a whole record (id included) unchanged.
pub fn validate(params: &Value) -> Result<StudentFields, FieldErrors> {
    let mut errors = FieldErrors::new();

    let first_name = min_len_field(
        params,
        "firstName",
        2,
        "First name must be at least 2 characters",
        &mut errors,
    );
    let last_name = min_len_field(
        params,
        "lastName",
        2,
        "Last name must be at least 2 characters",
        &mut errors,
    );
    let city = min_len_field(
        params,
        "city",
        2,
        "City must be at least 2 characters",
        &mut errors,
    );

    let email = match str_value(params, "email") {
        Some(s) if email_re().is_match(s) => Some(s.to_string()),
        _ => {
            errors.insert(
                "email".into(),
                "Please enter a valid email address".into(),
            );
            None
        }
    };

    let phone = match str_value(params, "phone") {
        Some(s) if phone_re().is_match(s) => Some(s.to_string()),
        _ => {
            errors.insert(
                "phone".into(),
                "Phone number must be exactly 10 digits".into(),
            );
            None
        }
    };

    let bio = match str_value(params, "bio") {
        Some(s) => {
            let n = s.chars().count();
            if n < 10 {
                errors.insert("bio".into(), "Bio must be at least 10 characters".into());
                None
            } else if n > 500 {
                errors.insert("bio".into(), "Bio must not exceed 500 characters".into());
                None
            } else {
                Some(s.to_string())
            }
        }
        None => {
            errors.insert("bio".into(), "Bio must be at least 10 characters".into());
            None
        }
    };

    let tenth_marks = marks_field(params, "tenthMarks", &mut errors);
    let twelfth_marks = marks_field(params, "twelfthMarks", &mut errors);

    let degree_type = match str_value(params, "degreeType") {
        None | Some("") => {
            errors.insert("degreeType".into(), "Please select a degree type".into());
            None
        }
        Some(s) if is_degree_type(s) => Some(s.to_string()),
        Some(_) => {
            errors.insert(
                "degreeType".into(),
                "Invalid selection: unknown degree type".into(),
            );
            None
        }
    };

    let years_of_study = match int_value(params, "yearsOfStudy") {
        None => {
            errors.insert(
                "yearsOfStudy".into(),
                "Years of study must be a whole number".into(),
            );
            None
        }
        Some(n) if n < 1 => {
            errors.insert(
                "yearsOfStudy".into(),
                "Years of study must be at least 1".into(),
            );
            None
        }
        Some(n) if n > 10 => {
            errors.insert(
                "yearsOfStudy".into(),
                "Years of study cannot exceed 10".into(),
            );
            None
        }
        Some(n) => Some(n),
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    // All ten Options are Some here: a None always inserts an error above.
    Ok(StudentFields {
        first_name: first_name.unwrap_or_default(),
        last_name: last_name.unwrap_or_default(),
        city: city.unwrap_or_default(),
        email: email.unwrap_or_default(),
        phone: phone.unwrap_or_default(),
        bio: bio.unwrap_or_default(),
        tenth_marks: tenth_marks.unwrap_or_default(),
        twelfth_marks: twelfth_marks.unwrap_or_default(),
        degree_type: degree_type.unwrap_or_default(),
        years_of_study: years_of_study.unwrap_or_default(),
    })
}

fn str_value<'a>(params: &'a Value, key: &str) -> Option<&'a str> {
    params.get(key).and_then(|v| v.as_str())
}

fn min_len_field(
    params: &Value,
    key: &str,
    min: usize,
    message: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match str_value(params, key) {
        Some(s) if s.chars().count() >= min => Some(s.to_string()),
        _ => {
            errors.insert(key.to_string(), message.to_string());
            None
        }
    }
}

/// Marks arrive as a JSON number or a numeric string; valid range is 0..=100.
/// The string path can produce NaN/infinity ("NaN" parses), which would sail
/// past both range guards, so only finite values count as parsed.
fn marks_field(params: &Value, key: &str, errors: &mut FieldErrors) -> Option<f64> {
    let parsed = match params.get(key) {
        Some(Value::Number(n)) => n.as_f64().filter(|f| f.is_finite()),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    };
    match parsed {
        None => {
            errors.insert(key.to_string(), "Marks must be a number".into());
            None
        }
        Some(n) if n < 0.0 => {
            errors.insert(key.to_string(), "Marks cannot be negative".into());
            None
        }
        Some(n) if n > 100.0 => {
            errors.insert(key.to_string(), "Marks cannot exceed 100".into());
            None
        }
        Some(n) => Some(n),
    }
}

fn int_value(params: &Value, key: &str) -> Option<i64> {
    match params.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
