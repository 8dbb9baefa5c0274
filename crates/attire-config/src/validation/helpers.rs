//! Shared range-validation helpers used by all section validators.

/// Push an error if `value` is outside `[min, max]` (integer).
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u64, min: u64, max: u64) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if `value` is outside `[min, max]` or not finite (float).
pub(crate) fn validate_range_f64(
    errors: &mut Vec<String>,
    name: &str,
    value: f64,
    min: f64,
    max: f64,
) {
    if !value.is_finite() || value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if `values` is empty or contains blank or repeated entries.
pub(crate) fn validate_options(errors: &mut Vec<String>, name: &str, values: &[String]) {
    if values.is_empty() {
        errors.push(format!("{name} must not be empty"));
        return;
    }
    for (i, value) in values.iter().enumerate() {
        if value.trim().is_empty() {
            errors.push(format!("{name}[{i}] is blank"));
        } else if values[..i].contains(value) {
            errors.push(format!("{name} lists \"{value}\" more than once"));
        }
    }
}
