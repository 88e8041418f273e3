use crate::error::YcdbError;
use crate::filter::CompanySize;

/// Record count used when `n` is absent, non-numeric, or not positive.
pub const DEFAULT_COUNT: usize = 10;

pub const MAX_FILTER_LENGTH: usize = 100;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, YcdbError> {
    if input.len() > max_len {
        return Err(YcdbError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(YcdbError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Resolve a requested record count: anything below 1 falls back to
/// [`DEFAULT_COUNT`].
pub fn count_or_default(n: i64) -> usize {
    if n <= 0 {
        DEFAULT_COUNT
    } else {
        usize::try_from(n).unwrap_or(usize::MAX)
    }
}

/// Resolve the raw `n` request parameter. Never fails: an absent value,
/// a value with no leading integer, or a non-positive one yields
/// [`DEFAULT_COUNT`]. Trailing garbage after the leading integer is
/// ignored (`"5abc"` is 5).
pub fn validate_count(raw: Option<&str>) -> usize {
    raw.and_then(leading_integer)
        .map(count_or_default)
        .unwrap_or(DEFAULT_COUNT)
}

fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<i64>().ok().map(|v| sign * v)
}

/// Validate an optional free-text filter value (batch, industry, region, tag).
/// Blank values mean "unset" and return `None`.
pub fn validate_filter_text(input: Option<&str>) -> Result<Option<String>, YcdbError> {
    match input {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => sanitize_text(raw, MAX_FILTER_LENGTH).map(Some),
    }
}

/// Validate a company size range: `1-10`, `500+`, or a single number.
/// Blank values mean "unset".
pub fn validate_company_size(input: Option<&str>) -> Result<Option<CompanySize>, YcdbError> {
    match input {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw.parse().map(Some),
    }
}

/// Validate a boolean flag. Absent or blank is `false`.
pub fn validate_flag(name: &str, input: Option<&str>) -> Result<bool, YcdbError> {
    let Some(raw) = input else {
        return Ok(false);
    };
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        _ => Err(YcdbError::InvalidInput(format!(
            "invalid value '{}' for {}. Valid values: true, false, 1, 0, yes, no, on, off",
            raw, name
        ))),
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
