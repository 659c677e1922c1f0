use crate::utils::error::{Result, SyncLearnError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_database_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SyncLearnError::MissingConfig {
            field: field_name.to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "postgres" | "postgresql" => Ok(()),
            scheme => Err(SyncLearnError::InvalidConfigValue {
                field: field_name.to_string(),
                value: crate::utils::logger::mask_database_url(url_str),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SyncLearnError::InvalidConfigValue {
            field: field_name.to_string(),
            value: "<hidden>".to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(SyncLearnError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(SyncLearnError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Allowed values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// Whitespace as the JVM's `Character.isWhitespace` sees it: no-break spaces
/// (U+00A0, U+2007, U+202F) are content, and the U+001C..U+001F separators are blank.
fn is_blank_char(c: char) -> bool {
    match c {
        '\u{a0}' | '\u{2007}' | '\u{202f}' => false,
        '\u{1c}'..='\u{1f}' => true,
        c => c.is_whitespace(),
    }
}

/// True for empty and whitespace-only values.
pub fn is_blank(value: &str) -> bool {
    value.chars().all(is_blank_char)
}

/// Rejects empty and whitespace-only values.
pub fn validate_non_blank(field_name: &str, value: &str, message: &str) -> Result<()> {
    if is_blank(value) {
        return Err(SyncLearnError::validation(field_name, message));
    }
    Ok(())
}

pub fn validate_max_chars(field_name: &str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max {
        return Err(SyncLearnError::validation(
            field_name,
            format!("{} must be at most {} characters (got {})", field_name, max, len),
        ));
    }
    Ok(())
}
