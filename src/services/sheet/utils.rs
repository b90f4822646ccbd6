use bytes::Bytes;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;

use crate::error::AppError;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d-%m-%Y",
];

/// Lowercase the display name, map spaces and hyphens to underscores and
/// strip everything else that is not alphanumeric or underscore.
/// Total over any input and idempotent.
pub fn clean_field_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

pub fn is_date_string(s: &str) -> bool {
    let s = s.trim();
    DATETIME_FORMATS
        .iter()
        .any(|format| NaiveDateTime::parse_from_str(s, format).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|format| NaiveDate::parse_from_str(s, format).is_ok())
}

pub async fn load_file_from_url(url: &str, max_size: usize) -> Result<Bytes, AppError> {
    let client = Client::new();
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::Http(format!("Failed to fetch file: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::Http(format!(
            "Failed to fetch file. Status: {}",
            response.status()
        )));
    }

    let data = response
        .bytes()
        .await
        .map_err(|e| AppError::Http(format!("Failed to read response bytes: {}", e)))?;

    if data.len() > max_size {
        return Err(AppError::InvalidInput(format!(
            "File size {} exceeds limit of {} bytes",
            data.len(),
            max_size
        )));
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_display_name_to_machine_name() {
        assert_eq!(clean_field_name("Employee ID#"), "employee_id");
        assert_eq!(clean_field_name("First-Name"), "first_name");
        assert_eq!(clean_field_name("e-mail (work)"), "e_mail_work");
    }

    #[test]
    fn cleaning_is_idempotent() {
        for name in ["Employee ID#", "Date of Birth", "a--b  c", "###", ""] {
            let once = clean_field_name(name);
            assert_eq!(clean_field_name(&once), once);
        }
    }

    #[test]
    fn cleaning_never_fails_on_odd_input() {
        assert_eq!(clean_field_name("!!!"), "");
        assert_eq!(clean_field_name("   "), "___");
    }

    #[test]
    fn recognizes_common_date_formats() {
        assert!(is_date_string("2024-01-15"));
        assert!(is_date_string("15/03/1985"));
        assert!(is_date_string("2024-01-15 10:30:00"));
        assert!(is_date_string("2024/01/15"));
    }

    #[test]
    fn rejects_non_dates() {
        assert!(!is_date_string("hello"));
        assert!(!is_date_string("42"));
        assert!(!is_date_string("a@b.com"));
        assert!(!is_date_string(""));
    }
}
