use crate::errors::AppError;

/// Rejects a missing or whitespace-only mandatory field; returns the trimmed
/// value otherwise.
pub fn require_text(field: &str, value: Option<&str>) -> Result<String, AppError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::Validation(format!("{field} is required"))),
    }
}

/// Checks an enumerated field against its allowed values.
pub fn require_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), AppError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{field} must be one of: {}",
            allowed.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_trims() {
        assert_eq!(require_text("title", Some("  Engineer  ")).unwrap(), "Engineer");
    }

    #[test]
    fn test_require_text_missing() {
        let err = require_text("title", None).unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_require_text_blank() {
        assert!(require_text("company", Some("   ")).is_err());
    }

    #[test]
    fn test_require_one_of_accepts_member() {
        assert!(require_one_of("plan", "pro", &["free", "pro", "premium"]).is_ok());
    }

    #[test]
    fn test_require_one_of_rejects_and_names_field() {
        let err = require_one_of("plan", "platinum", &["free", "pro", "premium"]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("plan"));
        assert!(msg.contains("free, pro, premium"));
    }

    #[test]
    fn test_require_one_of_is_case_sensitive() {
        assert!(require_one_of("status", "applied", &["Applied"]).is_err());
    }
}
