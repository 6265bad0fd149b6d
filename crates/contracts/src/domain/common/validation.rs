use thiserror::Error;

/// Precondition failures detected before anything is written
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(String),

    #[error("{0}")]
    Invalid(String),

    #[error("{kind} \"{name}\" already exists")]
    Duplicate { kind: String, name: String },
}

/// Trimmed value of a required text field
pub fn require_text(value: &str, field: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("  Black ", "Color"), Ok("Black".to_string()));
        assert_eq!(
            require_text("   ", "Color"),
            Err(ValidationError::Required("Color".into()))
        );
        assert_eq!(
            ValidationError::Duplicate {
                kind: "Design".into(),
                name: "Logo".into()
            }
            .to_string(),
            "Design \"Logo\" already exists"
        );
    }
}
