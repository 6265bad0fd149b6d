use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{require_text, ValidationError};

/// Kinds of reference lists managed by staff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Color,
    Design,
    BatchFolder,
}

impl ReferenceKind {
    /// Table holding this list
    pub fn table_name(&self) -> &'static str {
        match self {
            ReferenceKind::Color => "colors",
            ReferenceKind::Design => "designs",
            ReferenceKind::BatchFolder => "batch_folders",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ReferenceKind::Color => "Color",
            ReferenceKind::Design => "Design",
            ReferenceKind::BatchFolder => "Batch folder",
        }
    }

    pub fn all() -> Vec<ReferenceKind> {
        vec![
            ReferenceKind::Color,
            ReferenceKind::Design,
            ReferenceKind::BatchFolder,
        ]
    }
}

/// One row of a reference list (color, design or batch folder)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceItem {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// DTO for creating or renaming a reference item
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReferenceItemDto {
    pub name: String,
}

impl ReferenceItemDto {
    /// Validate the name against the already loaded list.
    ///
    /// Names compare trimmed and case-insensitively; `exclude_id` skips the
    /// row being renamed. Returns the trimmed name.
    pub fn validate_against(
        &self,
        kind: ReferenceKind,
        existing: &[ReferenceItem],
        exclude_id: Option<i64>,
    ) -> Result<String, ValidationError> {
        let name = require_text(&self.name, "Name")?;
        let lowered = name.to_lowercase();
        let duplicate = existing
            .iter()
            .filter(|item| Some(item.id) != exclude_id)
            .any(|item| item.name.trim().to_lowercase() == lowered);
        if duplicate {
            return Err(ValidationError::Duplicate {
                kind: kind.display_name().to_string(),
                name,
            });
        }
        Ok(name)
    }
}

/// Dropdown data for the public order page
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PublicOptions {
    pub colors: Vec<String>,
    pub designs: Vec<String>,
    pub sizes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, name: &str) -> ReferenceItem {
        ReferenceItem {
            id,
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_duplicate_names_are_rejected_case_insensitively() {
        let existing = vec![item(1, "Black"), item(2, "Heather Gray")];
        let dto = ReferenceItemDto {
            name: " black ".into(),
        };
        assert!(matches!(
            dto.validate_against(ReferenceKind::Color, &existing, None),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_rename_to_own_name_is_allowed() {
        let existing = vec![item(1, "Black"), item(2, "White")];
        let dto = ReferenceItemDto {
            name: "BLACK".into(),
        };
        assert_eq!(
            dto.validate_against(ReferenceKind::Color, &existing, Some(1)),
            Ok("BLACK".to_string())
        );
        assert!(dto
            .validate_against(ReferenceKind::Color, &existing, Some(2))
            .is_err());
    }

    #[test]
    fn test_blank_name_is_required() {
        let dto = ReferenceItemDto { name: "  ".into() };
        assert_eq!(
            dto.validate_against(ReferenceKind::Design, &[], None),
            Err(ValidationError::Required("Name".into()))
        );
    }

    #[test]
    fn test_table_names() {
        assert_eq!(ReferenceKind::Color.table_name(), "colors");
        assert_eq!(ReferenceKind::Design.table_name(), "designs");
        assert_eq!(ReferenceKind::BatchFolder.table_name(), "batch_folders");
    }
}
