//! Error types for statmap
//!
//! This module provides structured error handling using thiserror,
//! replacing ad-hoc String-based errors with proper typed errors.

use thiserror::Error;

/// Main error type for statmap operations
#[derive(Error, Debug)]
pub enum StatmapError {
    /// File I/O error
    #[error("Failed to access file: {0}")]
    FileIo(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Selection references a category/type pair absent from the definitions
    #[error("Unknown category '{category}' ({category_type})")]
    UnknownCategory {
        category: String,
        category_type: String,
    },

    /// No visible unit produced a valid value for the active field
    #[error("No valid values for field '{field}' in {year}")]
    EmptyRange { field: String, year: u16 },

    /// External resource fetch failed; the recompute pass is abandoned
    #[error("Failed to load '{path}': {reason}")]
    DataLoad { path: String, reason: String },

    /// Loaded definitions failed validation
    #[error("Data validation failed: {0}")]
    Validation(String),
}

/// Result type alias for statmap operations
pub type Result<T> = std::result::Result<T, StatmapError>;

/// UI-friendly error message formatting
impl StatmapError {
    /// Get a user-friendly error message suitable for displaying in UI
    pub fn user_message(&self) -> String {
        match self {
            StatmapError::FileIo(e) => format!("File error: {}", e),
            StatmapError::Json(e) => format!("JSON error: {}", e),
            StatmapError::UnknownCategory {
                category,
                category_type,
            } => {
                format!("Category '{}' has no '{}' variant", category, category_type)
            }
            StatmapError::EmptyRange { field, year } => {
                format!("No data for '{}' in {}", field, year)
            }
            StatmapError::DataLoad { path, reason } => {
                format!("Could not load '{}': {}", path, reason)
            }
            StatmapError::Validation(msg) => format!("Validation error: {}", msg),
        }
    }

    /// Get a short title for the error (for toast notifications)
    pub fn title(&self) -> &'static str {
        match self {
            StatmapError::FileIo(_) => "File Error",
            StatmapError::Json(_) => "JSON Error",
            StatmapError::UnknownCategory { .. } => "Unknown Category",
            StatmapError::EmptyRange { .. } => "No Data",
            StatmapError::DataLoad { .. } => "Load Failure",
            StatmapError::Validation(_) => "Validation Error",
        }
    }

    /// Whether the previous derived snapshot must be kept as-is.
    ///
    /// `EmptyRange` degrades to an empty legend instead; everything else
    /// aborts the recompute pass.
    pub fn is_fatal_to_pass(&self) -> bool {
        !matches!(self, StatmapError::EmptyRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StatmapError::UnknownCategory {
            category: "Weather".to_string(),
            category_type: "Census".to_string(),
        };
        assert_eq!(err.user_message(), "Category 'Weather' has no 'Census' variant");
        assert_eq!(err.title(), "Unknown Category");

        let err = StatmapError::EmptyRange {
            field: "median_income".to_string(),
            year: 2016,
        };
        assert_eq!(err.user_message(), "No data for 'median_income' in 2016");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: StatmapError = io_err.into();
        assert!(matches!(err, StatmapError::FileIo(_)));
    }

    #[test]
    fn test_fatality() {
        let empty = StatmapError::EmptyRange {
            field: "age_65".to_string(),
            year: 2015,
        };
        assert!(!empty.is_fatal_to_pass());

        let load = StatmapError::DataLoad {
            path: "dataset.json".to_string(),
            reason: "404".to_string(),
        };
        assert!(load.is_fatal_to_pass());
    }
}
