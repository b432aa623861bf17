//! Error types for appearance validation and processing.

use thiserror::Error;

/// Error codes reported by strict validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Appearance errors (E101-E107)
    /// E101: Colour is not `#rgb` or `#rrggbb`
    InvalidColor,
    /// E102: Unknown light style
    UnknownLightStyle,
    /// E103: Unknown accessory
    UnknownAccessory,
    /// E104: Unknown decal kind
    UnknownDecalKind,
    /// E105: Scale is not a positive finite number
    InvalidScale,
    /// E106: Size multiplier is negative or not finite
    InvalidMultiplier,
    /// E107: Intensity outside [0, 1]
    IntensityOutOfRange,

    // Sheet errors (E110-E111)
    /// E110: Sheet has no frames
    NoFrames,
    /// E111: Supersampling factor is zero
    InvalidSupersampling,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E101").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidColor => "E101",
            ErrorCode::UnknownLightStyle => "E102",
            ErrorCode::UnknownAccessory => "E103",
            ErrorCode::UnknownDecalKind => "E104",
            ErrorCode::InvalidScale => "E105",
            ErrorCode::InvalidMultiplier => "E106",
            ErrorCode::IntensityOutOfRange => "E107",
            ErrorCode::NoFrames => "E110",
            ErrorCode::InvalidSupersampling => "E111",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes reported by strict validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W101: `dirs` is neither 1 nor 4
    UnsupportedDirs,
    /// W102: Decal text is empty and the default is drawn
    EmptyDecalText,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W101").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::UnsupportedDirs => "W101",
            WarningCode::EmptyDecalText => "W102",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub code: ErrorCode,
    pub message: String,
    /// JSON path to the offending field (e.g. `anatomy.width_mul`).
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {} (at {})", self.code, self.message, path),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub code: WarningCode,
    pub message: String,
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a JSON path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {} (at {})", self.code, self.message, path),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

/// Top-level error type for appearance documents.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Strict validation failed with one or more errors.
    #[error("appearance validation failed with {0} error(s)")]
    ValidationFailed(usize),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("canonicalization error: {0}")]
    Canonicalization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Collected errors and warnings from strict validation.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates an empty, passing result.
    pub fn success() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Appends everything from `other`.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns true if any error carries `code`.
    pub fn has_error(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Returns true if any warning carries `code`.
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.is_ok() {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::InvalidColor.code(), "E101");
        assert_eq!(ErrorCode::IntensityOutOfRange.code(), "E107");
        assert_eq!(ErrorCode::NoFrames.code(), "E110");
        assert_eq!(ErrorCode::InvalidSupersampling.code(), "E111");
    }

    #[test]
    fn test_warning_codes() {
        assert_eq!(WarningCode::UnsupportedDirs.code(), "W101");
        assert_eq!(WarningCode::EmptyDecalText.code(), "W102");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(ErrorCode::InvalidScale, "scale must be positive");
        assert_eq!(err.to_string(), "E105: scale must be positive");

        let err = ValidationError::with_path(
            ErrorCode::InvalidMultiplier,
            "must be non-negative",
            "anatomy.width_mul",
        );
        assert_eq!(
            err.to_string(),
            "E106: must be non-negative (at anatomy.width_mul)"
        );
    }

    #[test]
    fn test_validation_result() {
        let mut result = ValidationResult::success();
        assert!(result.is_ok());

        result.add_warning(ValidationWarning::new(WarningCode::UnsupportedDirs, "dirs=2"));
        assert!(result.is_ok());

        result.add_error(ValidationError::new(ErrorCode::NoFrames, "no frames"));
        assert!(!result.is_ok());
        assert!(result.has_error(ErrorCode::NoFrames));
        assert_eq!(result.into_result().unwrap_err().len(), 1);
    }
}
