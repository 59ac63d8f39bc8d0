use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Value object representing a production serial number
///
/// Rules:
/// - Must be non-empty after trimming
/// - Max length 60 characters
/// - No control characters
///
/// A serial is NOT unique across checklist rows: every submission for the
/// same unit writes a fresh batch of rows carrying the same serial.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SerialNumber(String);

impl SerialNumber {
    /// Create a new SerialNumber with validation
    pub fn new(serial: impl Into<String>) -> Result<Self> {
        let serial = serial.into().trim().to_string();

        if serial.is_empty() {
            return Err(DomainError::InvalidSerialNumber(
                "Serial number cannot be empty".to_string(),
            ));
        }

        if serial.len() > 60 {
            return Err(DomainError::InvalidSerialNumber(format!(
                "Serial number too long: {} chars (max 60)",
                serial.len()
            )));
        }

        if serial.chars().any(|c| c.is_control()) {
            return Err(DomainError::InvalidSerialNumber(format!(
                "Serial number {serial:?} contains control characters"
            )));
        }

        Ok(Self(serial))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_serial() {
        let serial = SerialNumber::new("VG-2024-00123").unwrap();
        assert_eq!(serial.as_str(), "VG-2024-00123");
    }

    #[test]
    fn test_serial_is_trimmed() {
        let serial = SerialNumber::new("  123456  ").unwrap();
        assert_eq!(serial.as_str(), "123456");
    }

    #[test]
    fn test_empty_serial() {
        let result = SerialNumber::new("   ");
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err(),
            DomainError::InvalidSerialNumber("Serial number cannot be empty".to_string())
        );
    }

    #[test]
    fn test_serial_too_long() {
        let result = SerialNumber::new("9".repeat(61));
        assert!(result.is_err());
    }

    #[test]
    fn test_serial_with_control_characters() {
        assert!(SerialNumber::new("ABC\x07123").is_err());
    }

    #[test]
    fn test_serial_display() {
        let serial = SerialNumber::new("EIXO-77").unwrap();
        assert_eq!(format!("{}", serial), "EIXO-77");
    }
}
