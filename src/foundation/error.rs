use std::fmt;

/// Convenience result type used across lockergrid.
pub type LockerResult<T> = Result<T, LockerError>;

/// One rejected request field and the reason it was rejected.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FieldViolation {
    /// Request field name as it appears on the wire (`camelCase`).
    pub field: String,
    /// Human-readable reason.
    pub message: String,
}

impl FieldViolation {
    /// Build a violation for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every violation found while normalizing one request, in encounter order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ConfigViolations(pub Vec<FieldViolation>);

impl ConfigViolations {
    /// Record a violation for `field`.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldViolation::new(field, message));
    }

    /// Whether no violation was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether a violation was recorded for `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    /// Iterate recorded violations.
    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.0.iter()
    }
}

impl fmt::Display for ConfigViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, v) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", v.field, v.message)?;
        }
        Ok(())
    }
}

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum LockerError {
    /// The request failed field-level validation. Lists every violated field.
    #[error("invalid config: {0}")]
    InvalidConfig(ConfigViolations),

    /// A template image or font could not be read or decoded.
    #[error("asset load failure: {0}")]
    AssetLoad(String),

    /// Glyph layout or rasterization for the frame label failed.
    #[error("text render failure: {0}")]
    TextRender(String),

    /// The final buffer could not be serialized to the output format.
    #[error("encoding failure: {0}")]
    Encoding(String),

    /// Engine settings are inconsistent or could not be loaded.
    #[error("settings error: {0}")]
    Settings(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LockerError {
    /// Build a [`LockerError::AssetLoad`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`LockerError::TextRender`] value.
    pub fn text_render(msg: impl Into<String>) -> Self {
        Self::TextRender(msg.into())
    }

    /// Build a [`LockerError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Build a [`LockerError::Settings`] value.
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }

    /// Field-level violations if this is an [`LockerError::InvalidConfig`].
    pub fn violations(&self) -> Option<&ConfigViolations> {
        match self {
            Self::InvalidConfig(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
