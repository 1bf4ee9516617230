pub type StyleResult<T> = Result<T, StyleError>;

#[derive(thiserror::Error, Debug)]
pub enum StyleError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("curve error: {0}")]
    Curve(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("sink error: {0}")]
    Sink(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StyleError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn curve(msg: impl Into<String>) -> Self {
        Self::Curve(msg.into())
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            StyleError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(StyleError::curve("x").to_string().contains("curve error:"));
        assert!(
            StyleError::encoding("x")
                .to_string()
                .contains("encoding error:")
        );
        assert!(StyleError::sink("x").to_string().contains("sink error:"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = StyleError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
