pub type TickgifResult<T> = Result<T, TickgifError>;

#[derive(thiserror::Error, Debug)]
pub enum TickgifError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("time error: {0}")]
    Time(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TickgifError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn time(msg: impl Into<String>) -> Self {
        Self::Time(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            TickgifError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(TickgifError::time("x").to_string().contains("time error:"));
        assert!(
            TickgifError::render("x")
                .to_string()
                .contains("render error:")
        );
        assert!(
            TickgifError::encode("x")
                .to_string()
                .contains("encode error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = TickgifError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
