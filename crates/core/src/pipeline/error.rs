use thiserror::Error;

/// Failure taxonomy for one `RestoreFacesUseCase` run.
///
/// Any stage failure aborts the whole call; there is no partial output
/// with some faces restored and others not, and no retry here. The
/// underlying message is carried verbatim so callers can show it raw.
/// Zero detected faces is NOT an error and never appears here.
#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("face detection failed: {0}")]
    Detection(String),
    #[error("face restoration failed: {0}")]
    Restoration(String),
    #[error("face parsing failed: {0}")]
    Segmentation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_preserve_underlying_error() {
        let err = RestoreError::Restoration("session died".into());
        assert_eq!(err.to_string(), "face restoration failed: session died");
    }
}
