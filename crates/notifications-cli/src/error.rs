use notifications_client::{ClientError, ResourceKind};

/// A failure that ends the run with a specific exit code.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct Fatal {
    pub code: i32,
    pub message: String,
}

impl Fatal {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Exit code for a failed run: 2 when an event type could not be created,
/// the carried code for [`Fatal`], 1 otherwise.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(fatal) = err.downcast_ref::<Fatal>() {
        return fatal.code;
    }
    match err.downcast_ref::<ClientError>() {
        Some(ClientError::Creation(creation)) if creation.kind == ResourceKind::EventType => 2,
        _ => 1,
    }
}
