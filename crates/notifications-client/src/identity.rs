use std::fmt;

/// Header carrying the caller identity on public API calls.
pub const IDENTITY_HEADER: &str = "x-rh-identity";

/// Opaque, pre-obtained caller identity.
///
/// The client never inspects the token; it only forwards it as
/// [`IDENTITY_HEADER`].
#[derive(Clone, PartialEq, Eq)]
pub struct Identity(String);

impl Identity {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity(<{} bytes>)", self.0.len())
    }
}
