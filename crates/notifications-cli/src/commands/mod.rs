pub mod bundle;
pub mod endpoint;
pub mod history;
pub mod setup;

use notifications_client::Lookup;

use crate::error::Fatal;

/// Turns a lookup into an id, or a human readable "not found" failure.
pub(crate) fn require(lookup: Lookup, what: &str, name: &str) -> Result<String, Fatal> {
    match lookup {
        Lookup::Found(id) => Ok(id),
        Lookup::NotFound => Err(Fatal::new(1, format!("{what} \"{name}\" not found"))),
        Lookup::TransportError(failure) => Err(Fatal::new(
            1,
            format!("{what} \"{name}\" not found ({failure})"),
        )),
    }
}
