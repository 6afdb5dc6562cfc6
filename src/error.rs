use thiserror::Error;

use crate::Handle;

/// Errors reported by [`SlotMap`](crate::SlotMap) operations.
///
/// Lookups never fail with an error: a stale or unknown handle simply
/// yields `None` from `get`.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// `destroy` was called with a handle that does not refer to a live
    /// object: already destroyed, never issued, or out of range. The table
    /// is left untouched.
    #[error("handle {0} does not refer to a live object")]
    StaleHandle(Handle),

    /// Growing the table would need slot indices beyond `u32::MAX`.
    #[error("slot index space exhausted")]
    CapacityExhausted,
}

/// A specialized `Result` type for slot map operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_handle() {
        let e = Error::StaleHandle(Handle::encode(4, 2));
        assert_eq!(e.to_string(), "handle 4v2 does not refer to a live object");
        assert_eq!(
            Error::CapacityExhausted.to_string(),
            "slot index space exhausted"
        );
    }
}
