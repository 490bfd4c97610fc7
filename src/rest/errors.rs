//! Error types for resource operations.

use thiserror::Error;

use crate::clients::HttpError;

/// Error type for manager and resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A field was requested that the resource snapshot does not hold.
    #[error("Resource has no field '{field}'")]
    FieldNotFound {
        /// The field name that was requested.
        field: String,
    },

    /// The decoded response body has no entry under the expected key.
    #[error("Response body has no '{key}' key")]
    MissingResponseKey {
        /// The key that was expected.
        key: String,
    },

    /// The entry under the response key was not shaped as expected.
    #[error("Response key '{key}' did not hold the expected JSON shape")]
    UnexpectedShape {
        /// The key whose value had the wrong shape.
        key: String,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
