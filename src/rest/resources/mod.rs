//! Domain resource managers, grouped by API version.

pub mod v2;
