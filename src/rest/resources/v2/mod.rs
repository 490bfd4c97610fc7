//! Managers for the v2 API resource families.
//!
//! One module per family; each is a thin layer of URL building over
//! [`Manager`](crate::rest::Manager).

mod credits;
mod health;
mod invoices;
mod measurements;
mod products;
mod quotations;

pub use credits::{Credit, CreditManager};
pub use health::{Health, HealthManager};
pub use invoices::{Invoice, InvoiceManager};
pub use measurements::{Measurement, MeasurementManager};
pub use products::{Product, ProductManager};
pub use quotations::{Quotation, QuotationManager};

/// Timestamp format for start/end window parameters.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
