//! # Domain Entities
//!
//! Requests and results of a fee estimate.
//!
//! - [`Shipment`]: Pickup, delivery and cargo
//! - [`FeeQuoteRequest`]: A shipment with a requested service class
//! - [`FeeQuote`]: A priced quote for one service class
//! - [`QuoteComparison`]: Quotes for every service class

pub mod fee_quote;
pub mod shipment;

pub use fee_quote::{FeeQuote, QuoteComparison};
pub use shipment::{FeeQuoteRequest, Shipment};
