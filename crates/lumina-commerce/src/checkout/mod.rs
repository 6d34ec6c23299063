//! Checkout module.
//!
//! Contains the three-step checkout flow and the order request handed off at
//! confirmation.

mod flow;
mod order;

pub use flow::{CheckoutFlow, CheckoutStep};
pub use order::{OrderLine, OrderRequest};
