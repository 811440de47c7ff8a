//! Errors raised while reading order payloads.
//!
//! Only structural problems are errors. Bad numbers never are: they degrade
//! to zero during conversion. A structurally broken record only costs that
//! record; the rest of the listing is still parsed.

use millboard_core::OrderId;
use thiserror::Error;

/// A payload that cannot be turned into typed orders.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The payload is not valid JSON, or a record has the wrong shape.
    #[error("Invalid order payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level value is neither an order array nor a paginated page.
    #[error("Expected an array of orders or an object with a `results` array")]
    NotAnOrderList,

    /// A record carries no usable order id.
    #[error("Order record has no usable `id`")]
    MissingOrderId,

    /// The order has no shade, or the shade has no usable id.
    #[error("Order {order_id}: shade is missing or has no usable `id`")]
    MissingShade {
        /// Order the shade belongs to.
        order_id: OrderId,
    },

    /// A raw-cotton lot carries no usable id.
    #[error("Order {order_id}: raw-cotton lot has no usable `id`")]
    MissingRawCottonId {
        /// Order whose shade carries the lot.
        order_id: OrderId,
    },

    /// A blend constituent names no fibre at all.
    #[error("Order {order_id}: blend constituent has neither `fibre_id` nor `fibre.id`")]
    MissingFibreId {
        /// Order whose shade carries the constituent.
        order_id: OrderId,
    },
}
