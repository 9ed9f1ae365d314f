//! Implements a struct that holds the state of the web server.

use crate::{pending::PendingLookups, price_table::PriceTable};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The client for the remote price table.
    pub price_table: PriceTable,

    /// The price check forms that are waiting on the price table.
    pub pending_lookups: PendingLookups,
}

impl AppState {
    /// Create a new [AppState] that looks up prices in `price_table`.
    pub fn new(price_table: PriceTable) -> Self {
        Self {
            price_table,
            pending_lookups: PendingLookups::default(),
        }
    }
}
