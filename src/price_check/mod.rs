//! The price check form: rendering it, swapping its fields and submitting it.

mod form;
mod page;
mod submit;

pub use form::{FormId, LookupKey, PriceCheckForm};
pub use page::{change_category, get_item_field, get_location_field, get_price_check_page};
pub use submit::submit_price_check;
