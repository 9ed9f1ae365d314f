//! The API endpoints URIs.

/// The price check page.
pub const ROOT: &str = "/";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for submitting the price check form.
pub const PRICE_CHECK: &str = "/api/price_check";
/// The route for suggestions for the location field.
pub const LOCATION_SUGGESTIONS: &str = "/api/suggestions/locations";
/// The route for suggestions for the item field.
pub const ITEM_SUGGESTIONS: &str = "/api/suggestions/items";
/// The route that renders the location field with a value filled in.
pub const LOCATION_FIELD: &str = "/api/fields/location";
/// The route that renders the item field with a value filled in.
pub const ITEM_FIELD: &str = "/api/fields/item";
/// The route that renders the item field after the category changes.
pub const CATEGORY_CHANGE: &str = "/api/fields/category";
