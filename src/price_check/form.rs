//! The price check form's data, validation and normalization.

use std::fmt::Display;

use serde::Deserialize;
use unicode_segmentation::UnicodeSegmentation;
use uuid::Uuid;

use crate::catalog::Category;

/// The minimum number of characters in the location and item fields.
pub const MIN_FIELD_LENGTH: usize = 2;

pub const EMPTY_LOCATION_MSG: &str = "Please enter a location.";
pub const SHORT_LOCATION_MSG: &str = "Location must be at least 2 characters.";
pub const INVALID_CATEGORY_MSG: &str = "Please select a category.";
pub const EMPTY_ITEM_MSG: &str = "Please enter an item or service.";
pub const SHORT_ITEM_MSG: &str = "Item or service must be at least 2 characters.";

/// Identifies one rendered copy of the price check form.
///
/// The ID is sent back with every submission so the server can tell whether
/// the same form already has a lookup in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct FormId(Uuid);

impl FormId {
    /// Create a new, random form ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FormId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for FormId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The raw values entered in the price check form.
///
/// The category is kept as the submitted string so that an unknown value can
/// be reported as a field error instead of rejecting the whole request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceCheckForm {
    pub form_id: FormId,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub item_name: String,
}

impl Default for PriceCheckForm {
    fn default() -> Self {
        Self {
            form_id: FormId::new(),
            location: String::new(),
            category: Category::default().to_string(),
            item_name: String::new(),
        }
    }
}

/// Inline error messages for each field of the price check form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub location: Option<&'static str>,
    pub category: Option<&'static str>,
    pub item_name: Option<&'static str>,
}

impl FieldErrors {
    /// Whether every field passed validation.
    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.category.is_none() && self.item_name.is_none()
    }
}

impl PriceCheckForm {
    /// Check every field and build a [PriceQuery] if they are all valid.
    ///
    /// # Errors
    ///
    /// Returns the error message for each invalid field.
    pub fn validate(&self) -> Result<PriceQuery, FieldErrors> {
        let category = self.category.parse::<Category>();
        let errors = FieldErrors {
            location: check_text_field(&self.location, EMPTY_LOCATION_MSG, SHORT_LOCATION_MSG),
            category: category.is_err().then_some(INVALID_CATEGORY_MSG),
            item_name: check_text_field(&self.item_name, EMPTY_ITEM_MSG, SHORT_ITEM_MSG),
        };

        match category {
            Ok(category) if errors.is_empty() => Ok(PriceQuery {
                location: self.location.clone(),
                category,
                item_name: self.item_name.clone(),
            }),
            _ => Err(errors),
        }
    }
}

fn check_text_field(
    value: &str,
    empty_message: &'static str,
    short_message: &'static str,
) -> Option<&'static str> {
    let length = value.trim().graphemes(true).count();

    if length == 0 {
        Some(empty_message)
    } else if length < MIN_FIELD_LENGTH {
        Some(short_message)
    } else {
        None
    }
}

/// A validated price check.
///
/// Only [PriceCheckForm::validate] creates this type, so the location and
/// item name are known to be at least [MIN_FIELD_LENGTH] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuery {
    location: String,
    category: Category,
    item_name: String,
}

impl PriceQuery {
    /// The category chosen in the form.
    pub fn category(&self) -> Category {
        self.category
    }

    /// The location and item in the form stored in the price table: lowercase
    /// with surrounding whitespace removed.
    ///
    /// The category is not part of the key.
    pub fn lookup_key(&self) -> LookupKey {
        LookupKey {
            location: normalize(&self.location),
            item: normalize(&self.item_name),
        }
    }
}

fn normalize(text: &str) -> String {
    text.to_lowercase().trim().to_owned()
}

/// The normalized values matched against the `location` and `item` columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub location: String,
    pub item: String,
}
