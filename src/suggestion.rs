//! Autocomplete suggestions for the location and item fields.
//!
//! Suggestions come from the static lists in [crate::catalog] and are matched
//! with a case-insensitive substring search. They are rendered as htmx
//! fragments that replace the suggestion list under each input.

use axum::{
    extract::Query,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{catalog, endpoints};

/// How many suggestions to show when the user has not typed anything yet.
pub const DEFAULT_SUGGESTION_COUNT: usize = 5;

/// Find the candidates that contain `query`, ignoring case.
///
/// Candidates keep their original order. A query that is empty or only
/// whitespace returns the first [DEFAULT_SUGGESTION_COUNT] candidates instead.
pub fn suggest<'a>(query: &str, candidates: &[&'a str]) -> Vec<&'a str> {
    if query.trim().is_empty() {
        return candidates
            .iter()
            .take(DEFAULT_SUGGESTION_COUNT)
            .copied()
            .collect();
    }

    let query = query.to_lowercase();

    candidates
        .iter()
        .filter(|candidate| candidate.to_lowercase().contains(&query))
        .copied()
        .collect()
}

/// How long a suggestion list stays open after its input loses focus.
const HIDE_DELAY_MS: u32 = 150;

/// The input field that a suggestion list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionTarget {
    Location,
    Item,
}

impl SuggestionTarget {
    /// The element ID of the suggestion list.
    pub fn list_id(self) -> &'static str {
        match self {
            SuggestionTarget::Location => "location-suggestions",
            SuggestionTarget::Item => "item-suggestions",
        }
    }

    /// The element ID of the wrapper around the input and its suggestions.
    pub fn field_id(self) -> &'static str {
        match self {
            SuggestionTarget::Location => "location-field",
            SuggestionTarget::Item => "item-field",
        }
    }

    /// The form field name of the input.
    pub fn field_name(self) -> &'static str {
        match self {
            SuggestionTarget::Location => "location",
            SuggestionTarget::Item => "item_name",
        }
    }

    /// Script for the input's `blur` handler that hides the suggestion list.
    ///
    /// The list is hidden after [HIDE_DELAY_MS] so that a click on a
    /// suggestion still reaches its button.
    pub fn hide_list_script(self) -> String {
        format!(
            "setTimeout(() => {{ const list = document.getElementById('{}'); \
            if (list) {{ list.hidden = true; }} }}, {HIDE_DELAY_MS})",
            self.list_id()
        )
    }

    fn field_endpoint(self) -> &'static str {
        match self {
            SuggestionTarget::Location => endpoints::LOCATION_FIELD,
            SuggestionTarget::Item => endpoints::ITEM_FIELD,
        }
    }

    /// The URL that re-renders the field with `value` filled in.
    fn select_url(self, value: &str) -> String {
        let endpoint = self.field_endpoint();

        match serde_urlencoded::to_string([(self.field_name(), value)]) {
            Ok(query) => format!("{endpoint}?{query}"),
            Err(error) => {
                tracing::error!("Could not encode suggestion {value:?}: {error}");
                endpoint.to_owned()
            }
        }
    }
}

const SUGGESTION_LIST_STYLE: &str = "absolute z-10 w-full mt-1 bg-white dark:bg-gray-700 \
    border border-gray-200 dark:border-gray-600 rounded shadow-lg max-h-48 overflow-y-auto";

const SUGGESTION_BUTTON_STYLE: &str = "w-full text-left p-2 text-sm text-gray-900 \
    dark:text-white hover:bg-gray-100 dark:hover:bg-gray-600 cursor-pointer";

/// Render the suggestion list for `target`.
///
/// Each suggestion is a button that swaps in the field with the suggestion as
/// its value, which also clears the list. An empty list is rendered hidden so
/// htmx still has an element to swap into.
pub fn suggestion_list(target: SuggestionTarget, suggestions: &[&str]) -> Markup {
    let field_selector = format!("#{}", target.field_id());

    html! {
        ul
            id=(target.list_id())
            role="listbox"
            class=(SUGGESTION_LIST_STYLE)
            hidden[suggestions.is_empty()]
        {
            @for suggestion in suggestions {
                li
                {
                    button
                        type="button"
                        role="option"
                        hx-get=(target.select_url(suggestion))
                        hx-target=(field_selector)
                        hx-swap="outerHTML"
                        class=(SUGGESTION_BUTTON_STYLE)
                    {
                        (suggestion)
                    }
                }
            }
        }
    }
}

/// The current text of the location input.
#[derive(Debug, Default, Deserialize)]
pub struct LocationSuggestionQuery {
    #[serde(default)]
    pub location: String,
}

/// Render suggestions for the location input.
pub async fn get_location_suggestions(Query(query): Query<LocationSuggestionQuery>) -> Response {
    let suggestions = suggest(&query.location, catalog::LOCATIONS);

    suggestion_list(SuggestionTarget::Location, &suggestions).into_response()
}

/// The current text of the item input and the selected category.
#[derive(Debug, Default, Deserialize)]
pub struct ItemSuggestionQuery {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub item_name: String,
}

/// Render suggestions for the item input from the selected category's items.
pub async fn get_item_suggestions(Query(query): Query<ItemSuggestionQuery>) -> Response {
    let candidates = catalog::items_for(&query.category);
    let suggestions = suggest(&query.item_name, candidates);

    suggestion_list(SuggestionTarget::Item, &suggestions).into_response()
}
