//! The price check page and the form fields it is built from.
//!
//! Each field is wrapped in an element with a stable ID so that htmx can swap
//! a single field, e.g. after a suggestion is chosen or the category changes.

use axum::{
    extract::Query,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    alert::Alert,
    catalog::Category,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_DESCRIPTION_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, base, loading_spinner,
    },
    price_check::form::{FieldErrors, MIN_FIELD_LENGTH, PriceCheckForm},
    suggestion::{SuggestionTarget, suggestion_list},
};

/// The elements disabled while a submission is in flight.
const DISABLED_WHILE_PENDING: &str = "#location, #category, #item-name, #submit-button";

/// Fetch suggestions shortly after the user stops typing, and when the input
/// gains focus.
const SUGGESTION_TRIGGER: &str = "input changed delay:150ms, focus";

/// Attributes on the form that must not leak to the fields' own requests.
const FORM_ONLY_ATTRIBUTES: &str = "hx-target hx-swap hx-indicator hx-disabled-elt";

const CARD_STYLE: &str = "w-full max-w-md p-6 sm:p-8 space-y-6 bg-white rounded-2xl \
    shadow-xl dark:bg-gray-800 text-gray-900 dark:text-white";

/// Display the price check page with an empty form.
pub async fn get_price_check_page() -> Response {
    price_check_page(&PriceCheckForm::default(), &FieldErrors::default(), None).into_response()
}

/// The full price check page around [price_check_view].
pub(crate) fn price_check_page(
    form: &PriceCheckForm,
    errors: &FieldErrors,
    result: Option<Alert>,
) -> Markup {
    let content = html! {
        (nav_bar())
        (hero())

        main class="flex-1 flex flex-col items-center justify-center px-4"
        {
            div class=(CARD_STYLE)
            {
                h2 class="text-2xl font-bold tracking-tight" { "Find a Local Price" }

                (price_check_view(form, errors, result))
            }
        }

        (footer())
    };

    base("Check a Price", &content)
}

/// The price check form followed by the result of the last lookup, if any.
///
/// A submission replaces this whole element, so the entered values and any
/// validation errors are rendered from `form` and `errors`.
pub(crate) fn price_check_view(
    form: &PriceCheckForm,
    errors: &FieldErrors,
    result: Option<Alert>,
) -> Markup {
    html! {
        div id="price-check"
        {
            form
                action=(endpoints::PRICE_CHECK)
                method="post"
                hx-post=(endpoints::PRICE_CHECK)
                hx-target="#price-check"
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                hx-indicator="#indicator"
                hx-disabled-elt=(DISABLED_WHILE_PENDING)
                hx-disinherit=(FORM_ONLY_ATTRIBUTES)
                class="space-y-6"
            {
                input type="hidden" name="form_id" value=(form.form_id);

                (location_field(&form.location, errors.location))
                (category_field(&form.category, errors.category))
                (item_field(&form.item_name, errors.item_name))

                button
                    type="submit" id="submit-button" tabindex="0"
                    class=(BUTTON_PRIMARY_STYLE)
                {
                    span class="inline htmx-indicator" id="indicator"
                    {
                        (loading_spinner())
                    }
                    "Check Price"
                }
            }

            div id="price-result" aria-live="polite"
            {
                @if let Some(result) = result {
                    (result.into_html())
                }
            }
        }
    }
}

/// The location input with an empty suggestion list.
pub(crate) fn location_field(value: &str, error_message: Option<&str>) -> Markup {
    let target = SuggestionTarget::Location;

    html! {
        div id=(target.field_id()) class="relative"
        {
            label for="location" class=(FORM_LABEL_STYLE) { "Location" }

            input
                id="location"
                type="text"
                name=(target.field_name())
                value=(value)
                placeholder="e.g., Bangkok, Thailand"
                required
                minlength=(MIN_FIELD_LENGTH)
                autocomplete="off"
                hx-get=(endpoints::LOCATION_SUGGESTIONS)
                hx-trigger=(SUGGESTION_TRIGGER)
                hx-target={ "#" (target.list_id()) }
                hx-swap="outerHTML"
                hx-on-blur=(target.hide_list_script())
                class=(FORM_TEXT_INPUT_STYLE);

            (suggestion_list(target, &[]))

            p class=(FORM_DESCRIPTION_STYLE) { "Enter the location you're interested in." }

            @if let Some(error_message) = error_message {
                p class=(FORM_ERROR_STYLE) { (error_message) }
            }
        }
    }
}

fn category_field(selected: &str, error_message: Option<&str>) -> Markup {
    html! {
        div
        {
            label for="category" class=(FORM_LABEL_STYLE) { "Category" }

            select
                id="category"
                name="category"
                required
                hx-get=(endpoints::CATEGORY_CHANGE)
                hx-trigger="change"
                hx-target={ "#" (SuggestionTarget::Item.field_id()) }
                hx-swap="outerHTML"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for category in Category::ALL {
                    option
                        value=(category.as_str())
                        selected[category.as_str() == selected]
                    {
                        (category.label())
                    }
                }
            }

            p class=(FORM_DESCRIPTION_STYLE) { "Choose the category of the item or service." }

            @if let Some(error_message) = error_message {
                p class=(FORM_ERROR_STYLE) { (error_message) }
            }
        }
    }
}

/// The item input with an empty suggestion list.
///
/// Suggestions are fetched with the selected category included, so the field
/// itself does not depend on the category.
pub(crate) fn item_field(value: &str, error_message: Option<&str>) -> Markup {
    let target = SuggestionTarget::Item;

    html! {
        div id=(target.field_id()) class="relative"
        {
            label for="item-name" class=(FORM_LABEL_STYLE) { "Item or Service" }

            input
                id="item-name"
                type="text"
                name=(target.field_name())
                value=(value)
                placeholder="e.g., Street food Pad Thai"
                required
                minlength=(MIN_FIELD_LENGTH)
                autocomplete="off"
                hx-get=(endpoints::ITEM_SUGGESTIONS)
                hx-trigger=(SUGGESTION_TRIGGER)
                hx-target={ "#" (target.list_id()) }
                hx-swap="outerHTML"
                hx-include="#category"
                hx-on-blur=(target.hide_list_script())
                class=(FORM_TEXT_INPUT_STYLE);

            (suggestion_list(target, &[]))

            p class=(FORM_DESCRIPTION_STYLE) { "What item or service are you interested in?" }

            @if let Some(error_message) = error_message {
                p class=(FORM_ERROR_STYLE) { (error_message) }
            }
        }
    }
}

fn nav_bar() -> Markup {
    html! {
        nav class="w-full flex items-center justify-between px-6 py-4 bg-white/20 backdrop-blur-md shadow-sm"
        {
            a href=(endpoints::ROOT) class="text-xl font-bold text-indigo-700 tracking-tight" { "BeLocal" }
        }
    }
}

fn hero() -> Markup {
    html! {
        section class="pt-16 pb-8 px-4 text-center"
        {
            h1 class="text-5xl font-extrabold text-white drop-shadow-lg tracking-tight mb-2" { "BeLocal" }

            p class="text-lg md:text-xl text-white/90 max-w-xl mx-auto mb-4"
            {
                "Instantly check local prices for items and services around the world. \
                Make smarter decisions, wherever you are."
            }
        }
    }
}

fn footer() -> Markup {
    let year = OffsetDateTime::now_utc().year();

    html! {
        footer class="w-full text-center py-6 text-white/70 text-sm mt-8"
        {
            "© " (year) " BeLocal. Made with "
            span class="text-pink-300" { "♥" }
            " for travelers."
        }
    }
}

/// The value to fill into the location field.
#[derive(Debug, Default, Deserialize)]
pub struct LocationFieldQuery {
    #[serde(default)]
    pub location: String,
}

/// Render the location field with a chosen suggestion filled in.
pub async fn get_location_field(Query(query): Query<LocationFieldQuery>) -> Response {
    location_field(&query.location, None).into_response()
}

/// The value to fill into the item field.
#[derive(Debug, Default, Deserialize)]
pub struct ItemFieldQuery {
    #[serde(default)]
    pub item_name: String,
}

/// Render the item field with a chosen suggestion filled in.
pub async fn get_item_field(Query(query): Query<ItemFieldQuery>) -> Response {
    item_field(&query.item_name, None).into_response()
}

/// The newly selected category.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryChangeQuery {
    #[serde(default)]
    pub category: String,
}

/// Render an empty item field for a new category.
///
/// The previous item name and its suggestions belong to the old category, so
/// neither is carried over.
pub async fn change_category(Query(query): Query<CategoryChangeQuery>) -> Response {
    match query.category.parse::<Category>() {
        Ok(category) => {
            tracing::debug!("Category changed to {category}, clearing the item field");
            item_field("", None).into_response()
        }
        Err(error) => {
            tracing::warn!("Rejected category change: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod price_check_page_tests {
    use axum::http::StatusCode;
    use scraper::{ElementRef, Selector};

    use crate::{
        endpoints,
        test_utils::{
            assert_content_type, assert_form_input, assert_form_submit_button_with_text,
            assert_hx_endpoint, assert_valid_html, must_get_form, parse_html_document,
        },
    };

    use super::get_price_check_page;

    fn select_one<'a>(element: &ElementRef<'a>, selector: &str) -> ElementRef<'a> {
        element
            .select(&Selector::parse(selector).unwrap())
            .next()
            .unwrap_or_else(|| panic!("No element matching {selector}"))
    }

    #[tokio::test]
    async fn render_page() {
        let response = get_price_check_page().await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::PRICE_CHECK, "hx-post");
        assert_form_input(&form, "location", "text");
        assert_form_input(&form, "item_name", "text");
        assert_form_submit_button_with_text(&form, "Check Price");
    }

    #[tokio::test]
    async fn form_carries_its_id() {
        let html = parse_html_document(get_price_check_page().await).await;
        let form = must_get_form(&html);

        let form_id = select_one(&form, "input[type=hidden][name=form_id]");
        let value = form_id.value().attr("value").unwrap_or_default();
        assert_eq!(value.len(), 36, "want a UUID, got {value:?}");
    }

    #[tokio::test]
    async fn category_select_lists_every_category_with_food_selected() {
        let html = parse_html_document(get_price_check_page().await).await;
        let form = must_get_form(&html);

        let select = select_one(&form, "select[name=category]");
        assert_eq!(
            select.value().attr("hx-get"),
            Some(endpoints::CATEGORY_CHANGE)
        );
        assert_eq!(
            select.value().attr("hx-target"),
            Some("#item-field")
        );
        assert_eq!(select.value().attr("hx-include"), None);
        let options: Vec<_> = select
            .select(&Selector::parse("option").unwrap())
            .map(|option| option.value().attr("value").unwrap_or_default().to_owned())
            .collect();
        assert_eq!(
            options,
            ["food", "accommodation", "transportation", "activities", "shopping"]
        );

        let selected = select_one(&select, "option[selected]");
        assert_eq!(selected.value().attr("value"), Some("food"));
    }

    #[tokio::test]
    async fn submit_disables_controls() {
        let html = parse_html_document(get_price_check_page().await).await;
        let form = must_get_form(&html);

        let disabled = form.value().attr("hx-disabled-elt").unwrap_or_default();
        for selector in ["#location", "#category", "#item-name", "#submit-button"] {
            assert!(
                disabled.contains(selector),
                "want {selector} disabled while submitting, got {disabled:?}"
            );
        }
    }

    #[tokio::test]
    async fn inputs_request_suggestions() {
        let html = parse_html_document(get_price_check_page().await).await;
        let form = must_get_form(&html);

        let location = select_one(&form, "input#location");
        assert_eq!(
            location.value().attr("hx-get"),
            Some(endpoints::LOCATION_SUGGESTIONS)
        );
        assert_eq!(
            location.value().attr("hx-target"),
            Some("#location-suggestions")
        );

        let item = select_one(&form, "input#item-name");
        assert_eq!(item.value().attr("hx-get"), Some(endpoints::ITEM_SUGGESTIONS));
        assert_eq!(item.value().attr("hx-include"), Some("#category"));
    }

    #[tokio::test]
    async fn suggestion_lists_close_when_inputs_lose_focus() {
        let html = parse_html_document(get_price_check_page().await).await;
        let form = must_get_form(&html);

        for (input, list) in [
            ("input#location", "location-suggestions"),
            ("input#item-name", "item-suggestions"),
        ] {
            let on_blur = select_one(&form, input)
                .value()
                .attr("hx-on-blur")
                .unwrap_or_else(|| panic!("{input} has no blur handler"))
                .to_owned();

            assert!(on_blur.contains(list), "want {input} to hide {list}, got {on_blur:?}");
            assert!(on_blur.contains("hidden = true"), "got {on_blur:?}");
        }
    }

    #[tokio::test]
    async fn result_area_starts_empty() {
        let html = parse_html_document(get_price_check_page().await).await;

        let result = html
            .select(&Selector::parse("#price-result").unwrap())
            .next()
            .expect("No result area found");
        assert_eq!(result.children().filter(|node| node.value().is_element()).count(), 0);
    }
}
