//! Submitting the price check form and looking up the price.

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;

use crate::{
    AppState,
    alert::Alert,
    pending::PendingLookups,
    price_check::{
        form::{FieldErrors, LookupKey, PriceCheckForm},
        page::{price_check_page, price_check_view},
    },
    price_table::{Price, PriceTable},
};

const PRICE_FOUND_MSG: &str = "Price:";
const PRICE_NOT_FOUND_MSG: &str = "No price found for this location and item combination";
const LOOKUP_FAILED_MSG: &str =
    "Error fetching price data. Please check your connection and try again.";

/// The state needed to look up a price.
#[derive(Debug, Clone)]
pub struct PriceCheckState {
    /// The remote table holding the prices.
    pub price_table: PriceTable,
    /// The forms with a lookup in flight.
    pub pending_lookups: PendingLookups,
}

impl FromRef<AppState> for PriceCheckState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            price_table: state.price_table.clone(),
            pending_lookups: state.pending_lookups.clone(),
        }
    }
}

/// The result of a lookup that made it to the price table.
#[derive(Debug, Clone, Copy, PartialEq)]
enum LookupOutcome {
    Found(Price),
    NotFound,
    Failed,
}

impl From<LookupOutcome> for Alert {
    fn from(outcome: LookupOutcome) -> Self {
        match outcome {
            LookupOutcome::Found(price) => Alert::Success {
                message: PRICE_FOUND_MSG.to_owned(),
                details: price.to_string(),
            },
            LookupOutcome::NotFound => Alert::Info {
                message: PRICE_NOT_FOUND_MSG.to_owned(),
                details: String::new(),
            },
            LookupOutcome::Failed => Alert::Error {
                message: LOOKUP_FAILED_MSG.to_owned(),
                details: String::new(),
            },
        }
    }
}

/// A route handler for submitting the price check form.
///
/// Invalid forms are rendered again with the error messages and no lookup is
/// made. Otherwise the price for the location and item is looked up and shown
/// below the form. Only the form is returned for htmx requests, plain form
/// posts get the full page.
///
/// Responds with 409 Conflict if the same form already has a lookup in flight.
pub async fn submit_price_check(
    State(state): State<PriceCheckState>,
    HxRequest(is_htmx_request): HxRequest,
    Form(form): Form<PriceCheckForm>,
) -> Response {
    let query = match form.validate() {
        Ok(query) => query,
        Err(errors) => {
            tracing::debug!("Price check form {} is invalid: {errors:?}", form.form_id);
            return render(is_htmx_request, &form, &errors, None);
        }
    };

    let _pending_lookup = match state.pending_lookups.try_begin(form.form_id) {
        Ok(guard) => guard,
        Err(error) => {
            tracing::warn!("Rejected price check for form {}: {error}", form.form_id);
            return error.into_alert_response();
        }
    };

    let key = query.lookup_key();
    tracing::info!(
        category = %query.category(),
        "Looking up the price of {:?} in {:?}",
        key.item,
        key.location
    );
    let outcome = look_up_price(&state.price_table, &key).await;

    render(
        is_htmx_request,
        &form,
        &FieldErrors::default(),
        Some(outcome.into()),
    )
}

async fn look_up_price(price_table: &PriceTable, key: &LookupKey) -> LookupOutcome {
    match price_table.find_price(key).await {
        Ok(Some(price)) => {
            tracing::info!("Found price {price} for {key:?}");
            LookupOutcome::Found(price)
        }
        Ok(None) => {
            tracing::info!("No price for {key:?}");
            LookupOutcome::NotFound
        }
        Err(error) => {
            tracing::error!("Could not look up price for {key:?}: {error}");
            LookupOutcome::Failed
        }
    }
}

fn render(
    is_htmx_request: bool,
    form: &PriceCheckForm,
    errors: &FieldErrors,
    result: Option<Alert>,
) -> Response {
    if is_htmx_request {
        price_check_view(form, errors, result).into_response()
    } else {
        price_check_page(form, errors, result).into_response()
    }
}
