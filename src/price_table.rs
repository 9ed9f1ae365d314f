//! Client for the hosted price table.
//!
//! The table is served over a PostgREST-style HTTP API (e.g. Supabase) and
//! has at least the columns `location`, `item` and `price`. Locations and
//! items are stored lowercase.

use std::fmt::Display;

use reqwest::{
    Client, RequestBuilder,
    header::{AUTHORIZATION, HeaderValue},
};
use serde::Deserialize;
use url::Url;

use crate::{Error, html::format_currency, price_check::LookupKey};

/// The name of the price table if none is configured.
pub const DEFAULT_TABLE: &str = "prices";

const USER_AGENT: &str = concat!("belocal/", env!("CARGO_PKG_VERSION"));

/// The header PostgREST gateways read the project API key from.
const API_KEY_HEADER: &str = "apikey";

/// A price from the price table, in dollars.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    #[cfg(test)]
    pub fn new(amount: f64) -> Self {
        Self(amount)
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_currency(self.0))
    }
}

#[derive(Debug, Deserialize)]
struct PriceRow {
    price: Price,
}

/// A connection to the remote price table.
///
/// Cloning is cheap, clones share the same HTTP connection pool.
#[derive(Debug, Clone)]
pub struct PriceTable {
    http: Client,
    rows_url: Url,
    api_key: HeaderValue,
    bearer_token: HeaderValue,
}

impl PriceTable {
    /// Create a client for `table` in the project hosted at `base_url`.
    ///
    /// `api_key` is sent with every request, both as the `apikey` header and
    /// as a bearer token.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `base_url` is not an absolute http(s) URL,
    /// - `api_key` cannot be used as a header value,
    /// - the HTTP client could not be created.
    pub fn new(base_url: &str, table: &str, api_key: &str) -> Result<Self, Error> {
        let mut base_url =
            Url::parse(base_url).map_err(|error| Error::InvalidTableUrl(error.to_string()))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::InvalidTableUrl(format!(
                "unsupported scheme \"{}\"",
                base_url.scheme()
            )));
        }

        // `Url::join` replaces the last path segment unless the path ends in a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let rows_url = base_url
            .join(&format!("rest/v1/{table}"))
            .map_err(|error| Error::InvalidTableUrl(error.to_string()))?;

        let mut api_key_header = HeaderValue::from_str(api_key).map_err(|_| Error::InvalidApiKey)?;
        api_key_header.set_sensitive(true);

        let mut bearer_token =
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| Error::InvalidApiKey)?;
        bearer_token.set_sensitive(true);

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|error| Error::HttpClient(error.to_string()))?;

        Ok(Self {
            http,
            rows_url,
            api_key: api_key_header,
            bearer_token,
        })
    }

    /// The URL rows are read from.
    pub fn rows_url(&self) -> &Url {
        &self.rows_url
    }

    /// Find the price of `key.item` at `key.location`.
    ///
    /// Both columns are matched by equality, so `key` should already be
    /// normalized. The request is sent once and never retried.
    ///
    /// Returns `Ok(None)` if no row matches.
    ///
    /// # Errors
    ///
    /// This function will return an error if the request fails, the table
    /// responds with an error status or an unexpected body, or more than one
    /// row matches.
    pub async fn find_price(&self, key: &LookupKey) -> Result<Option<Price>, Error> {
        let location = format!("eq.{}", key.location);
        let item = format!("eq.{}", key.item);

        // Asking for two rows is enough to notice duplicates.
        let request = self.http.get(self.rows_url.clone()).query(&[
            ("select", "price"),
            ("location", location.as_str()),
            ("item", item.as_str()),
            ("limit", "2"),
        ]);

        match self.fetch_rows(request).await?.as_slice() {
            [] => Ok(None),
            [row] => Ok(Some(row.price)),
            rows => Err(Error::DuplicatePriceRows(rows.len())),
        }
    }

    /// Check that the table can be reached and read with the configured key.
    ///
    /// # Errors
    ///
    /// This function will return an error if the request fails or the table
    /// responds with an error status or an unexpected body.
    pub async fn check_connection(&self) -> Result<(), Error> {
        let request = self
            .http
            .get(self.rows_url.clone())
            .query(&[("select", "price"), ("limit", "1")]);

        self.fetch_rows(request).await.map(|_| ())
    }

    async fn fetch_rows(&self, request: RequestBuilder) -> Result<Vec<PriceRow>, Error> {
        let response = request
            .header(API_KEY_HEADER, self.api_key.clone())
            .header(AUTHORIZATION, self.bearer_token.clone())
            .send()
            .await
            .map_err(|error| Error::LookupRequest(error.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::LookupStatus(status.as_u16(), body));
        }

        response
            .json::<Vec<PriceRow>>()
            .await
            .map_err(|error| Error::LookupResponse(error.to_string()))
    }
}
