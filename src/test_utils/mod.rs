#![allow(missing_docs)]

pub(crate) mod fake_price_table;
pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use fake_price_table::{FakePriceTable, TEST_API_KEY, unreachable_price_table};
pub(crate) use form::{
    assert_form_input, assert_form_submit_button_with_text, assert_hx_endpoint, must_get_form,
};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use http::assert_content_type;
