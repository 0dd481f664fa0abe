#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod mock_api;

pub(crate) use form::{
    assert_form_error_message, assert_form_input, assert_form_select, assert_form_submit_button,
    assert_hx_endpoint, must_get_form,
};
pub(crate) use html::{
    assert_valid_html, parse_html_document, parse_html_fragment, select_texts,
};
pub(crate) use http::{assert_hx_redirect, assert_status, assert_status_ok};
pub(crate) use mock_api::{MockApi, TEST_EMAIL, TEST_PASSWORD, test_session};
