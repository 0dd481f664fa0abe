use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

/// Assert that `form` sends its data to `endpoint` via the htmx `attribute`,
/// e.g. "hx-post" or "hx-put".
#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let got = form
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        got, endpoint,
        "want form with attribute {attribute}=\"{endpoint}\", got {got:?}"
    );
}

/// Assert that `form` has a required input named `name` of type `type_`,
/// optionally pre-filled with `value`.
#[track_caller]
pub(crate) fn assert_form_input(
    form: &ElementRef<'_>,
    name: &str,
    type_: &str,
    value: Option<&str>,
) {
    let selector = Selector::parse(&format!("input[name=\"{name}\"]")).unwrap();
    let input = form
        .select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No input found with name \"{name}\""));

    let input_type = input.value().attr("type").unwrap_or_default();
    assert_eq!(
        input_type, type_,
        "want input {name} with type \"{type_}\", got {input_type:?}"
    );
    assert!(
        input.value().attr("required").is_some(),
        "want input with name {name} to have the required attribute but got none"
    );

    if let Some(value) = value {
        let input_value = input.value().attr("value").unwrap_or_default();
        assert_eq!(
            input_value, value,
            "want input {name} with value \"{value}\", got {input_value:?}"
        );
    }
}

/// Assert that `form` has a select named `name` whose selected option has
/// the value `selected`.
#[track_caller]
pub(crate) fn assert_form_select(form: &ElementRef<'_>, name: &str, selected: &str) {
    let selector = Selector::parse(&format!("select[name=\"{name}\"]")).unwrap();
    let select = form
        .select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No select found with name \"{name}\""));

    let got = select
        .select(&Selector::parse("option[selected]").unwrap())
        .next()
        .and_then(|option| option.value().attr("value"));

    assert_eq!(
        got,
        Some(selected),
        "want select {name} to have option {selected:?} selected"
    );
}

#[track_caller]
pub(crate) fn assert_form_submit_button(form: &ElementRef<'_>, text: &str) {
    let submit_button = form
        .select(&Selector::parse("button[type=submit]").unwrap())
        .next()
        .expect("No submit button found");

    let got_text = submit_button.text().collect::<String>();
    assert_eq!(text, got_text.trim());
}

#[track_caller]
pub(crate) fn assert_form_error_message(form: &ElementRef<'_>, want_error_message: &str) {
    let error_message = form
        .select(&Selector::parse("p.text-red-500").unwrap())
        .next()
        .expect("No error message found")
        .text()
        .collect::<String>();

    assert_eq!(want_error_message, error_message.trim());
}
