use maud::{DOCTYPE, Markup, PreEscaped, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// The currency symbol amounts are displayed with.
pub const CURRENCY_SYMBOL: &str = "₹";

// Link styles
pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_SECONDARY_STYLE: &str = "w-full py-2 px-4 \
    text-sm font-medium text-gray-900 bg-white rounded border border-gray-200 \
    hover:bg-gray-100 hover:text-blue-700 focus:z-10 dark:bg-gray-800 \
    dark:text-gray-400 dark:border-gray-600 dark:hover:text-white \
    dark:hover:bg-gray-700 text-center";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";

// Card styles
pub const CARD_STYLE: &str = "rounded-lg border border-gray-200 bg-white p-4 \
    shadow-sm dark:border-gray-700 dark:bg-gray-800";

// Badge styles
pub const INCOME_BADGE_STYLE: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold rounded-full text-green-800 bg-green-100 \
    dark:bg-green-900 dark:text-green-300";
pub const EXPENSE_BADGE_STYLE: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold rounded-full text-red-800 bg-red-100 \
    dark:bg-red-900 dark:text-red-300";
pub const NEUTRAL_BADGE_STYLE: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold text-blue-800 bg-blue-100 rounded-full \
    dark:bg-blue-900 dark:text-blue-300";

// Text colours for signed amounts
pub const POSITIVE_AMOUNT_STYLE: &str = "text-green-600 dark:text-green-400";
pub const NEGATIVE_AMOUNT_STYLE: &str = "text-red-600 dark:text-red-400";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
    Style(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Finance Tracker" }
                link rel="icon" type="image/png" href="/static/favicon-32x32.png" sizes="32x32";
                link href="/static/main.css" rel="stylesheet";

                script src="/static/htmx-2.0.8-min.js" integrity="sha384-/TgkGk7p307TH7EXJDuUlgG3Ce1UVolAOFopFekQkkXihi5u/6OCvVKyz1W+idaz" {}
                script src="/static/htmx-ext-response-targets-2.0.4.js" integrity="sha384-T41oglUPvXLGBVyRdZsVRxNWnOOqCynaPubjUVjxhsjFTKrFJGEMm3/0KGmNQ+Pg" {}

                style
                {
                    r#"
                    #indicator.htmx-indicator {
                        display: none;
                    }

                    #indicator.htmx-request .htmx-indicator {
                        display: inline;
                    }

                    #indicator.htmx-request.htmx-indicator {
                        display: inline;
                    }

                    .echarts-tooltip {
                        z-index: 30 !important;
                    }
                    "#
                }

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptSource(text) => script { (text) }
                        HeadElement::ScriptLink(path) => script src=(path) {}
                        HeadElement::Style(text) => style { (text) }
                    }
                }
            }

            body
                hx-ext="response-targets"
                hx-target-error="#alert-container"
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900 pb-[calc(5rem+env(safe-area-inset-bottom))] lg:pb-0"
            {
                (content)

                // Alert container for out-of-band swaps
                div
                    id="alert-container"
                    class="hidden w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Homepage"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

pub fn log_in_register(form_title: &str, form: &Markup) -> Markup {
    html! {
        div class="flex flex-col items-center justify-center px-6 py-8 mx-auto"
        {
            a href="#" class="flex items-center mb-6 text-2xl font-semibold text-gray-900 dark:text-white"
            {
                img class="w-8 h-8 mr-2" src="/static/favicon-32x32.png" alt="logo";
                "Finance Tracker"
            }

            div class="w-full bg-white rounded-lg shadow dark:border md:mt-0 sm:max-w-md xl:p-0 dark:bg-gray-800 dark:border-gray-700"
            {
                div class="p-6 space-y-4 md:space-y-6 sm:p-8"
                {
                    h1 class="text-xl font-bold leading-tight tracking-tight text-gray-900 md:text-2xl dark:text-white"
                    {
                        (form_title)
                    }

                    (form)
                }
            }
        }
    }
}

pub fn password_input(password: &str, min_length: u8) -> Markup {
    html! {
        div
        {
            label
                for="password"
                class=(FORM_LABEL_STYLE)
            {
                "Password"
            }

            input
                type="password"
                name="password"
                id="password"
                placeholder="••••••••"
                class=(FORM_TEXT_INPUT_STYLE)
                required
                value=(password)
                minlength=(min_length);
        }
    }
}

/// A paragraph for showing a form level error, e.g. rejected credentials.
pub fn form_error_message(error_message: Option<&str>) -> Markup {
    html! {
        @if let Some(error_message) = error_message
        {
            p class="text-red-500 text-base" { (error_message) }
        }
    }
}

pub fn loading_spinner() -> Markup {
    // Spinner SVG adapted from https://flowbite.com/docs/components/spinner/
    html! {
        svg
            aria-hidden="true"
            role="status"
            class="inline text-white w-4 h-4 me-2 mb-1 animate-spin"
            viewBox="0 0 100 101"
            fill="none"
            xmlns="http://www.w3.org/2000/svg"
        {
            path
                d="M100 50.5908C100 78.2051 77.6142 100.591 50 100.591C22.3858 100.591 0 78.2051 0 50.5908C0 22.9766 22.3858 0.59082 50 0.59082C77.6142 0.59082 100 22.9766 100 50.5908ZM9.08144 50.5908C9.08144 73.1895 27.4013 91.5094 50 91.5094C72.5987 91.5094 90.9186 73.1895 90.9186 50.5908C90.9186 27.9921 72.5987 9.67226 50 9.67226C27.4013 9.67226 9.08144 27.9921 9.08144 50.5908Z"
                fill="#E5E7EB" {}
            path
                d="M93.9676 39.0409C96.393 38.4038 97.8624 35.9116 97.0079 33.5539C95.2932 28.8227 92.871 24.3692 89.8167 20.348C85.8452 15.1192 80.8826 10.7238 75.2124 7.41289C69.5422 4.10194 63.2754 1.94025 56.7698 1.05124C51.7666 0.367541 46.6976 0.446843 41.7345 1.27873C39.2613 1.69328 37.813 4.19778 38.4501 6.62326C39.0873 9.04874 41.5694 10.4717 44.0505 10.1071C47.8511 9.54855 51.7191 9.52689 55.5402 10.0491C60.8642 10.7766 65.9928 12.5457 70.6331 15.2552C75.2735 17.9648 79.3347 21.5619 82.5849 25.841C84.9175 28.9121 86.7997 32.2913 88.1811 35.8758C89.083 38.2158 91.5421 39.6781 93.9676 39.0409Z"
                fill="currentColor" {}
        }
    }
}

/// A submit button that is disabled and shows a spinner while its form's
/// request is in flight.
pub fn submit_button(label: &str) -> Markup {
    html! {
        button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE)
        {
            span id="indicator" class="htmx-indicator" { (loading_spinner()) }
            (label)
        }
    }
}

/// Returns the CSS styles for adding a currency symbol prefix to number inputs.
pub fn currency_input_styles() -> HeadElement {
    HeadElement::Style(PreEscaped(format!(
        r#"
        .input-wrapper {{
            position: relative;
            display: block;
        }}
        .input-wrapper input[type="number"] {{
            padding-left: 1.6rem;
        }}
        .input-wrapper::before {{
            content: '{CURRENCY_SYMBOL}';
            position: absolute;
            left: 0.6rem;
            top: 50%;
            transform: translateY(-50%);
            pointer-events: none;
        }}
        "#
    )))
}

pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency(CURRENCY_SYMBOL)
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency(&format!("-{CURRENCY_SYMBOL}"))
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return format!("{CURRENCY_SYMBOL}0.00");
    };

    // numfmt omits trailing zeros, e.g. "12.30" is rendered as "12.3" and
    // "12.00" as "12".
    match formatted_string.rsplit_once('.') {
        Some((_, decimals)) if decimals.len() == 1 => format!("{formatted_string}0"),
        Some(_) => formatted_string,
        None => format!("{formatted_string}.00"),
    }
}

const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[month repr:short] [day padding:none], [year]");

/// Format a date for display, e.g. "Oct 5, 2025".
pub fn format_date(date: Date) -> String {
    date.format(DISPLAY_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// The text colour for an amount: green when zero or positive, red otherwise.
pub fn amount_style(amount: f64) -> &'static str {
    if amount >= 0.0 {
        POSITIVE_AMOUNT_STYLE
    } else {
        NEGATIVE_AMOUNT_STYLE
    }
}

/// A link with blue text for use in a <p> tag.
pub fn link(url: &str, text: &str) -> Markup {
    html! (
        a href=(url) class=(LINK_STYLE)
        {
          (text)
        }
    )
}

/// An "Edit" link and a "Delete" button for a list item.
///
/// The delete button asks for confirmation with `confirm_message` before
/// sending the DELETE request to `delete_url`.
pub fn edit_delete_action_links(edit_url: &str, delete_url: &str, confirm_message: &str) -> Markup {
    html! {
        a href=(edit_url) class=(LINK_STYLE) { "Edit" }

        button
            type="button"
            hx-delete=(delete_url)
            hx-confirm=(confirm_message)
            class=(BUTTON_DELETE_STYLE)
        {
            "Delete"
        }
    }
}

/// A summary card with a label and a prominent value.
pub fn stat_card(label: &str, value: &str, value_style: &str) -> Markup {
    html! {
        div class=(CARD_STYLE)
        {
            p class="text-sm text-gray-500 dark:text-gray-400" { (label) }
            p class={ "mt-1 text-2xl font-bold tabular-nums " (value_style) } { (value) }
        }
    }
}

/// A labelled form control.
pub fn form_field(label: &str, id: &str, control: Markup) -> Markup {
    html! {
        div
        {
            label for=(id) class=(FORM_LABEL_STYLE) { (label) }
            (control)
        }
    }
}

/// The heading of a list page with a link that opens its create form.
pub fn list_page_header(title: &str, add_label: &str, add_url: &str) -> Markup {
    html! {
        header class="flex justify-between flex-wrap items-end gap-4 mb-6"
        {
            h1 class="text-2xl font-bold" { (title) }

            a
                href=(add_url)
                class="px-4 py-2 rounded text-white bg-blue-500 hover:bg-blue-600 dark:bg-blue-600"
            {
                "+ " (add_label)
            }
        }
    }
}

/// The card the create/edit form of a list page sits in, with a cancel link
/// back to the list.
pub fn form_card(title: &str, cancel_url: &str, form: Markup) -> Markup {
    html! {
        section id="entity-form" class={ "mb-6 " (CARD_STYLE) }
        {
            h2 class="mb-4 text-xl font-semibold" { (title) }

            (form)

            a href=(cancel_url) class={ "block mt-3 " (BUTTON_SECONDARY_STYLE) } { "Cancel" }
        }
    }
}
