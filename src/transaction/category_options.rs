//! The `<option>` list of the category select in the transaction form, which
//! is swapped out via htmx whenever the transaction type changes.

use axum::{extract::Query, response::IntoResponse};
use maud::{Markup, html};
use serde::Deserialize;

use crate::transaction::{TransactionType, category::categories_for};

/// The suggested categories for `transaction_type` with `selected` chosen.
///
/// A category the API knows about but that is not one of the suggestions,
/// e.g. from an older transaction, is kept as an extra option so editing does
/// not silently change it.
pub fn category_options(transaction_type: TransactionType, selected: &str) -> Markup {
    let categories = categories_for(transaction_type);
    let is_custom = !selected.is_empty() && !categories.contains(&selected);

    html! {
        option value="" disabled selected[selected.is_empty()] { "Select Category" }

        @for category in categories {
            option value=(category) selected[*category == selected] { (category) }
        }

        @if is_custom {
            option value=(selected) selected { (selected) }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
}

/// Responds with the category options for the `type` query parameter,
/// defaulting to expense categories.
pub async fn get_category_options(Query(query): Query<CategoryQuery>) -> impl IntoResponse {
    category_options(
        query.transaction_type.unwrap_or(TransactionType::Expense),
        "",
    )
}
