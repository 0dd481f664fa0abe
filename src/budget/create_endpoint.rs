//! Defines the endpoint for creating a budget.

use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    auth::Session,
    budget::{BudgetRequest, budgets_page::BudgetState},
    endpoints,
};

/// A route handler for creating a budget for a category and month.
pub async fn create_budget_endpoint(
    State(state): State<BudgetState>,
    Extension(session): Extension<Session>,
    Form(form): Form<BudgetRequest>,
) -> Response {
    let request = BudgetRequest {
        category: form.category.trim().to_owned(),
        ..form
    };

    match state.api_client.create_budget(&request, &session).await {
        Ok(budget) => {
            tracing::info!(
                "Created budget {} for {} in {}",
                budget.id,
                budget.category,
                budget.month
            );
            (
                HxRedirect(endpoints::BUDGETS_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => Error::action("Failed to save budget", error).into_alert_response(),
    }
}
