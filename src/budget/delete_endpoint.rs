//! Defines the endpoint for deleting a budget.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    auth::Session,
    budget::{BudgetId, budgets_page::BudgetState},
    endpoints,
};

/// A route handler for deleting a budget.
///
/// On success the client reloads the budgets page, otherwise an error alert
/// is shown.
pub async fn delete_budget_endpoint(
    State(state): State<BudgetState>,
    Extension(session): Extension<Session>,
    Path(budget_id): Path<BudgetId>,
) -> Response {
    match state.api_client.delete_budget(budget_id, &session).await {
        Ok(()) => {
            tracing::info!("Deleted budget {budget_id}");
            (HxRedirect(endpoints::BUDGETS_VIEW.to_owned()), StatusCode::OK).into_response()
        }
        Err(error) => Error::action("Failed to delete budget", error).into_alert_response(),
    }
}
