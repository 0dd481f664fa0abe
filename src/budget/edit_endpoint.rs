//! Defines the endpoint for updating a budget.

use axum::{
    Extension, Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    auth::Session,
    budget::{BudgetId, BudgetRequest, budgets_page::BudgetState},
    endpoints,
};

pub async fn edit_budget_endpoint(
    State(state): State<BudgetState>,
    Extension(session): Extension<Session>,
    Path(budget_id): Path<BudgetId>,
    Form(form): Form<BudgetRequest>,
) -> Response {
    let request = BudgetRequest {
        category: form.category.trim().to_owned(),
        ..form
    };

    match state
        .api_client
        .update_budget(budget_id, &request, &session)
        .await
    {
        Ok(_) => (
            HxRedirect(endpoints::BUDGETS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => Error::action("Failed to save budget", error).into_alert_response(),
    }
}
