//! An in-memory stand-in for the finance tracker REST API.
//!
//! It serves the same routes and JSON shapes as the real API on an ephemeral
//! local port, checks the bearer token, and keeps its data in memory for the
//! lifetime of the test.

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use time::{Month, OffsetDateTime};

use crate::{
    AppState,
    account::{Account, AccountId, AccountRequest, TotalBalance},
    api::{ApiClient, LogInRequest, MessageResponse, RegisterRequest},
    auth::Session,
    budget::{Budget, BudgetId, BudgetRequest, MonthKey},
    transaction::{
        DateRangeQuery, Transaction, TransactionId, TransactionRequest, TransactionType,
    },
};

pub(crate) const TEST_TOKEN: &str = "test-token";
pub(crate) const TEST_EMAIL: &str = "asha@example.com";
pub(crate) const TEST_PASSWORD: &str = "correct horse";

/// The session the mock API hands out, and accepts the token of.
pub(crate) fn test_session() -> Session {
    Session {
        token: TEST_TOKEN.to_owned(),
        id: Some(1),
        name: "Asha".to_owned(),
        email: TEST_EMAIL.to_owned(),
        role: Some("USER".to_owned()),
        token_type: Some("Bearer".to_owned()),
    }
}

#[derive(Default)]
struct MockData {
    last_id: i64,
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
}

impl MockData {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    /// Budgets with their spend computed from the expenses recorded so far.
    fn budget_with_spend(&self, budget: &Budget) -> Budget {
        let spent = self
            .transactions
            .iter()
            .filter(|transaction| {
                transaction.transaction_type == TransactionType::Expense
                    && transaction.category == budget.category
                    && budget.month.contains(transaction.transaction_date)
            })
            .map(|transaction| transaction.amount)
            .sum();

        Budget {
            spent,
            ..budget.clone()
        }
    }

    fn budgets_where(&self, predicate: impl Fn(&Budget) -> bool) -> Vec<Budget> {
        self.budgets
            .iter()
            .filter(|budget| predicate(budget))
            .map(|budget| self.budget_with_spend(budget))
            .collect()
    }
}

type Db = Arc<Mutex<MockData>>;
type MockResult<T> = Result<Json<T>, (StatusCode, Json<MessageResponse>)>;

fn error(status: StatusCode, message: &str) -> (StatusCode, Json<MessageResponse>) {
    (
        status,
        Json(MessageResponse {
            message: message.to_owned(),
        }),
    )
}

fn deleted(what: &str) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: format!("{what} deleted successfully"),
    })
}

/// A running mock API server.
pub(crate) struct MockApi {
    base_url: String,
}

impl MockApi {
    /// Start a mock API server on an ephemeral port.
    pub(crate) async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Could not bind mock API listener");
        let address = listener
            .local_addr()
            .expect("Could not get mock API address");

        tokio::spawn(async move {
            axum::serve(listener, router())
                .await
                .expect("Mock API server failed");
        });

        Self {
            base_url: format!("http://{address}"),
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url)
    }

    /// App state for a web client that talks to this mock API.
    pub(crate) fn app_state(&self) -> AppState {
        AppState::new(&self.base_url, "mock api secret", "Etc/UTC")
            .expect("Could not create app state")
    }
}

fn router() -> Router {
    let db = Db::default();

    let resources = Router::new()
        .route("/api/accounts", get(list_accounts).post(create_account))
        .route("/api/accounts/total-balance", get(total_balance))
        .route(
            "/api/accounts/{id}",
            get(get_account).put(update_account).delete(delete_account),
        )
        .route(
            "/api/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/api/transactions/date-range",
            get(transactions_by_date_range),
        )
        .route(
            "/api/transactions/account/{id}",
            get(transactions_by_account),
        )
        .route(
            "/api/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
        .route("/api/budgets", get(list_budgets).post(create_budget))
        .route("/api/budgets/current", get(current_budgets))
        .route(
            "/api/budgets/month/{month}/year/{year}",
            get(budgets_by_month_year),
        )
        .route(
            "/api/budgets/{id}",
            get(get_budget).put(update_budget).delete(delete_budget),
        )
        .route_layer(middleware::from_fn(require_token));

    Router::new()
        .route("/api/auth/login", post(log_in))
        .route("/api/auth/register", post(register))
        .merge(resources)
        .with_state(db)
}

async fn require_token(request: Request, next: Next) -> Response {
    let want = format!("Bearer {TEST_TOKEN}");
    let authorised = request
        .headers()
        .get(AUTHORIZATION)
        .is_some_and(|header| header.as_bytes() == want.as_bytes());

    if !authorised {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }

    next.run(request).await
}

async fn log_in(Json(request): Json<LogInRequest>) -> MockResult<Session> {
    if request.email == TEST_EMAIL && request.password == TEST_PASSWORD {
        Ok(Json(test_session()))
    } else {
        Err(error(StatusCode::UNAUTHORIZED, "Invalid email or password"))
    }
}

async fn register(Json(request): Json<RegisterRequest>) -> MockResult<Session> {
    if request.email == TEST_EMAIL {
        return Err(error(StatusCode::BAD_REQUEST, "Email is already registered"));
    }

    Ok(Json(Session {
        name: request.name,
        email: request.email,
        id: Some(2),
        ..test_session()
    }))
}

async fn list_accounts(State(db): State<Db>) -> Json<Vec<Account>> {
    Json(db.lock().unwrap().accounts.clone())
}

async fn total_balance(State(db): State<Db>) -> Json<TotalBalance> {
    let total_balance = db
        .lock()
        .unwrap()
        .accounts
        .iter()
        .map(|account| account.balance)
        .sum();

    Json(TotalBalance { total_balance })
}

async fn create_account(
    State(db): State<Db>,
    Json(request): Json<AccountRequest>,
) -> (StatusCode, Json<Account>) {
    let mut data = db.lock().unwrap();
    let account = Account {
        id: data.next_id(),
        name: request.name,
        account_type: request.account_type,
        balance: request.balance,
    };
    data.accounts.push(account.clone());

    (StatusCode::CREATED, Json(account))
}

async fn get_account(State(db): State<Db>, Path(id): Path<AccountId>) -> MockResult<Account> {
    db.lock()
        .unwrap()
        .accounts
        .iter()
        .find(|account| account.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Account not found"))
}

async fn update_account(
    State(db): State<Db>,
    Path(id): Path<AccountId>,
    Json(request): Json<AccountRequest>,
) -> MockResult<Account> {
    let mut data = db.lock().unwrap();
    let account = data
        .accounts
        .iter_mut()
        .find(|account| account.id == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Account not found"))?;

    account.name = request.name;
    account.account_type = request.account_type;
    account.balance = request.balance;

    Ok(Json(account.clone()))
}

async fn delete_account(
    State(db): State<Db>,
    Path(id): Path<AccountId>,
) -> MockResult<MessageResponse> {
    let mut data = db.lock().unwrap();
    let count = data.accounts.len();
    data.accounts.retain(|account| account.id != id);

    if data.accounts.len() == count {
        return Err(error(StatusCode::NOT_FOUND, "Account not found"));
    }

    Ok(deleted("Account"))
}

async fn list_transactions(State(db): State<Db>) -> Json<Vec<Transaction>> {
    Json(db.lock().unwrap().transactions.clone())
}

async fn transactions_by_account(
    State(db): State<Db>,
    Path(account_id): Path<AccountId>,
) -> Json<Vec<Transaction>> {
    let transactions = db
        .lock()
        .unwrap()
        .transactions
        .iter()
        .filter(|transaction| {
            transaction
                .account
                .as_ref()
                .is_some_and(|account| account.id == account_id)
        })
        .cloned()
        .collect();

    Json(transactions)
}

async fn transactions_by_date_range(
    State(db): State<Db>,
    Query(range): Query<DateRangeQuery>,
) -> Json<Vec<Transaction>> {
    let transactions = db
        .lock()
        .unwrap()
        .transactions
        .iter()
        .filter(|transaction| {
            (range.start_date..=range.end_date).contains(&transaction.transaction_date)
        })
        .cloned()
        .collect();

    Json(transactions)
}

fn transaction_from_request(
    data: &MockData,
    id: TransactionId,
    request: TransactionRequest,
) -> Result<Transaction, (StatusCode, Json<MessageResponse>)> {
    let account = data
        .accounts
        .iter()
        .find(|account| account.id == request.account_id)
        .cloned()
        .ok_or_else(|| error(StatusCode::BAD_REQUEST, "Account not found"))?;

    Ok(Transaction {
        id,
        transaction_type: request.transaction_type,
        amount: request.amount,
        category: request.category,
        description: request.description,
        transaction_date: request.transaction_date,
        created_at: Some("2025-01-01T00:00:00".to_owned()),
        account: Some(account),
    })
}

async fn create_transaction(
    State(db): State<Db>,
    Json(request): Json<TransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), (StatusCode, Json<MessageResponse>)> {
    let mut data = db.lock().unwrap();
    let id = data.next_id();
    let transaction = transaction_from_request(&data, id, request)?;
    data.transactions.push(transaction.clone());

    Ok((StatusCode::CREATED, Json(transaction)))
}

async fn get_transaction(
    State(db): State<Db>,
    Path(id): Path<TransactionId>,
) -> MockResult<Transaction> {
    db.lock()
        .unwrap()
        .transactions
        .iter()
        .find(|transaction| transaction.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Transaction not found"))
}

async fn update_transaction(
    State(db): State<Db>,
    Path(id): Path<TransactionId>,
    Json(request): Json<TransactionRequest>,
) -> MockResult<Transaction> {
    let mut data = db.lock().unwrap();
    let position = data
        .transactions
        .iter()
        .position(|transaction| transaction.id == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Transaction not found"))?;

    let transaction = transaction_from_request(&data, id, request)?;
    data.transactions[position] = transaction.clone();

    Ok(Json(transaction))
}

async fn delete_transaction(
    State(db): State<Db>,
    Path(id): Path<TransactionId>,
) -> MockResult<MessageResponse> {
    let mut data = db.lock().unwrap();
    let count = data.transactions.len();
    data.transactions.retain(|transaction| transaction.id != id);

    if data.transactions.len() == count {
        return Err(error(StatusCode::NOT_FOUND, "Transaction not found"));
    }

    Ok(deleted("Transaction"))
}

async fn list_budgets(State(db): State<Db>) -> Json<Vec<Budget>> {
    Json(db.lock().unwrap().budgets_where(|_| true))
}

async fn current_budgets(State(db): State<Db>) -> Json<Vec<Budget>> {
    let this_month = MonthKey::of(OffsetDateTime::now_utc().date());

    Json(
        db.lock()
            .unwrap()
            .budgets_where(|budget| budget.month == this_month),
    )
}

async fn budgets_by_month_year(
    State(db): State<Db>,
    Path((month, year)): Path<(u8, i32)>,
) -> MockResult<Vec<Budget>> {
    let month = Month::try_from(month)
        .map_err(|_| error(StatusCode::BAD_REQUEST, "Invalid month"))?;
    let key = MonthKey::new(year, month);

    Ok(Json(
        db.lock().unwrap().budgets_where(|budget| budget.month == key),
    ))
}

async fn create_budget(
    State(db): State<Db>,
    Json(request): Json<BudgetRequest>,
) -> (StatusCode, Json<Budget>) {
    let mut data = db.lock().unwrap();
    let budget = Budget {
        id: data.next_id(),
        category: request.category,
        amount: request.amount,
        spent: 0.0,
        month: request.month,
    };
    data.budgets.push(budget.clone());
    let budget = data.budget_with_spend(&budget);

    (StatusCode::CREATED, Json(budget))
}

async fn get_budget(State(db): State<Db>, Path(id): Path<BudgetId>) -> MockResult<Budget> {
    let data = db.lock().unwrap();

    data.budgets
        .iter()
        .find(|budget| budget.id == id)
        .map(|budget| Json(data.budget_with_spend(budget)))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Budget not found"))
}

async fn update_budget(
    State(db): State<Db>,
    Path(id): Path<BudgetId>,
    Json(request): Json<BudgetRequest>,
) -> MockResult<Budget> {
    let mut data = db.lock().unwrap();
    let budget = data
        .budgets
        .iter_mut()
        .find(|budget| budget.id == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Budget not found"))?;

    budget.category = request.category;
    budget.amount = request.amount;
    budget.month = request.month;
    let budget = budget.clone();

    Ok(Json(data.budget_with_spend(&budget)))
}

async fn delete_budget(
    State(db): State<Db>,
    Path(id): Path<BudgetId>,
) -> MockResult<MessageResponse> {
    let mut data = db.lock().unwrap();
    let count = data.budgets.len();
    data.budgets.retain(|budget| budget.id != id);

    if data.budgets.len() == count {
        return Err(error(StatusCode::NOT_FOUND, "Budget not found"));
    }

    Ok(deleted("Budget"))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        account::{AccountRequest, AccountType},
        budget::{BudgetRequest, MonthKey},
        test_utils::{MockApi, test_session},
        transaction::{TransactionRequest, TransactionType},
    };

    #[tokio::test]
    async fn budget_spend_counts_matching_expenses_only() {
        let api = MockApi::spawn().await;
        let client = api.client();
        let session = test_session();
        let account = client
            .create_account(
                &AccountRequest {
                    name: "Main".to_owned(),
                    account_type: AccountType::Savings,
                    balance: 0.0,
                },
                &session,
            )
            .await
            .unwrap();
        let october = MonthKey::of(date!(2025 - 10 - 01));
        let budget = client
            .create_budget(
                &BudgetRequest {
                    category: "Food".to_owned(),
                    amount: 1000.0,
                    month: october,
                },
                &session,
            )
            .await
            .unwrap();

        for (transaction_type, category, amount, transaction_date) in [
            (TransactionType::Expense, "Food", 300.0, date!(2025 - 10 - 02)),
            (TransactionType::Expense, "Food", 50.0, date!(2025 - 09 - 30)),
            (TransactionType::Expense, "Bills", 70.0, date!(2025 - 10 - 02)),
            (TransactionType::Income, "Food", 500.0, date!(2025 - 10 - 02)),
        ] {
            client
                .create_transaction(
                    &TransactionRequest {
                        account_id: account.id,
                        transaction_type,
                        category: category.to_owned(),
                        amount,
                        description: None,
                        transaction_date,
                    },
                    &session,
                )
                .await
                .unwrap();
        }

        let budget = client.get_budget_by_id(budget.id, &session).await.unwrap();
        assert_eq!(budget.spent, 300.0);
    }
}
