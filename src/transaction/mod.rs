//! Transactions: the data model exchanged with the API, the suggested
//! categories, filtering, and the transactions page with its endpoints.

mod category;
mod category_options;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod filter;
mod transactions_page;

pub use category::category_color;
pub use category_options::{category_options, get_category_options};
pub use core::{DateRangeQuery, Transaction, TransactionId, TransactionRequest, TransactionType};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use transactions_page::get_transactions_page;
