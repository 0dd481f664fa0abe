use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub type AccountId = i64;

/// The kind of account money is held in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Savings,
    Checking,
    CreditCard,
    Investment,
    Cash,
}

impl AccountType {
    /// All account types in the order they are offered in forms.
    pub const ALL: [AccountType; 5] = [
        AccountType::Savings,
        AccountType::Checking,
        AccountType::CreditCard,
        AccountType::Investment,
        AccountType::Cash,
    ];

    /// The value used on the wire and in form fields, e.g. "CREDIT_CARD".
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "SAVINGS",
            AccountType::Checking => "CHECKING",
            AccountType::CreditCard => "CREDIT_CARD",
            AccountType::Investment => "INVESTMENT",
            AccountType::Cash => "CASH",
        }
    }

    /// The human readable name, e.g. "Credit Card".
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Savings => "Savings",
            AccountType::Checking => "Checking",
            AccountType::CreditCard => "Credit Card",
            AccountType::Investment => "Investment",
            AccountType::Cash => "Cash",
        }
    }
}

impl Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named place money is held, e.g. a bank account or credit card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// The current balance, negative for money owed.
    pub balance: f64,
}

/// The data sent to the API to create or update an account.
///
/// Also used as the form data submitted from the accounts page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub balance: f64,
}

impl From<&Account> for AccountRequest {
    fn from(account: &Account) -> Self {
        Self {
            name: account.name.clone(),
            account_type: account.account_type,
            balance: account.balance,
        }
    }
}

/// The sum of the balances of all of the user's accounts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalBalance {
    #[serde(default)]
    pub total_balance: f64,
}

#[cfg(test)]
mod account_serde_tests {
    use serde_json::json;

    use super::{Account, AccountRequest, AccountType, TotalBalance};

    #[test]
    fn decodes_account_from_api_json() {
        let value = json!({
            "id": 3,
            "name": "Visa",
            "type": "CREDIT_CARD",
            "balance": -420.5,
            "currency": "INR"
        });

        let account: Account = serde_json::from_value(value).unwrap();

        assert_eq!(
            account,
            Account {
                id: 3,
                name: "Visa".to_owned(),
                account_type: AccountType::CreditCard,
                balance: -420.5,
            }
        );
    }

    #[test]
    fn account_request_uses_type_field() {
        let request = AccountRequest {
            name: "Wallet".to_owned(),
            account_type: AccountType::Cash,
            balance: 20.0,
        };

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({ "name": "Wallet", "type": "CASH", "balance": 20.0 })
        );
    }

    #[test]
    fn account_request_parses_from_form() {
        let form = "name=Main+Checking&type=CHECKING&balance=1234.56";

        let request: AccountRequest = serde_html_form::from_str(form).unwrap();

        assert_eq!(request.account_type, AccountType::Checking);
        assert_eq!(request.balance, 1234.56);
    }

    #[test]
    fn missing_total_balance_defaults_to_zero() {
        let total: TotalBalance = serde_json::from_str("{}").unwrap();

        assert_eq!(total.total_balance, 0.0);
    }

    #[test]
    fn as_str_matches_serde_name() {
        for account_type in AccountType::ALL {
            let serialized = serde_json::to_string(&account_type).unwrap();

            assert_eq!(serialized, format!("\"{}\"", account_type.as_str()));
        }
    }
}
