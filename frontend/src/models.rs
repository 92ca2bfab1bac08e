//! Request and response shapes of the banking API.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Rub,
    Usd,
    Eur,
    Cny,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Self::Rub, Self::Usd, Self::Eur, Self::Cny];

    pub fn code(self) -> &'static str {
        match self {
            Self::Rub => "RUB",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Cny => "CNY",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Rub => "₽",
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Cny => "¥",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Rub => "Russian ruble",
            Self::Usd => "US dollar",
            Self::Eur => "Euro",
            Self::Cny => "Chinese yuan",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    Debit,
    Credit,
}

impl AccountType {
    pub const ALL: [AccountType; 2] = [Self::Debit, Self::Credit];

    pub fn code(self) -> &'static str {
        match self {
            Self::Debit => "DEBIT",
            Self::Credit => "CREDIT",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Debit => "Debit",
            Self::Credit => "Credit",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Payment,
    Transfer,
    Deposit,
}

impl TransactionType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Payment => "Payment",
            Self::Transfer => "Transfer",
            Self::Deposit => "Deposit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// ISO 8601 date-time
    pub birthdate: String,
    pub password: String,
}

impl NewUser {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    pub currency: Currency,
    pub account_type: AccountType,
}

impl Default for NewAccount {
    fn default() -> Self {
        Self {
            currency: Currency::Rub,
            account_type: AccountType::Debit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Login response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthToken {
    #[serde(default)]
    pub token: String,
}

/// An account as embedded in a profile or fetched by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub account_id: String,
    pub balance: f64,
    pub currency: Currency,
    pub account_type: AccountType,
}

/// An account as returned on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    pub account_id: String,
    pub user_id: String,
    pub balance: f64,
    pub currency: Currency,
    pub account_type: AccountType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub birthdate: String,
    #[serde(default)]
    pub accounts: Vec<AccountSummary>,
}

impl UserProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn account(&self, account_id: &str) -> Option<&AccountSummary> {
        self.accounts.iter().find(|a| a.account_id == account_id)
    }
}

/// A transaction as returned on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_type: TransactionType,
    pub transaction_id: String,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub receiver_id: Option<String>,
    pub amount: f64,
    pub currency: Currency,
    pub transaction_date: String,
    #[serde(default)]
    pub comment: Option<String>,
}

/// A transaction as listed in an account's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionEntry {
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub receiver_name: Option<String>,
    pub amount: f64,
    pub currency: Currency,
    pub transaction_date: String,
    #[serde(default)]
    pub comment: Option<String>,
}

impl TransactionEntry {
    /// Who is on the other side, as far as the history tells.
    pub fn counterparty(&self) -> Option<&str> {
        match self.transaction_type {
            TransactionType::Deposit => self.sender_name.as_deref(),
            TransactionType::Payment | TransactionType::Transfer => {
                self.receiver_name.as_deref()
            }
        }
    }
}

/// One page of an account's history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentTransactions {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub transactions: Vec<TransactionEntry>,
}

impl RecentTransactions {
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.size))
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) + 1 < self.total_pages()
    }

    /// Index of the following page, if there is one.
    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }

    pub fn previous_page(&self) -> Option<u32> {
        self.page.checked_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_case::test_case;

    use super::*;

    #[test_case(25, 10 => 3)]
    #[test_case(20, 10 => 2)]
    #[test_case(0, 10 => 0)]
    #[test_case(1, 5 => 1)]
    #[test_case(7, 0 => 0; "zero size")]
    fn total_pages(total: u64, size: u32) -> u64 {
        RecentTransactions {
            total,
            size,
            ..RecentTransactions::default()
        }
        .total_pages()
    }

    #[test]
    fn page_navigation_bounds() {
        let mut page = RecentTransactions {
            total: 25,
            size: 10,
            ..RecentTransactions::default()
        };
        assert_eq!(page.previous_page(), None);
        assert!(page.has_next());

        page.page = 2;
        assert_eq!(page.previous_page(), Some(1));
        assert!(!page.has_next());
    }

    #[test_case(0, 25 => (None, Some(1)); "first page")]
    #[test_case(1, 25 => (Some(0), Some(2)); "middle page")]
    #[test_case(2, 25 => (Some(1), None); "last page")]
    #[test_case(0, 0 => (None, None); "empty history")]
    fn neighbouring_pages(page: u32, total: u64) -> (Option<u32>, Option<u32>) {
        let history = RecentTransactions {
            total,
            page,
            size: 10,
            ..RecentTransactions::default()
        };
        (history.previous_page(), history.next_page())
    }

    #[test]
    fn optional_transaction_fields_are_omitted() {
        let deposit = NewTransaction {
            transaction_type: TransactionType::Deposit,
            amount: 150.0,
            currency: Currency::Usd,
            sender_id: None,
            receiver_id: Some("acc-1".to_string()),
            comment: None,
        };

        assert_eq!(
            serde_json::to_value(&deposit).unwrap(),
            json!({
                "transaction_type": "DEPOSIT",
                "amount": 150.0,
                "currency": "USD",
                "receiver_id": "acc-1",
            })
        );
    }

    #[test]
    fn profile_with_embedded_accounts() {
        let raw = json!({
            "user_id": "u-1",
            "first_name": "Ivan",
            "last_name": "Petrov",
            "email": "ivan@example.com",
            "birthdate": "1990-01-01T00:00:00.000Z",
            "accounts": [
                {"account_id": "a-1", "balance": 1200.5, "currency": "RUB", "account_type": "DEBIT"},
                {"account_id": "a-2", "balance": 0, "currency": "CNY", "account_type": "CREDIT"}
            ]
        });

        let profile: UserProfile = serde_json::from_value(raw).unwrap();
        assert_eq!(profile.full_name(), "Ivan Petrov");
        assert_eq!(profile.accounts.len(), 2);
        assert_eq!(profile.account("a-2").unwrap().currency, Currency::Cny);
        assert!(profile.account("a-3").is_none());
    }

    #[test]
    fn counterparty_depends_on_direction() {
        let entry = TransactionEntry {
            transaction_type: TransactionType::Deposit,
            sender_name: Some("Employer".to_string()),
            receiver_name: Some("Ivan".to_string()),
            amount: 10.0,
            currency: Currency::Eur,
            transaction_date: "2024-03-01T10:00:00Z".to_string(),
            comment: None,
        };
        assert_eq!(entry.counterparty(), Some("Employer"));

        let transfer = TransactionEntry {
            transaction_type: TransactionType::Transfer,
            ..entry
        };
        assert_eq!(transfer.counterparty(), Some("Ivan"));
    }

    #[test]
    fn currency_codes_round_trip_through_lookup() {
        for currency in Currency::ALL {
            assert_eq!(Currency::from_code(currency.code()), Some(currency));
        }
        assert_eq!(AccountType::from_code("CREDIT"), Some(AccountType::Credit));
        assert_eq!(Currency::from_code("GBP"), None);
    }
}
