//! One thin module per resource of the banking API.

mod accounts;
mod auth;
mod transactions;

pub use accounts::AccountsApi;
pub use auth::AuthApi;
pub use transactions::TransactionsApi;

use crate::http::ApiClient;

impl ApiClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn accounts(&self) -> AccountsApi<'_> {
        AccountsApi::new(self)
    }

    pub fn transactions(&self) -> TransactionsApi<'_> {
        TransactionsApi::new(self)
    }
}
