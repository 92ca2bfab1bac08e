use tracing::instrument;

use crate::{
    error::Result,
    http::ApiClient,
    models::{NewTransaction, RecentTransactions, Transaction, TransactionType},
};

#[derive(Debug, Clone, Copy)]
pub struct TransactionsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TransactionsApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn path_for(&self, kind: TransactionType) -> &'static str {
        let endpoints = self.client.endpoints();
        match kind {
            TransactionType::Transfer => endpoints.transfer,
            TransactionType::Payment => endpoints.payment,
            TransactionType::Deposit => endpoints.deposit,
        }
    }

    /// Submit a transfer, payment or deposit, depending on its
    /// `transaction_type`.
    #[instrument(skip(self, transaction), fields(kind = ?transaction.transaction_type))]
    pub async fn submit(&self, transaction: &NewTransaction) -> Result<Transaction> {
        let path = self.path_for(transaction.transaction_type);
        self.client.post(path, transaction).await
    }

    /// One page of the account's history, newest first.
    pub async fn recent(&self, account_id: &str, page: u32, size: u32) -> Result<RecentTransactions> {
        let path = format!(
            "{}/{}?page={}&size={}",
            self.client.endpoints().recent_transactions,
            account_id,
            page,
            size
        );
        self.client.get(&path).await
    }
}
