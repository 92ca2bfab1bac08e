use tracing::instrument;

use crate::{
    error::Result,
    http::ApiClient,
    models::{AccountSummary, BankAccount, NewAccount},
};

#[derive(Debug, Clone, Copy)]
pub struct AccountsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AccountsApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Open a new account for the signed-in user.
    #[instrument(skip(self))]
    pub async fn create(&self, account: &NewAccount) -> Result<BankAccount> {
        self.client
            .post(self.client.endpoints().create_account, account)
            .await
    }

    // no page looks a single account up yet; profiles embed their accounts
    #[allow(dead_code)]
    pub async fn get(&self, account_id: &str) -> Result<AccountSummary> {
        let path = format!("{}/{}", self.client.endpoints().account, account_id);
        self.client.get(&path).await
    }

    #[allow(dead_code)]
    pub async fn for_user(&self, user_id: &str) -> Result<Vec<AccountSummary>> {
        let path = format!("{}/{}", self.client.endpoints().user_accounts, user_id);
        self.client.get(&path).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::{
        http::Method,
        models::{AccountType, Currency, NewAccount},
        testing::mock_client,
    };

    #[tokio::test]
    async fn create_posts_currency_and_type() {
        let (client, transport, _) = mock_client();
        transport.respond(
            Method::Post,
            "/bank-account/create",
            200,
            r#"{"account_id":"a-9","user_id":"u-1","balance":0,"currency":"EUR","account_type":"CREDIT"}"#,
        );

        let account = client
            .accounts()
            .create(&NewAccount {
                currency: Currency::Eur,
                account_type: AccountType::Credit,
            })
            .await
            .unwrap();
        assert_eq!(account.account_id, "a-9");

        let body: Value =
            serde_json::from_str(transport.last_request().unwrap().body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"currency": "EUR", "account_type": "CREDIT"}));
    }

    #[tokio::test]
    async fn lookups_by_account_and_user() {
        let (client, transport, _) = mock_client();
        transport.respond(
            Method::Get,
            "/bank-account/get/a-1",
            200,
            r#"{"account_id":"a-1","balance":10.5,"currency":"USD","account_type":"DEBIT"}"#,
        );
        transport.respond(Method::Get, "/user/get-accounts/u-1", 200, "[]");

        let account = client.accounts().get("a-1").await.unwrap();
        assert_eq!(account.currency, Currency::Usd);
        assert!(client.accounts().for_user("u-1").await.unwrap().is_empty());
    }
}
