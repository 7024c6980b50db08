// User account service.
// The capability the account actions depend on, and its HTTP implementation.

use async_trait::async_trait;
use serde_json::json;

use crate::error::AccountError;

use super::client::ApiClient;
use super::types::UserAccount;

const USER_ACCOUNTS: &str = "user-accounts";

/// Remote operations on user accounts.
///
/// `Error` is whatever the implementation fails with; action creators forward
/// it to the reducer without inspecting it.
#[async_trait]
pub trait UserAccountService: Send + Sync {
    type Error: Send;

    async fn get_user_account(&self, username: &str) -> Result<UserAccount, Self::Error>;

    async fn save_user_account(&self, username: &str) -> Result<UserAccount, Self::Error>;
}

/// [`UserAccountService`] backed by the account REST API.
#[derive(Debug, Clone)]
pub struct HttpUserAccountService {
    client: ApiClient,
}

impl HttpUserAccountService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

#[async_trait]
impl UserAccountService for HttpUserAccountService {
    type Error = AccountError;

    /// `GET /user-accounts/{username}`
    async fn get_user_account(&self, username: &str) -> Result<UserAccount, AccountError> {
        let url = self.client.endpoint(&[USER_ACCOUNTS, username])?;
        self.client.get_json(&url).await
    }

    /// `PUT /user-accounts/{username}` with `{ "username": username }`
    async fn save_user_account(&self, username: &str) -> Result<UserAccount, AccountError> {
        let url = self.client.endpoint(&[USER_ACCOUNTS, username])?;
        self.client
            .put_json(&url, &json!({ "username": username }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn service_for(server: &MockServer, token: Option<&str>) -> HttpUserAccountService {
        HttpUserAccountService::new(ApiClient::new(&server.uri(), token).unwrap())
    }

    #[tokio::test]
    async fn test_get_user_account() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user-accounts/test-user"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"username":"test-user","plan":"pro"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let account = service_for(&server, None)
            .get_user_account("test-user")
            .await
            .unwrap();

        assert_eq!(account.username, "test-user");
        assert_eq!(account.extra.get("plan"), Some(&json!("pro")));
    }

    #[tokio::test]
    async fn test_save_user_account_sends_username() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/user-accounts/test-user"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"username":"test-user"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let account = service_for(&server, None)
            .save_user_account("test-user")
            .await
            .unwrap();

        assert_eq!(account, UserAccount::new("test-user"));
        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body, json!({ "username": "test-user" }));
    }

    #[tokio::test]
    async fn test_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"username":"a"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let account = service_for(&server, Some("secret"))
            .get_user_account("a")
            .await
            .unwrap();

        assert_eq!(account, UserAccount::new("a"));
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        assert!(matches!(
            service_for(&server, Some("bad"))
                .get_user_account("test-user")
                .await,
            Err(AccountError::Unauthorized)
        ));
    }
}
