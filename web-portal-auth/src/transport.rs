use async_trait::async_trait;
use web_portal_common::{AuthenticatedUser, Credentials};

use crate::error::AuthResult;

/// Seam between the login form and the authentication backend. Implementors issue exactly one
/// request per call and return the authenticated user for a successful (2xx) response with a JSON
/// body. Any other outcome is an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait(?Send)]
pub trait AuthTransport {
    async fn login(&self, credentials: &Credentials) -> AuthResult<AuthenticatedUser>;
}

#[cfg(feature = "native")]
pub use native::ReqwestTransport;

#[cfg(feature = "native")]
mod native {
    use async_trait::async_trait;
    use log::debug;
    use reqwest::{Client, Response};
    use web_portal_common::{AuthenticatedUser, Credentials};

    use super::AuthTransport;
    use crate::{
        config::AuthConfig,
        error::{AuthError, AuthResult},
    };

    /// [AuthTransport] backed by a [reqwest] client with a cookie store, so repeated logins through
    /// the same transport reuse the session cookie set by the backend.
    #[derive(Clone)]
    pub struct ReqwestTransport {
        client: Client,
        login_url: String,
    }

    impl ReqwestTransport {
        /// Create a transport targeting the login endpoint of the `config`
        /// # Errors
        /// This function will return an error if the underlining http client cannot be built
        pub fn new(config: &AuthConfig) -> AuthResult<Self> {
            let client = Client::builder().cookie_store(true).build()?;
            Ok(Self {
                client,
                login_url: config.login_url(),
            })
        }
    }

    #[async_trait(?Send)]
    impl AuthTransport for ReqwestTransport {
        async fn login(&self, credentials: &Credentials) -> AuthResult<AuthenticatedUser> {
            debug!("POST {}", self.login_url);
            let response = self
                .client
                .post(&self.login_url)
                .json(credentials)
                .send()
                .await?;
            process_response(response).await
        }
    }

    async fn process_response(response: Response) -> AuthResult<AuthenticatedUser> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::rejected(
                status.as_u16(),
                &body,
                status.canonical_reason().unwrap_or_default(),
            ));
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

}
