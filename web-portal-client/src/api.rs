use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use web_portal_auth::{
    error::{AuthError, AuthResult},
    transport::AuthTransport,
};
use web_portal_common::{AuthenticatedUser, Credentials, LOGIN_PATH};

/// Browser side [AuthTransport] using the fetch API. An empty `url` targets the origin that served
/// the page.
#[derive(Clone, Copy)]
pub struct AuthApi {
    url: &'static str,
}

impl AuthApi {
    pub const fn new(url: &'static str) -> Self {
        Self { url }
    }

    fn login_url(&self) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), LOGIN_PATH)
    }
}

#[async_trait(?Send)]
impl AuthTransport for AuthApi {
    async fn login(&self, credentials: &Credentials) -> AuthResult<AuthenticatedUser> {
        let url = self.login_url();
        let response = Request::post(&url)
            .json(credentials)
            .map_err(fetch_error)?
            .send()
            .await
            .map_err(fetch_error)?;
        parse_response(response).await
    }
}

fn fetch_error(error: gloo_net::Error) -> AuthError {
    AuthError::Transport(error.to_string())
}

async fn parse_response(response: Response) -> AuthResult<AuthenticatedUser> {
    // ensure we've got 2xx status
    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(AuthError::rejected(
            response.status(),
            &body,
            &response.status_text(),
        ));
    }
    let body = response.text().await.map_err(fetch_error)?;
    Ok(serde_json::from_str(&body)?)
}
