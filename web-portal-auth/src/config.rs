use std::env::{self, VarError};

use web_portal_common::LOGIN_PATH;

use crate::{error::AuthResult, i18n::Locale};

/// Environment variable holding the base url of the inventory backend
pub const API_URL_VAR: &str = "INVENTORY_API_URL";
/// Environment variable holding the locale code of the login page
pub const LOCALE_VAR: &str = "INVENTORY_LOCALE";
const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Settings needed to reach the authentication backend and render the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    api_url: String,
    locale: Locale,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, Locale::default())
    }
}

impl AuthConfig {
    pub fn new<S: Into<String>>(api_url: S, locale: Locale) -> Self {
        let api_url: String = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_owned(),
            locale,
        }
    }

    /// Read the config from the `INVENTORY_API_URL` and `INVENTORY_LOCALE` environment variables,
    /// falling back to defaults for missing variables.
    /// # Errors
    /// This function will return an error if a variable is not valid unicode or the locale is not
    /// supported
    pub fn from_env() -> AuthResult<Self> {
        let api_url = optional_var(API_URL_VAR)?.unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let locale = match optional_var(LOCALE_VAR)? {
            Some(code) => code.parse()?,
            None => Locale::default(),
        };
        Ok(Self::new(api_url, locale))
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Full url of the login endpoint
    pub fn login_url(&self) -> String {
        format!("{}{}", self.api_url, LOGIN_PATH)
    }
}

fn optional_var(key: &str) -> AuthResult<Option<String>> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(error) => Err(error.into()),
    }
}
