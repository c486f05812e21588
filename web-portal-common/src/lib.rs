//! Wire types shared between the inventory portal login form and its callers

use std::fmt::{self, Debug, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Path of the backend endpoint that validates [Credentials]
pub const LOGIN_PATH: &str = "/api/auth/login";

/// Username and password pair entered for a single login attempt
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new<U, P>(username: U, password: P) -> Self
    where
        U: Into<String>,
        P: Into<String>,
    {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// User returned by the authentication backend. The shape is owned by the backend so the value is
/// kept as raw JSON and handed to the caller untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthenticatedUser(Value);

impl AuthenticatedUser {
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Lookup a top level field of the user object. Returns [None] if the user is not a JSON
    /// object or the field is missing.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.as_object().and_then(|map| map.get(key))
    }
}

impl From<Value> for AuthenticatedUser {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;
    use serde_json::json;

    use super::{AuthenticatedUser, Credentials};

    #[test]
    fn credentials_should_serialize_username_then_password() -> serde_json::Result<()> {
        let credentials = Credentials::new("admin", "secret");

        let body = serde_json::to_string(&credentials)?;

        assert_eq!(body, r#"{"username":"admin","password":"secret"}"#);
        Ok(())
    }

    #[test]
    fn credentials_debug_should_hide_password() {
        let credentials = Credentials::new("admin", "secret");

        let debug = format!("{credentials:?}");

        assert!(debug.contains("admin"), "username missing from {debug}");
        assert!(!debug.contains("secret"), "password leaked in {debug}");
    }

    #[test]
    fn authenticated_user_should_deserialize_any_shape() -> serde_json::Result<()> {
        let user: AuthenticatedUser = serde_json::from_str(r#"{"id":1,"name":"admin"}"#)?;

        assert_eq!(user.as_value(), &json!({"id": 1, "name": "admin"}));
        assert_eq!(user.get("name"), Some(&json!("admin")));
        Ok(())
    }

    #[rstest]
    #[case::array(json!([1, 2]))]
    #[case::string(json!("admin"))]
    #[case::null(json!(null))]
    fn get_should_be_none_for_non_objects(#[case] value: serde_json::Value) {
        let user = AuthenticatedUser::new(value);

        assert_eq!(user.get("id"), None);
    }
}
