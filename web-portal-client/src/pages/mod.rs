pub mod home;
pub mod login;

use web_portal_common::AuthenticatedUser;

pub const ROOT_PATH: &str = "/";

/// Page rendered at [ROOT_PATH]. The login form stays up until a user has authenticated.
#[derive(Debug, Clone, PartialEq)]
pub enum Landing {
    Login,
    Home(AuthenticatedUser),
}

impl Landing {
    pub fn for_user(user: Option<AuthenticatedUser>) -> Self {
        user.map_or(Self::Login, Self::Home)
    }
}
