mod credentials;
mod toast;

pub use credentials::CredentialsForm;
pub use toast::Toast;
