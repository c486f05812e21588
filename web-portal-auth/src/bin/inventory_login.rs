use std::{
    cell::RefCell,
    io::{self, BufRead},
};

use log::{error, info, warn};
use web_portal_auth::{
    config::AuthConfig,
    error::{AuthError, AuthResult},
    form::{FormObserver, LoginForm, SubmitOutcome},
    i18n::{Locale, Notice},
    transport::ReqwestTransport,
    AuthenticatedUser,
};

/// Writes notices to the log in the configured locale
struct LogObserver {
    locale: Locale,
}

impl FormObserver for LogObserver {
    fn notify(&self, notice: Notice) {
        let title = notice.title(self.locale);
        if notice.is_validation() {
            warn!("{title}");
            return;
        }
        match notice.description() {
            Some(description) => error!("{title}: {description}"),
            None => error!("{title}"),
        }
    }

    fn submitting_changed(&self, submitting: bool) {
        if submitting {
            info!("Contacting authentication service");
        }
    }
}

fn read_password() -> AuthResult<String> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|error| AuthError::Generic(format!("Could not read password. {error}")))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

#[tokio::main]
async fn main() -> AuthResult<()> {
    log4rs::init_file("web-portal-auth/inventory_login_log.yml", Default::default())
        .map_err(|error| AuthError::Generic(format!("Could not initialize logging. {error}")))?;
    let Some(username) = std::env::args().nth(1) else {
        return Err("Usage: inventory_login <username> (password is read from stdin)".into());
    };
    let config = AuthConfig::from_env()?;
    let password = read_password()?;

    let authenticated = RefCell::new(None::<AuthenticatedUser>);
    let form = LoginForm::new(
        ReqwestTransport::new(&config)?,
        LogObserver {
            locale: config.locale(),
        },
        |user| {
            *authenticated.borrow_mut() = Some(user);
        },
    );
    match form.submit(&username, &password).await {
        SubmitOutcome::Authenticated => {}
        SubmitOutcome::Invalid => return Err(AuthError::MissingCredentials),
        SubmitOutcome::Failed | SubmitOutcome::Busy => return Err("Login failed".into()),
    }

    let Some(user) = authenticated.take() else {
        return Err("Login succeeded without a user".into());
    };
    println!("{}", serde_json::to_string_pretty(user.as_value())?);
    Ok(())
}
