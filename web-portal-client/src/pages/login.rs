use std::rc::Rc;

use leptos::*;
use web_portal_auth::{
    form::{FormObserver, LoginForm},
    i18n::{Labels, Locale, Notice},
};
use web_portal_common::AuthenticatedUser;

use crate::{
    api::AuthApi,
    components::{CredentialsForm, Toast},
};

/// Pushes form side effects into the signals rendered by [Login]
#[derive(Clone, Copy)]
struct SignalObserver {
    set_notice: WriteSignal<Option<Notice>>,
    set_submitting: WriteSignal<bool>,
}

impl FormObserver for SignalObserver {
    fn notify(&self, notice: Notice) {
        self.set_notice.update(|n| *n = Some(notice));
    }

    fn submitting_changed(&self, submitting: bool) {
        if submitting {
            self.set_notice.update(|n| *n = None);
        }
        self.set_submitting.update(|s| *s = submitting);
    }
}

#[component]
pub fn Login<F>(cx: Scope, api: AuthApi, locale: Locale, on_login: F) -> impl IntoView
where
    F: Fn(AuthenticatedUser) + 'static,
{
    let labels = Labels::for_locale(locale);
    let (notice, set_notice) = create_signal(cx, None::<Notice>);
    let (submitting, set_submitting) = create_signal(cx, false);
    let observer = SignalObserver {
        set_notice,
        set_submitting,
    };
    let form = Rc::new(LoginForm::new(api, observer, on_login));
    let login_action = create_action(cx, move |(username, password): &(String, String)| {
        let form = Rc::clone(&form);
        let username = username.clone();
        let password = password.clone();
        async move {
            let outcome = form.submit(&username, &password).await;
            log::debug!("Login attempt finished with {outcome:?}");
        }
    });
    let disabled = Signal::derive(cx, move || submitting.get());
    view! { cx,
        <div class="login-page" dir=locale.direction() lang=locale.code()>
            <CredentialsForm action=login_action disabled=disabled labels=labels/>
            {move || {
                notice
                    .get()
                    .map(|notice| view! { cx, <Toast notice=notice locale=locale/> })
            }}
            <p class="login-footer" data-testid="text-footer-version">{labels.footer}</p>
        </div>
    }
}
