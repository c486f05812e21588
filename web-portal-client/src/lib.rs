pub mod api;
mod components;
mod pages;

use leptos::*;
use leptos_router::*;
use web_portal_auth::i18n::Locale;
use web_portal_common::AuthenticatedUser;

use crate::{
    api::AuthApi,
    pages::{home::Home, login::Login, Landing, ROOT_PATH},
};

/// Backend base url baked in at build time. Empty means the origin serving the page.
const API_URL: &str = match option_env!("INVENTORY_API_URL") {
    Some(url) => url,
    None => "",
};

fn build_locale() -> Locale {
    let Some(code) = option_env!("INVENTORY_LOCALE") else {
        return Locale::default();
    };
    code.parse().unwrap_or_else(|error| {
        log::warn!("{error}. Using default locale");
        Locale::default()
    })
}

#[component]
pub fn App(cx: Scope) -> impl IntoView {
    let (user_info, set_user_info) = create_signal(cx, None::<AuthenticatedUser>);
    let api = AuthApi::new(API_URL);
    let locale = build_locale();
    view! {
        cx,
        <Router>
            <Routes>
                <Route
                    path=ROOT_PATH
                    view=move |cx| {
                        view! { cx,
                            <div class="app">
                            {move || match Landing::for_user(user_info.get()) {
                                Landing::Home(user) => view! { cx, <Home user=user/> }.into_view(cx),
                                Landing::Login => {
                                    let on_login = move |user: AuthenticatedUser| {
                                        set_user_info.update(|u| *u = Some(user));
                                    };
                                    view! { cx, <Login api=api locale=locale on_login=on_login/> }
                                        .into_view(cx)
                                }
                            }}
                            </div>
                        }
                    }
                />
            </Routes>
        </Router>
    }
}
