use leptos::*;
use web_portal_auth::i18n::{Locale, Notice};

#[component]
pub fn Toast(cx: Scope, notice: Notice, locale: Locale) -> impl IntoView {
    let title = notice.title(locale);
    let description = notice.description().map(str::to_owned);
    view! { cx,
        <div class="toast fade show destructive" role="alert" aria-live="assertive" aria-atomic="true">
            <div class="toast-header">
                <strong class="me-auto">{title}</strong>
            </div>
            {description.map(|description| view! { cx, <div class="toast-body">{description}</div> })}
        </div>
    }
}
