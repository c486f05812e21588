use leptos::*;
use web_portal_auth::i18n::Labels;

#[component]
pub fn CredentialsForm(
    cx: Scope,
    action: Action<(String, String), ()>,
    disabled: Signal<bool>,
    labels: &'static Labels,
) -> impl IntoView {
    let (username, set_username) = create_signal(cx, String::new());
    let (password, set_password) = create_signal(cx, String::new());
    let dispatch_action = move || action.dispatch((username.get(), password.get()));

    view! { cx,
        <main class="login-card">
            <h3 data-testid="text-login-title">{labels.title}</h3>
            <p class="login-subtitle">{labels.subtitle}</p>
            <form on:submit=move |ev: ev::SubmitEvent| {
                ev.prevent_default();
                dispatch_action();
            }>
                <div class="form-group">
                <label for="username">{labels.username}</label>
                <input
                    class="form-control"
                    type="text"
                    id="username"
                    name="username"
                    data-testid="input-username"
                    autocomplete="username"
                    placeholder=labels.username_placeholder
                    prop:value=move || username.get()
                    on:input=move |ev| {
                        let val = event_target_value(&ev);
                        set_username.update(|v| *v = val);
                    }
                />
                </div>
                <div class="form-group">
                <label for="password">{labels.password}</label>
                <input
                    class="form-control"
                    type="password"
                    id="password"
                    name="password"
                    data-testid="input-password"
                    autocomplete="current-password"
                    placeholder=labels.password_placeholder
                    prop:value=move || password.get()
                    on:input=move |ev| {
                        let val = event_target_value(&ev);
                        set_password.update(|v| *v = val);
                    }
                />
                </div>
                <button
                    class="btn btn-primary w-100"
                    type="submit"
                    data-testid="button-login"
                    prop:disabled=move || disabled.get()
                >
                    {move || labels.submit_label(disabled.get())}
                </button>
            </form>
        </main>
    }
}
