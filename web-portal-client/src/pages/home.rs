use leptos::*;
use web_portal_common::AuthenticatedUser;

/// Name to greet the user with. Falls back to the raw JSON when the backend sends no name.
fn display_name(user: &AuthenticatedUser) -> String {
    ["name", "username"]
        .iter()
        .find_map(|key| user.get(key).and_then(|value| value.as_str()))
        .map_or_else(|| user.as_value().to_string(), str::to_owned)
}

#[component]
pub fn Home(cx: Scope, user: AuthenticatedUser) -> impl IntoView {
    view! { cx,
        <div class="home">
            <p>"Logged in as " {display_name(&user)} "."</p>
        </div>
    }
}
