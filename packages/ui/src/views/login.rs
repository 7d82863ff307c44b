use dioxus::prelude::*;

use crate::card::Card;
use crate::user::use_backend;

/// Email and password sign-in.
#[component]
pub fn LoginView(on_signed_in: EventHandler<()>) -> Element {
    let backend = use_backend();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        async move {
            loading.set(true);
            error.set(None);
            match backend.sign_in(&email(), &password()).await {
                Ok(()) => on_signed_in.call(()),
                Err(e) => {
                    tracing::error!("Sign-in failed: {e}");
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        }
    };

    rsx! {
        div { class: "login-container",
            h1 { class: "login-title", "Login" }
            Card {
                form { class: "login-form", onsubmit: handle_submit,
                    input {
                        r#type: "email",
                        placeholder: "Email",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                    input {
                        r#type: "password",
                        placeholder: "Password",
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                    if let Some(message) = error() {
                        p { class: "login-error", "{message}" }
                    }
                    button {
                        r#type: "submit",
                        class: "primary",
                        disabled: loading(),
                        if loading() { "Signing in..." } else { "Sign in" }
                    }
                }
            }
        }
    }
}
