use dioxus::prelude::*;
use ui::views::{HomeView, LoginView};
use ui::{use_current_user, Navbar};

/// The feed, or the login form when nobody is signed in.
#[component]
pub fn Home() -> Element {
    let user = use_current_user();
    let current = user.read();

    if current.loading {
        return rsx! {
            p { class: "view-placeholder", "Loading..." }
        };
    }

    if !current.is_signed_in() {
        return rsx! {
            LoginView { on_signed_in: move |_| {} }
        };
    }

    rsx! {
        Navbar {
            HomeView {}
        }
    }
}
