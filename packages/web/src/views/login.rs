use dioxus::prelude::*;
use ui::views::LoginView;
use ui::use_current_user;

use crate::Route;

#[component]
pub fn Login() -> Element {
    let user = use_current_user();
    let nav = use_navigator();

    // Already signed in
    use_effect(move || {
        if user.read().is_signed_in() {
            nav.replace(Route::Home {});
        }
    });

    rsx! {
        LoginView {
            on_signed_in: move |_| {
                nav.replace(Route::Home {});
            },
        }
    }
}
