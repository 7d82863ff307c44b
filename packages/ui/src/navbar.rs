use dioxus::prelude::*;

use crate::icons::{FaBookmark, FaHouse, FaRightFromBracket, FaUser};
use crate::user::{use_backend, use_current_user};
use crate::Icon;

/// Side navigation plus the page column.
#[component]
pub fn Navbar(children: Element) -> Element {
    let backend = use_backend();
    let user = use_current_user();
    let nav = use_navigator();
    let profile_href = user.read().id().map(|id| format!("/profile/{id}"));

    let handle_logout = move |_| async move {
        backend.sign_out().await;
        nav.replace("/login");
    };

    rsx! {
        div { class: "layout",
            nav { class: "navbar",
                Link { class: "navbar-item", to: "/",
                    Icon { icon: FaHouse, width: 18, height: 18 }
                    "Home"
                }
                if let Some(href) = profile_href {
                    Link { class: "navbar-item", to: href,
                        Icon { icon: FaUser, width: 18, height: 18 }
                        "Profile"
                    }
                }
                Link { class: "navbar-item", to: "/saved",
                    Icon { icon: FaBookmark, width: 18, height: 18 }
                    "Saved posts"
                }
                button { class: "navbar-item", onclick: handle_logout,
                    Icon { icon: FaRightFromBracket, width: 18, height: 18 }
                    "Logout"
                }
            }
            main { class: "page", {children} }
        }
    }
}
