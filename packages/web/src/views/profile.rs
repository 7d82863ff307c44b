use dioxus::prelude::*;
use ui::views::ProfileView;
use ui::Navbar;

#[component]
pub fn Profile(id: String) -> Element {
    rsx! {
        Navbar {
            ProfileView { id }
        }
    }
}
