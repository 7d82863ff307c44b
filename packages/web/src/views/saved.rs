use dioxus::prelude::*;
use ui::views::SavedView;
use ui::Navbar;

#[component]
pub fn Saved() -> Element {
    rsx! {
        Navbar {
            SavedView {}
        }
    }
}
