use dioxus::prelude::*;

use ui::{PointerArea, UserProvider};
use views::{Home, Login, Profile, Saved};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/login")]
    Login {},
    #[route("/profile/:id")]
    Profile { id: String },
    #[route("/saved")]
    Saved {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    init_logging();
    dioxus::launch(App);
}

#[cfg(target_arch = "wasm32")]
fn init_logging() {
    // Refused only when a logger is already installed
    dioxus::logger::init(tracing::Level::INFO).ok();
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: ui::UI_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        UserProvider {
            PointerArea {
                Router::<Route> {}
            }
        }
    }
}
