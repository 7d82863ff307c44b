use dioxus::prelude::*;
use store::PostWithAuthor;

use crate::feed::load_feed;
use crate::user::use_backend;
use crate::{PostCard, PostFormCard};

/// The feed: composer on top, then every top-level post, newest first.
#[component]
pub fn HomeView() -> Element {
    let backend = use_backend();
    let mut posts = use_signal(Vec::<PostWithAuthor>::new);

    let reload = move || {
        let store = backend.get();
        spawn(async move {
            if let Some(fresh) = load_feed(&store).await {
                posts.set(fresh);
            }
        });
    };

    // Load the feed on mount
    use_hook(reload);

    rsx! {
        PostFormCard { on_post: move |_| { reload(); } }
        for post in posts() {
            PostCard { key: "{post.id}", post: post.clone() }
        }
    }
}
