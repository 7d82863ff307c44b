use dioxus::prelude::*;
use store::PostWithAuthor;

use crate::feed::load_saved_posts;
use crate::user::{use_backend, use_current_user};
use crate::PostCard;

/// Posts the current user saved.
#[component]
pub fn SavedView() -> Element {
    let backend = use_backend();
    let user = use_current_user();
    let me = use_memo(move || user.read().id().map(str::to_string));
    let mut posts = use_signal(Vec::<PostWithAuthor>::new);

    let _loader = use_resource(move || async move {
        let Some(me) = me() else {
            return;
        };
        if let Some(fresh) = load_saved_posts(&backend.get(), &me).await {
            posts.set(fresh);
        }
    });

    rsx! {
        h1 { class: "page-title", "Saved posts" }
        if posts.read().is_empty() {
            div { class: "view-placeholder",
                p { "Nothing saved yet." }
            }
        }
        for post in posts() {
            PostCard { key: "{post.id}", post: post.clone() }
        }
    }
}
