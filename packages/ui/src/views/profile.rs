use dioxus::prelude::*;
use store::{PostWithAuthor, Profile};

use crate::avatar::{Avatar, AvatarSize};
use crate::card::Card;
use crate::feed::{load_author_posts, load_profile};
use crate::user::use_backend;
use crate::PostCard;

/// A profile header followed by that author's posts.
#[component]
pub fn ProfileView(
    /// Profile id from the route.
    id: String,
) -> Element {
    // Track the id in a signal so the loader re-runs on route param change
    let mut id_signal = use_signal(|| id.clone());
    if *id_signal.peek() != id {
        id_signal.set(id.clone());
    }

    let backend = use_backend();
    let mut profile = use_signal(|| Option::<Profile>::None);
    let mut posts = use_signal(Vec::<PostWithAuthor>::new);
    let mut loaded = use_signal(|| false);

    let _loader = use_resource(move || {
        let id = id_signal();
        async move {
            let store = backend.get();
            profile.set(load_profile(&store, &id).await);
            if let Some(fresh) = load_author_posts(&store, &id).await {
                posts.set(fresh);
            }
            loaded.set(true);
        }
    });

    rsx! {
        match profile() {
            Some(p) => rsx! {
                Card { no_padding: true,
                    div {
                        class: "profile-cover",
                        style: p.cover.as_ref().map(|c| format!("background-image: url({c})")).unwrap_or_default(),
                    }
                    div { class: "profile-header",
                        Avatar { url: p.avatar.clone(), name: p.name.clone(), size: AvatarSize::Large }
                        div {
                            h1 { class: "profile-name", "{p.display_name()}" }
                            if let Some(place) = &p.place {
                                p { class: "profile-place", "{place}" }
                            }
                        }
                    }
                }
                for post in posts() {
                    PostCard { key: "{post.id}", post: post.clone() }
                }
            },
            None if loaded() => rsx! {
                div { class: "view-placeholder",
                    h2 { "Profile not found" }
                }
            },
            None => rsx! {
                div { class: "view-placeholder",
                    h2 { "Loading..." }
                }
            },
        }
    }
}
