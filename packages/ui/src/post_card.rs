use dioxus::prelude::*;
use store::{PostWithAuthor, Profile};

use crate::avatar::Avatar;
use crate::card::Card;
use crate::card_state::{self, PostCardState};
use crate::icons::{FaBookmark, FaComment, FaEllipsis, FaHeart, FaShareNodes};
use crate::menu::{DropdownMenu, MenuEvent};
use crate::time_ago::time_ago_now;
use crate::user::{use_backend, use_current_user};
use crate::Icon;

/// One post with its likes, comments and menu.
///
/// Likes, comments and the saved flag are fetched when the card mounts, or
/// as soon as the current profile becomes known if it was not yet.
#[component]
pub fn PostCard(post: PostWithAuthor) -> Element {
    let backend = use_backend();
    let user = use_current_user();
    let me = use_memo(move || user.read().id().map(str::to_string));
    let mut state = use_signal(PostCardState::default);

    let post_id = use_hook(|| post.id.clone());

    {
        let post_id = post_id.clone();
        use_effect(move || {
            let Some(me) = me() else {
                return;
            };
            let store = backend.get();

            let (s, id) = (store.clone(), post_id.clone());
            spawn(async move {
                let update = card_state::load_likes(&s, &id).await;
                state.write().apply(update);
            });
            let (s, id) = (store.clone(), post_id.clone());
            spawn(async move {
                let update = card_state::load_comments(&s, &id).await;
                state.write().apply(update);
            });
            let id = post_id.clone();
            spawn(async move {
                let update = card_state::load_saved(&store, &id, &me).await;
                state.write().apply(update);
            });
        });
    }

    let on_like = {
        let post_id = post_id.clone();
        move |_| {
            let Some(me) = me() else {
                return;
            };
            let liked = state.peek().liked_by(&me);
            let store = backend.get();
            let id = post_id.clone();
            spawn(async move {
                let update = card_state::toggle_like(&store, &id, &me, liked).await;
                state.write().apply(update);
            });
        }
    };

    let on_save = {
        let post_id = post_id.clone();
        move |_| {
            let Some(me) = me() else {
                return;
            };
            let saved = state.peek().is_saved;
            let store = backend.get();
            let id = post_id.clone();
            spawn(async move {
                let update = card_state::toggle_save(&store, &id, &me, saved).await;
                state.write().apply(update);
            });
        }
    };

    let on_comment = {
        let post_id = post_id.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let Some(me) = me() else {
                return;
            };
            let content = state.peek().comment_text.clone();
            let store = backend.get();
            let id = post_id.clone();
            spawn(async move {
                let update = card_state::submit_comment(&store, &id, &me, &content).await;
                state.write().apply(update);
            });
        }
    };

    let open_menu = move |evt: Event<MouseData>| {
        evt.stop_propagation();
        state.write().menu_event(MenuEvent::ButtonActivated);
    };

    let current = state();
    let liked = me().is_some_and(|id| current.liked_by(&id));
    let author = post.author.clone();
    let posted = time_ago_now(post.created_at);
    let like_class = if liked { "post-action post-action--liked" } else { "post-action" };

    rsx! {
        Card {
            div { class: "post-header",
                AuthorLink { author: author.clone(),
                    Avatar {
                        url: author.as_ref().and_then(|a| a.avatar.clone()),
                        name: author.as_ref().and_then(|a| a.name.clone()),
                    }
                }
                div { class: "post-meta",
                    p {
                        AuthorLink { author: author.clone(), class: "post-author", "{post.author_name()}" }
                        " shared a "
                        span { class: "accent", "post" }
                    }
                    p { class: "post-time", "{posted}" }
                }
                div { class: "post-menu",
                    button {
                        class: "icon-button",
                        title: "More",
                        onclick: open_menu,
                        Icon { icon: FaEllipsis, width: 18, height: 18 }
                    }
                    DropdownMenu {
                        open: current.menu.is_open(),
                        on_dismiss: move |_| state.write().menu_event(MenuEvent::OutsideClick),
                        button {
                            class: "dropdown-item",
                            onclick: on_save,
                            Icon { icon: FaBookmark, width: 16, height: 16 }
                            if current.is_saved { "Remove from saved" } else { "Save post" }
                        }
                        a {
                            class: "dropdown-item",
                            href: "#",
                            Icon { icon: FaShareNodes, width: 16, height: 16 }
                            "Share"
                        }
                    }
                }
            }

            div { class: "post-body",
                p { "{post.content}" }
                if !post.photos().is_empty() {
                    div { class: "post-photos",
                        for photo in post.photos() {
                            img { key: "{photo}", src: "{photo}", alt: "" }
                        }
                    }
                }
            }

            div { class: "post-actions",
                button {
                    class: "{like_class}",
                    onclick: on_like,
                    Icon { icon: FaHeart, width: 16, height: 16 }
                    "{current.likes.len()}"
                }
                span { class: "post-action",
                    Icon { icon: FaComment, width: 16, height: 16 }
                    "{current.comments.len()}"
                }
            }

            div { class: "post-comments",
                for comment in current.comments.iter() {
                    div { key: "{comment.id}", class: "comment",
                        AuthorLink { author: comment.author.clone(),
                            Avatar {
                                url: comment.author.as_ref().and_then(|a| a.avatar.clone()),
                                name: comment.author.as_ref().and_then(|a| a.name.clone()),
                            }
                        }
                        div { class: "comment-bubble",
                            span { class: "comment-author", "{comment.author_name()}" }
                            p { "{comment.content}" }
                        }
                    }
                }
                form { class: "comment-form", onsubmit: on_comment,
                    input {
                        r#type: "text",
                        placeholder: "Write a comment...",
                        value: "{current.comment_text}",
                        oninput: move |evt: FormEvent| state.write().comment_text = evt.value(),
                    }
                    button { r#type: "submit", class: "primary", "Post" }
                }
            }
        }
    }
}

/// Links to the author's profile, or renders unlinked when the author's
/// profile did not come back with the row.
#[component]
fn AuthorLink(author: Option<Profile>, #[props(default)] class: String, children: Element) -> Element {
    match author {
        Some(author) => rsx! {
            Link { class, to: format!("/profile/{}", author.id), {children} }
        },
        None => rsx! {
            span { class, {children} }
        },
    }
}
