use dioxus::prelude::*;

use crate::avatar::{Avatar, AvatarSize};
use crate::card::Card;
use crate::feed::publish_post;
use crate::user::{use_backend, use_current_user};

/// Composer for a new top-level post. Calls `on_post` once it is stored.
#[component]
pub fn PostFormCard(on_post: EventHandler<()>) -> Element {
    let backend = use_backend();
    let user = use_current_user();
    let mut content = use_signal(String::new);

    let handle_share = move |_| {
        let Some(me) = user.peek().id().map(str::to_string) else {
            return;
        };
        let text = content();
        let store = backend.get();
        spawn(async move {
            if publish_post(&store, &me, &text).await {
                content.set(String::new());
                on_post.call(());
            }
        });
    };

    let profile = user.read().profile.clone();
    let placeholder = match &profile {
        Some(p) => format!("What's on your mind, {}?", p.display_name()),
        None => "What's on your mind?".to_string(),
    };

    rsx! {
        Card {
            div { class: "composer",
                if let Some(p) = profile {
                    Avatar { url: p.avatar.clone(), name: p.name.clone(), size: AvatarSize::Small }
                }
                textarea {
                    class: "composer-input",
                    placeholder: "{placeholder}",
                    value: content(),
                    oninput: move |evt: FormEvent| content.set(evt.value()),
                }
            }
            div { class: "composer-actions",
                button {
                    class: "primary",
                    disabled: user.read().id().is_none(),
                    onclick: handle_share,
                    "Share"
                }
            }
        }
    }
}
