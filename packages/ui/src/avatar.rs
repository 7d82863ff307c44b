use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AvatarSize {
    #[default]
    Small,
    Large,
}

/// Round profile picture, or the first letter of the name when there is none.
#[component]
pub fn Avatar(
    url: Option<String>,
    #[props(default)] name: Option<String>,
    #[props(default)] size: AvatarSize,
) -> Element {
    let class = match size {
        AvatarSize::Small => "avatar",
        AvatarSize::Large => "avatar avatar--large",
    };

    match url.filter(|u| !u.is_empty()) {
        Some(url) => rsx! {
            div { class: "{class}",
                img { src: "{url}", alt: "" }
            }
        },
        None => {
            let initial = name
                .as_deref()
                .and_then(|n| n.chars().next())
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_else(|| "?".to_string());
            rsx! {
                div { class: "{class} avatar--initial", "{initial}" }
            }
        }
    }
}
