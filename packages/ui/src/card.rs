use dioxus::prelude::*;

/// White rounded panel every post and form sits in.
#[component]
pub fn Card(#[props(default)] no_padding: bool, children: Element) -> Element {
    let class = if no_padding { "card" } else { "card card--padded" };
    rsx! {
        div { class: "{class}", {children} }
    }
}
