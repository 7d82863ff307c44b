//! Per-card dropdown menu with outside-click dismissal.
//!
//! Dismissal watches presses as they bubble instead of covering the page,
//! so a press outside the menu still reaches whatever it landed on.

use std::collections::HashMap;

use dioxus::prelude::*;

/// Open/closed state of a dropdown. Starts closed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

/// What can happen to a dropdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    /// The menu button was clicked.
    ButtonActivated,
    /// A pointer press landed outside the menu.
    OutsideClick,
    /// An item in the menu finished its action.
    ActionCompleted,
}

impl MenuState {
    pub fn next(self, event: MenuEvent) -> Self {
        match event {
            MenuEvent::ButtonActivated => MenuState::Open,
            MenuEvent::OutsideClick | MenuEvent::ActionCompleted => MenuState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }
}

/// Open menu panels, and which of them the press now bubbling started in.
///
/// A press is seen first by the panel it landed in (if any) and then by the
/// enclosing [`PointerArea`], which asks for the panels to dismiss.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutsidePresses {
    next_id: usize,
    open: Vec<usize>,
    inside: Vec<usize>,
}

impl OutsidePresses {
    /// Track a newly opened panel.
    pub fn register(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.open.push(id);
        id
    }

    pub fn unregister(&mut self, id: usize) {
        self.open.retain(|&open| open != id);
        self.inside.retain(|&inside| inside != id);
    }

    /// The current press started inside panel `id`.
    pub fn press_inside(&mut self, id: usize) {
        self.inside.push(id);
    }

    /// The current press reached the area. Returns the open panels it did
    /// not start in.
    pub fn finish_press(&mut self) -> Vec<usize> {
        let inside = std::mem::take(&mut self.inside);
        self.open
            .iter()
            .copied()
            .filter(|id| !inside.contains(id))
            .collect()
    }
}

#[derive(Clone, Copy)]
struct PressContext {
    presses: Signal<OutsidePresses>,
    dismiss: Signal<HashMap<usize, EventHandler<()>>>,
}

/// Dismisses open menus on any press outside them.
///
/// Presses are observed on their way up and never stopped, so the element
/// under the pointer still gets its click.
#[component]
pub fn PointerArea(children: Element) -> Element {
    let ctx = use_context_provider(|| PressContext {
        presses: Signal::new(OutsidePresses::default()),
        dismiss: Signal::new(HashMap::new()),
    });

    let on_press = move |_: Event<MouseData>| {
        let mut presses = ctx.presses;
        let outside = presses.write().finish_press();
        let handlers: Vec<EventHandler<()>> = {
            let dismiss = ctx.dismiss.peek();
            outside.iter().filter_map(|id| dismiss.get(id).copied()).collect()
        };
        for handler in handlers {
            handler.call(());
        }
    };

    rsx! {
        div { class: "pointer-area", onmousedown: on_press, {children} }
    }
}

/// Renders `children` as a floating menu while `open`.
///
/// A press outside the panel calls `on_dismiss`. Must sit inside a
/// [`PointerArea`].
#[component]
pub fn DropdownMenu(open: bool, on_dismiss: EventHandler<()>, children: Element) -> Element {
    if !open {
        return rsx! {};
    }

    rsx! {
        DropdownPanel { on_dismiss, {children} }
    }
}

#[component]
fn DropdownPanel(on_dismiss: EventHandler<()>, children: Element) -> Element {
    let ctx = use_context::<PressContext>();
    let id = use_hook(move || {
        let (mut presses, mut dismiss) = (ctx.presses, ctx.dismiss);
        let id = presses.write().register();
        dismiss.write().insert(id, on_dismiss);
        id
    });

    use_drop(move || {
        let (mut presses, mut dismiss) = (ctx.presses, ctx.dismiss);
        presses.write().unregister(id);
        dismiss.write().remove(&id);
    });

    rsx! {
        div {
            class: "dropdown-panel",
            onmousedown: move |_| {
                let mut presses = ctx.presses;
                presses.write().press_inside(id);
            },
            {children}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_transitions() {
        let menu = MenuState::default();
        assert_eq!(menu, MenuState::Closed);

        let menu = menu.next(MenuEvent::ButtonActivated);
        assert!(menu.is_open());
        // a second press on the button keeps it open
        assert!(menu.next(MenuEvent::ButtonActivated).is_open());

        assert_eq!(menu.next(MenuEvent::OutsideClick), MenuState::Closed);
        assert_eq!(menu.next(MenuEvent::ActionCompleted), MenuState::Closed);
        assert_eq!(MenuState::Closed.next(MenuEvent::OutsideClick), MenuState::Closed);
    }

    #[test]
    fn test_press_outside_dismisses_open_panel() {
        let mut presses = OutsidePresses::default();
        let a = presses.register();

        // e.g. the comment input of another card
        assert_eq!(presses.finish_press(), [a]);
    }

    #[test]
    fn test_press_inside_keeps_panel() {
        let mut presses = OutsidePresses::default();
        let a = presses.register();

        presses.press_inside(a);
        assert!(presses.finish_press().is_empty());
        // the mark only lasts for that press
        assert_eq!(presses.finish_press(), [a]);
    }

    #[test]
    fn test_press_in_one_menu_closes_the_other() {
        let mut presses = OutsidePresses::default();
        let a = presses.register();
        let b = presses.register();

        presses.press_inside(b);
        assert_eq!(presses.finish_press(), [a]);

        presses.unregister(a);
        presses.press_inside(b);
        assert!(presses.finish_press().is_empty());
    }

    #[test]
    fn test_closed_panels_are_not_dismissed() {
        let mut presses = OutsidePresses::default();
        let a = presses.register();
        presses.unregister(a);
        assert!(presses.finish_press().is_empty());
    }
}
