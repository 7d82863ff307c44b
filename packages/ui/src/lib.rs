//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const UI_CSS: Asset = asset!("/assets/ui.css");

mod avatar;
pub use avatar::{Avatar, AvatarSize};

mod card;
pub use card::Card;

pub mod card_state;
pub use card_state::{CardUpdate, PostCardState};

pub mod feed;

mod menu;
pub use menu::{DropdownMenu, MenuEvent, MenuState, OutsidePresses, PointerArea};

mod navbar;
pub use navbar::Navbar;

mod post_card;
pub use post_card::PostCard;

mod post_form;
pub use post_form::PostFormCard;

pub mod time_ago;

mod user;
pub use user::{use_backend, use_current_user, BackendHandle, CurrentUser, UserProvider};
