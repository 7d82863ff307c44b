mod home;
pub use home::Home;

mod login;
pub use login::Login;

mod profile;
pub use profile::Profile;

mod saved;
pub use saved::Saved;
