mod home;
pub use home::HomeView;

mod login;
pub use login::LoginView;

mod profile;
pub use profile::ProfileView;

mod saved;
pub use saved::SavedView;
