pub mod current_user;
pub mod refresh_subject;

pub use current_user::CurrentUser;
pub use refresh_subject::RefreshSubject;
