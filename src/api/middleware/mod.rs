mod session;

pub use session::{CurrentUser, SessionAuth, current_user};
