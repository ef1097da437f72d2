pub mod activity;
pub mod session;

pub use activity::{Activity, Catalog};
pub use session::{AuthState, Role, Session, User};
