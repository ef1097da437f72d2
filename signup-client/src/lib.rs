// signup-client/src/lib.rs
pub mod activity_repository;
pub mod auth_gateway;
pub mod commands;
pub mod controller;
pub mod error;
pub mod session_store;
pub mod storage;
pub mod transport;
pub mod view;

#[cfg(test)]
mod testing;

pub use activity_repository::ActivityRepository;
pub use auth_gateway::{AuthGateway, LoginSuccess};
pub use commands::Command;
pub use controller::ViewController;
pub use error::{ActionError, AuthError, FetchError, StorageError, TransportError};
pub use session_store::SessionStore;
pub use storage::{FileStorage, MemoryStorage, TokenStorage};
pub use transport::{ApiRequest, ApiResponse, ApiUrls, Method, ReqwestTransport, Transport};
pub use view::View;
