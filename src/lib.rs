//! Client core for the Stockroom inventory dashboard.
//!
//! Everything here is platform-neutral: the browser transport and storage are
//! plugged in through [`request::HttpClient`] and [`storage::KeyValueStore`].

pub mod api;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod detail;
pub mod error;
pub mod forms;
pub mod modal;
pub mod request;
pub mod session;
pub mod storage;

pub use api::InventoryApi;
pub use config::ClientConfig;
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use modal::ModalState;
pub use session::{Capabilities, Session, SessionStore};
pub use stockroom_shared as shared;
