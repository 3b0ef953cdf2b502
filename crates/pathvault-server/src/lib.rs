//! HTTP front end for a `PathVault`.
//!
//! Exposes folder upload, listing, single-file download and delete, and
//! on-the-fly ZIP download of any folder under the configured root.
//!
//! # Endpoints
//!
//! | Method | Path | |
//! |---|---|---|
//! | `GET` | `/health` | liveness probe |
//! | `POST` | `/upload` | multipart batch upload |
//! | `GET` | `/files` | JSON listing |
//! | `GET` | `/files/{path}` | download one file |
//! | `DELETE` | `/files/{path}` | delete one file |
//! | `GET` | `/archive/{path}` | ZIP of a folder |

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod router;
pub mod state;

pub use config::Config;
pub use error::ApiError;
pub use error::ErrorCode;
pub use router::create_router;
pub use state::AppState;
