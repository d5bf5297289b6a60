//! Client Module
//!
//! Everything a front end needs to talk to the service: configuration,
//! token persistence, form validation and the HTTP client. Compiles without
//! the `ssr` feature.
//!
//! # Module Structure
//!
//! ```text
//! client/
//! ├── mod.rs          - Module exports and documentation
//! ├── config.rs       - ClientConfig (TOML + environment)
//! ├── token_store.rs  - TokenStore trait, file and memory stores
//! ├── form.rs         - Login/registration forms
//! ├── api.rs          - ApiClient and SessionStatus
//! ├── error.rs        - ClientError
//! └── main.rs         - `studentleave` command-line front end
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod token_store;

pub use api::{ApiClient, Landing, SessionStatus};
pub use config::{ClientConfig, EndpointSet};
pub use error::ClientError;
pub use form::{LoginForm, RegisterForm};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
