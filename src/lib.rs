//! # taqtaq-db
//!
//! `taqtaq_db` is the PostgreSQL bootstrap and storage layer of the
//! TaqTaq ride-matching service.
//!
//! The entry point is [connect](./fn.connect.html): it reads the five
//! `PG*` environment variables, assembles a keyword/value connection
//! string from them verbatim, and opens one blocking connection. On
//! failure it prints a fixed marker and kills the process; on success
//! the rest of the service runs on the returned handle.
//!
//! ```no_run
//! use taqtaq_db::prelude::*;
//!
//! fn main() {
//!     dotenvy::dotenv().ok();
//!
//!     // Exits the process if the database is unreachable.
//!     let conn = taqtaq_db::connect();
//!
//!     store::init_schema(&conn).unwrap();
//!     let captains = store::find_captains(&conn, "الرياض", "العليا").unwrap();
//!     for captain in &captains {
//!         println!("{}", captain.full_name.as_deref().unwrap_or("?"));
//!     }
//! }
//! ```

#![allow(clippy::needless_doctest_main)]

mod config;
mod connection;
mod error;
mod row;

pub mod store;
pub mod validators;

pub use crate::config::{Config, MAX_SEATS, MIN_SEATS, SUPPORTED_CITIES};
pub use crate::connection::{connect, open, Connection, ToSql, CONNECT_FAILED_MSG};
pub use crate::error::{Error, ErrorLevel};
pub use crate::row::Row;

pub mod prelude {
    //! Re-exports important traits and types.

    pub use crate::config::Config;
    pub use crate::connection::{connect, open, Connection, ToSql};
    pub use crate::error::{Error, ErrorLevel};
    pub use crate::row::Row;
    pub use crate::{store, validators};
}

/// A typedef of the result returned by many methods.
pub type Result<T, E = crate::error::Error> = std::result::Result<T, E>;
