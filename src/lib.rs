//! brfied library
//!
//! Small, stateless convenience helpers. Keep the crate root minimal; implementation
//! and tests live in their modules.
//!
//! ## Overview
//!
//! - [`env`] - Reads environment variables with typed coercion (list, list of maps,
//!   boolean) and default fallback; never fails
//! - [`shortcuts`] - Fetches HTTP(S)/FTP resources in one blocking request and unpacks
//!   them as text, JSON, ZIP, CSV inside ZIP or fixed-width records inside ZIP
//! - [`config`] - Settings for the fetcher, from TOML or `BRFIED_*` variables
//! - [`logging`] - Optional `tracing` subscriber setup
//! - [`errors`] - Error types used throughout the crate
//!
//! ## Example Usage
//!
//! ```no_run
//! use brfied::{env::env_as_bool, errors::AppResult, shortcuts};
//!
//! # fn example() -> AppResult<()> {
//! if env_as_bool("FETCH_ENABLED", Some(true.into())) == Some(true) {
//!     let archive = shortcuts::get_zip("http://localhost:8000/file01.zip")?;
//!     for entry in archive.filelist() {
//!         println!("{} ({} bytes)", entry.name, entry.size);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod env;
pub mod errors;
pub mod logging;
pub mod shortcuts;
