//! # CLI Module
//!
//! Command implementations invoked by the `playlog` binary. Each command
//! receives configuration that the binary built once at startup, reports
//! progress through the crate's status macros and terminates the process
//! with a non-zero status on fatal errors.
//!
//! ## Commands
//!
//! - [`run`] - One complete pipeline run (the default when no subcommand is given)
//! - [`preview`] - Extract and transform, print the rows, skip the load
//! - [`auth_url`] - First step of the one-time setup: print the authorization URL
//! - [`auth_exchange`] - Second step: turn the authorization code into a refresh token
//!
//! ## Usage Patterns
//!
//! ### Initial Setup
//! ```bash
//! playlog auth url                      # Visit the URL, copy the `code`
//! playlog auth exchange --code AQD...   # Store the printed REFRESH_TOKEN
//! ```
//!
//! ### Scheduled Usage
//! ```bash
//! 30 0,12 * * * playlog                 # Twice a day
//! ```
//!
//! ## Exit Status
//!
//! `run` exits with 0 when the pipeline completed, including when the load
//! into the database failed and was only reported. Token, extraction and
//! transformation errors exit with 1 so that the scheduler can retry.

mod auth;
mod preview;
mod run;

pub use auth::auth_exchange;
pub use auth::auth_url;
pub use preview::preview;
pub use run::run;
