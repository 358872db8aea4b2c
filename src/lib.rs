//! Spotify Listening History Loader
//!
//! This library implements a small extract-transform-load job that pulls the
//! tracks a user played during the last twelve hours from the Spotify Web API,
//! enriches them with artist images, flattens them into table rows and appends
//! them to a PostgreSQL table.
//!
//! # Modules
//!
//! - `cli` - Command implementations invoked by the binary
//! - `config` - Configuration loaded once from the environment and `.env` files
//! - `error` - Error type shared by all fatal pipeline stages
//! - `loader` - Appends transformed rows to the destination table
//! - `pipeline` - Sequences token, extract, transform and load
//! - `spotify` - Spotify Web API client implementation
//! - `transform` - Reshapes raw play events into flat records
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use playlog::{config, pipeline};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> playlog::Res<()> {
//!     let config = config::Config::from_env()?;
//!     let report = pipeline::run(&config).await?;
//!     println!("{} tracks extracted", report.extracted);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod spotify;
pub mod transform;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Every fatal stage of the pipeline (token exchange, extraction and
/// transformation) reports failures through [`error::EtlError`]. Recoverable
/// failures such as a single artist lookup or the final load never surface
/// through this type.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use playlog::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, error::EtlError>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Requesting a new access token...");
/// info!("Resolving images for {} artists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Used at every stage boundary of the pipeline once the stage completed,
/// e.g. after extraction, transformation and load.
///
/// # Example
///
/// ```
/// success!("Successfully extracted your last {} played tracks!", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Only the binary uses this macro,
/// for fatal pipeline errors that the external scheduler must see as a
/// failed run. Library code returns [`Res`] instead.
///
/// # Example
///
/// ```
/// error!("Pipeline aborted: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for tolerated failures that do not change the exit code of a run,
/// such as a failed artist image lookup or a failed database load.
///
/// # Example
///
/// ```
/// warning!("Could not resolve image for artist {}: {}", id, e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
