//! # Spotify Integration Module
//!
//! This module is the integration layer between the pipeline and the Spotify
//! Web API. Each submodule covers one endpoint family and maps to one stage
//! of a run:
//!
//! ```text
//! Pipeline
//!     ├── auth     POST /api/token                    (token provider, setup flow)
//!     ├── player   GET  /me/player/recently-played    (extractor)
//!     └── artists  GET  /artists/{id}                 (artist image resolver)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Authentication
//!
//! Recurring runs only use the `refresh_token` grant, authenticated with a
//! `Basic` header derived from the client id and secret. The
//! `authorization_code` grant is used once by the setup flow to obtain the
//! refresh token.
//!
//! ## Error Handling
//!
//! All functions return [`crate::Res`]. No function retries on its own: the
//! token provider and the extractor propagate every failure, and the artist
//! resolver converts per-artist failures into missing images.
//!
//! ## Concurrency
//!
//! Requests are issued strictly one after another on a single shared
//! `reqwest::Client`. There is no fan-out and no explicit timeout beyond the
//! transport defaults.

pub mod artists;
pub mod auth;
pub mod player;
