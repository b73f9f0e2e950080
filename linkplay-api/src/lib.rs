//! Endpoint abstraction for LinkPlay audio device control
//!
//! This crate provides the request layer for talking to LinkPlay-based
//! speakers and streamers over their HTTP command API. It uses the private
//! `linkplay-sdk-http-client` crate for the low-level request/response
//! marshaling.
//!
//! Three call shapes cover the whole device API surface:
//!
//! - [`Endpoint::request`] — fire-and-forget, verified against the device's
//!   `"OK"` acknowledgement
//! - [`Endpoint::json_request`] — structured, parsed into a string map
//! - [`Endpoint::raw_request`] — verbatim body with a caller-controlled
//!   timeout
//!
//! ```rust,no_run
//! use linkplay_api::{Endpoint, HttpApiEndpoint};
//!
//! # async fn example() -> linkplay_api::Result<()> {
//! let client = http_client::create_client()?;
//! let speaker = HttpApiEndpoint::new("http", "192.168.1.50", client)?;
//!
//! speaker.request("setPlayerCmd:pause").await?;
//! let status = speaker.json_request("getStatusEx").await?;
//! println!("{} is {:?}", speaker, status.get("status"));
//! # Ok(())
//! # }
//! ```

pub mod endpoint;
pub mod error;

pub use endpoint::{Endpoint, HttpApiEndpoint};
pub use error::{ApiError, Result};
