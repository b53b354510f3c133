//! Blocking client for the JSONPlaceholder users API.
//!
//! # Overview
//! Create, update, delete and look up users, and read their posts, comments
//! and todos. Two conveniences sit on top of the raw endpoints: the comments
//! of a user's last post, and a user's open (incomplete) todos. Comment
//! collections can be persisted to and read back from JSON files.
//!
//! # Design
//! - `PlaceholderClient` is stateless and never touches the network. It
//!   builds `HttpRequest` values and parses `HttpResponse` values, so the
//!   I/O boundary is explicit.
//! - `Transport` executes the round-trip; `UreqTransport` is the blocking
//!   implementation and owns the only connection handle.
//! - `JsonPlaceholderApi` joins the two and runs the multi-step operations.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod storage;
pub mod transport;
pub mod types;

pub use api::JsonPlaceholderApi;
pub use client::{last_post, open_tasks, PlaceholderClient};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use storage::{comments_file_name, read_comments, write_comments};
pub use transport::{Transport, UreqTransport};
pub use types::{Comment, Post, Todo, User};
