//! NetBox REST API Client
//!
//! A thin client for the NetBox REST API: it normalizes the API base URL,
//! builds model routes, attaches credentials and passes HTTP verbs through
//! to `reqwest`. Resources are not modeled; responses are decoded into any
//! `serde` type the caller picks, or returned raw.
//!
//! # Example
//!
//! ```no_run
//! use netbox_api::{Authentication, NetBoxClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a client; "http://" and the trailing slash are added
//! let client = NetBoxClient::new("netbox:8000/api", Authentication::token("your-api-token"))?;
//!
//! // List devices of a site
//! let route = client.build_model_route("dcim", "devices");
//! let page: serde_json::Value = client.get(&route, &[("site", "ams1")]).await?;
//!
//! // Create a tag
//! let tag: serde_json::Value = client
//!     .post("extras/tags/", &serde_json::json!({"name": "pxe", "slug": "pxe"}))
//!     .await?;
//!
//! // Delete it again and inspect the raw response
//! let response = client.delete(&format!("extras/tags/{}/", tag["id"])).await?;
//! assert!(response.status().is_success());
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Authentication**: HTTP Basic or NetBox token (`Authorization: Token <token>`)
//! - **Verbs**: GET/POST/PUT/PATCH/DELETE plus a raw `request` pass-through
//! - **Pagination**: Support for fetching all pages of large result sets

pub mod auth;
pub mod client;
pub mod common;
pub mod config;
pub mod error;

pub use auth::{Authentication, TokenAuth};
pub use client::NetBoxClient;
pub use common::{PaginatedResponse, RequestOptions};
pub use config::ClientConfig;
pub use error::NetBoxError;
pub use reqwest::{Method, Response, StatusCode};
