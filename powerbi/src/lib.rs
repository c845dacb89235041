//! Client for the Power BI REST API.
//!
//! ```no_run
//! use powerbi::types::{ClientId, Username};
//! use powerbi::{AccessLevel, PowerBiClient};
//!
//! let mut client = PowerBiClient::new(
//!     Username::from("someone@contoso.com"),
//!     "password".to_string(),
//!     ClientId::from("00000000-0000-0000-0000-000000000000"),
//! )?;
//! client.connect()?;
//! if let Some(report) = client.get_report_by_name("Sales", Some("Finance"))? {
//!     let token = report.get_token(AccessLevel::View, None)?;
//!     println!("{}: {}", report, token);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod auth;
mod client;
pub mod constants;
pub mod endpoints;
pub mod errors;
pub mod models;
pub mod routes;
pub mod types;

pub use client::builder::PowerBiClientBuilder;
pub use client::session::PowerBiClient;
pub use endpoints::Endpoints;
pub use models::{Dataset, EffectiveIdentity, Report, Workspace};
pub use types::AccessLevel;

pub use reqwest;
