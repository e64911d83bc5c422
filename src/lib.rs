/// Consultation video grants: short-lived LiveKit access tokens that let one
/// identified user join one named consultation room

pub mod api;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod grant;
pub mod identity;
pub mod server;

pub use context::AppContext;
