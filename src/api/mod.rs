//! API endpoint modules.

pub mod balance;
pub mod health;
pub mod openapi;

pub use balance::configure_routes as configure_balance_routes;
pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use openapi::configure_routes as configure_openapi_routes;
