//! Tools HTTP adapter - REST API for the lookup tools.
//!
//! Provides endpoints for:
//! - Listing the tool catalogue
//! - Invoking a single tool by name

pub mod dto;
pub mod handlers;
pub mod routes;

// Export DTOs for external use
pub use dto::*;

// Export handlers state and router
pub use handlers::ToolsAppState;
pub use routes::tools_router;
