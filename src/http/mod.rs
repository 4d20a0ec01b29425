//! HTTP protocol layer module
//!
//! Provides HTTP response builders, decoupled from the movie handlers.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_204_response, build_404_response, build_405_response, build_413_response,
    build_json_response, build_text_response,
};
