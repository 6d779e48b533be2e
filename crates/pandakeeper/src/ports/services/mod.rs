//! Service Ports
//!
//! Abstract interfaces for external collaborators.

mod content_source;
mod post_sink;

pub use content_source::*;
pub use post_sink::*;
