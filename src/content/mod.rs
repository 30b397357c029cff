//! Provider-agnostic core: classification, continuation resolution,
//! comment tree rendering and result projection

pub mod classify;
pub mod format;
pub mod model;
pub mod project;
pub mod resolve;
