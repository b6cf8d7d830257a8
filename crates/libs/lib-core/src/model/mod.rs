//! # Model Layer
//!
//! Account entities and the stores that persist them.

pub mod store;
