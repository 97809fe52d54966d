//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that the registry calls to authenticate signed updates

pub mod inbound;
