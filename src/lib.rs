//! Engine behind a personal portfolio site: the hero typewriter and scroll reveal animations,
//! the profile content, and the contact inbox API.

pub mod animations;
pub mod config;
pub mod contact;
pub mod logging;
pub mod portfolio;
pub mod preview;
pub mod server;

pub use config::{Config, ConfigLoadError};
