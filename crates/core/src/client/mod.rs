//! Client configuration: base URL and bearer credentials

pub mod ports;
pub mod settings;

pub use ports::ClientConfigurator;
pub use settings::{ClientSettings, AUTHORIZATION_HEADER};
