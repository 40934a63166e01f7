//! Remote API operations consumed by the stores

pub mod ports;

pub use ports::NowipApi;
