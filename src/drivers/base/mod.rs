//! Modelo de Drivers Base

pub mod class;
pub mod driver;

pub use class::{DeviceClass, NodePublisher};
pub use driver::DeviceType;
pub use driver::Driver;
pub use driver::DriverError;
