//! # Driver Layer
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │        Consumidor (open/ioctl/close)        │
//! └─────────────────────────────────────────────┘
//!                      ↑
//!                /dev/mcp9808mz18
//!                      ↑
//! ┌─────────────────────────────────────────────┐
//! │  sensors/mcp9808  - registro + ioctl        │
//! │  base             - Driver, DriverError,    │
//! │                     DeviceClass             │
//! │  i2c              - adaptador, cliente,     │
//! │                     descoberta (I2cBus)     │
//! └─────────────────────────────────────────────┘
//! ```

pub mod base; // Modelo de drivers
pub mod i2c; // Barramento I2C/SMBus
pub mod sensors; // Sensores
