//! Drivers de sensores

pub mod mcp9808; // Temperatura ambiente (I2C)
