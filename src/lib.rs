//! MCP9808 Driver Library.
//!
//! Driver I2C para o sensor de temperatura MCP9808, exposto como
//! dispositivo de caractere (`/dev/<nome><addr>`) com um único ioctl.
//!
//! ```text
//! I2cBus (descoberta) ──probe──▶ Mcp9808Driver ──publish──▶ DevFS
//!                                     │                       │
//!                                     ▼                       ▼
//!                              Mcp9808Device ◀──ioctl──── FileHandle
//!                                     │
//!                                     ▼
//!                            I2cClient::read_word_swapped(0x05)
//! ```

#![cfg_attr(not(test), no_std)]

// Habilitar alocação dinâmica (necessário para Vec/Box/Arc)
extern crate alloc;

// --- Infraestrutura ---
pub mod core; // Logging
pub mod klib; // Bitmap, framework de self-test
pub mod sys; // Errno, codificação de ioctl

// --- Subsistemas ---
pub mod drivers; // Modelo de drivers, barramento I2C, sensores
pub mod fs; // DevFS (nós de dispositivo e handles)

pub use crate::drivers::base::DriverError;
pub use crate::drivers::sensors::mcp9808::{Mcp9808Module, TempReading, IOCTL_MCP9808_READ_TEMP};
pub use crate::fs::devfs::DevFS;
pub use crate::sys::error::Errno;
