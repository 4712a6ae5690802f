//! Contrato ioctl do MCP9808 (versão 1)
//!
//! `READ_TEMP` entrega a palavra crua do registrador T_A em `temp`; o
//! chamador converte com [`convert_temp`] ou [`TempReading::celsius`].
//!
//! ```text
//! IOCTL_MCP9808_READ_TEMP = _IOR('M', 1, TempReading) = 0x8004_4D01
//! ```

use super::codec::{self, Celsius};
use super::config::{IOCTL_MAGIC, IOCTL_NR_READ_TEMP};
use crate::sys::ioctl::ior;
use core::mem::size_of;

/// Resultado do READ_TEMP (layout C, 4 bytes em ordem nativa)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TempReading {
    /// Palavra crua do registrador (16 bits baixos)
    pub temp: u32,
}

impl TempReading {
    pub const SIZE: usize = size_of::<Self>();

    pub const fn from_raw(raw: u16) -> Self {
        Self { temp: raw as u32 }
    }

    pub const fn raw(self) -> u16 {
        self.temp as u16
    }

    pub const fn decoded(self) -> Celsius {
        codec::decode(self.raw())
    }

    pub fn celsius(self) -> f32 {
        convert_temp(self.temp)
    }

    pub fn to_bytes(self) -> [u8; 4] {
        self.temp.to_ne_bytes()
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            temp: u32::from_ne_bytes(bytes),
        }
    }
}

pub const IOCTL_MCP9808_READ_TEMP: u32 = ior(IOCTL_MAGIC, IOCTL_NR_READ_TEMP, TempReading::SIZE);

/// Converte a palavra do registrador em °C
pub fn convert_temp(x: u32) -> f32 {
    codec::decode(x as u16).as_f32()
}
