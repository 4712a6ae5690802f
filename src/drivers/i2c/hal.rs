//! Ponte para controladores `embedded-hal`
//!
//! Qualquer periférico que implemente `embedded_hal::i2c::I2c` (endereços
//! de 7 bits) vira um [`I2cAdapter`]. O SMBus "read word data" é emulado
//! com um `write_read` de 1 byte de comando e 2 bytes de dados.

use super::{BusError, I2cAdapter, I2cFunc};
use embedded_hal::i2c::{Error as _, I2c};
use spin::Mutex;

pub struct HalAdapter<I> {
    name: &'static str,
    i2c: Mutex<I>,
}

impl<I> HalAdapter<I> {
    pub const fn new(name: &'static str, i2c: I) -> Self {
        Self {
            name,
            i2c: Mutex::new(i2c),
        }
    }

    /// Devolve o periférico
    pub fn release(self) -> I {
        self.i2c.into_inner()
    }
}

impl<I: I2c + Send> I2cAdapter for HalAdapter<I> {
    fn name(&self) -> &str {
        self.name
    }

    fn functionality(&self) -> I2cFunc {
        // I2C puro emula as transações SMBus de byte e word
        I2cFunc::I2C | I2cFunc::SMBUS_BYTE_DATA | I2cFunc::SMBUS_WORD_DATA
    }

    fn smbus_read_word_data(&self, addr: u16, command: u8) -> Result<u16, BusError> {
        let addr = u8::try_from(addr)
            .ok()
            .filter(|a| *a <= 0x7F)
            .ok_or(BusError::Other)?;

        let mut buf = [0u8; 2];
        self.i2c
            .lock()
            .write_read(addr, &[command], &mut buf)
            .map_err(|e| BusError::from(e.kind()))?;

        Ok(u16::from_le_bytes(buf))
    }
}
