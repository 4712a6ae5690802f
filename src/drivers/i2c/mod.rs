//! # Barramento I2C / SMBus
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │   I2cDriver (probe/remove)  ◀── I2cBus (descoberta) │
//! └─────────────────────────────────────────────────────┘
//!                          ↓
//! ┌─────────────────────────────────────────────────────┐
//! │   I2cClient  (addr, nome, flags, irq)               │
//! │   read_word_swapped(reg)                            │
//! └─────────────────────────────────────────────────────┘
//!                          ↓
//! ┌─────────────────────────────────────────────────────┐
//! │   I2cAdapter: HalAdapter (embedded-hal) | Stub      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! O núcleo trata uma leitura como uma única chamada bloqueante, sem
//! retry. Política de retry, se houver, pertence ao adaptador.

pub mod bus;
pub mod hal;
pub mod stub;

pub use bus::I2cBus;
pub use hal::HalAdapter;
pub use stub::StubAdapter;

use crate::core::logging::{Emit, Record};
use crate::drivers::base::{Driver, DriverError};
use alloc::string::String;
use alloc::sync::Arc;

bitflags::bitflags! {
    /// Funcionalidades de um adaptador (numeração do Linux)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct I2cFunc: u32 {
        const I2C = 0x0000_0001;
        const TEN_BIT_ADDR = 0x0000_0002;
        const PROTOCOL_MANGLING = 0x0000_0004;
        const SMBUS_PEC = 0x0000_0008;
        const NOSTART = 0x0000_0010;
        const SMBUS_QUICK = 0x0001_0000;
        const SMBUS_READ_BYTE = 0x0002_0000;
        const SMBUS_WRITE_BYTE = 0x0004_0000;
        const SMBUS_READ_BYTE_DATA = 0x0008_0000;
        const SMBUS_WRITE_BYTE_DATA = 0x0010_0000;
        const SMBUS_READ_WORD_DATA = 0x0020_0000;
        const SMBUS_WRITE_WORD_DATA = 0x0040_0000;

        const SMBUS_BYTE_DATA = Self::SMBUS_READ_BYTE_DATA.bits() | Self::SMBUS_WRITE_BYTE_DATA.bits();
        const SMBUS_WORD_DATA = Self::SMBUS_READ_WORD_DATA.bits() | Self::SMBUS_WRITE_WORD_DATA.bits();
    }
}

/// Erros de transação no barramento
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// Erro de protocolo (transação terminou antes do esperado)
    Bus,
    /// Arbitragem perdida (múltiplos controladores)
    ArbitrationLoss,
    /// Dispositivo não respondeu com ACK
    NoAcknowledge,
    /// Overrun no buffer de recepção
    Overrun,
    /// Timeout (provavelmente o dispositivo não está conectado)
    Timeout,
    /// Outro erro
    Other,
}

impl BusError {
    pub fn as_str(self) -> &'static str {
        match self {
            BusError::Bus => "bus",
            BusError::ArbitrationLoss => "arbitration-loss",
            BusError::NoAcknowledge => "nack",
            BusError::Overrun => "overrun",
            BusError::Timeout => "timeout",
            BusError::Other => "other",
        }
    }
}

impl From<embedded_hal::i2c::ErrorKind> for BusError {
    fn from(kind: embedded_hal::i2c::ErrorKind) -> Self {
        use embedded_hal::i2c::ErrorKind;

        match kind {
            ErrorKind::Bus => BusError::Bus,
            ErrorKind::ArbitrationLoss => BusError::ArbitrationLoss,
            ErrorKind::NoAcknowledge(_) => BusError::NoAcknowledge,
            ErrorKind::Overrun => BusError::Overrun,
            _ => BusError::Other,
        }
    }
}

impl Emit for BusError {
    fn emit(&self, rec: &mut Record) {
        rec.push_str(self.as_str());
    }
}

/// Adaptador (controlador) I2C
pub trait I2cAdapter: Send + Sync {
    /// Nome do adaptador
    fn name(&self) -> &str {
        "i2c"
    }

    /// Funcionalidades suportadas
    fn functionality(&self) -> I2cFunc;

    /// SMBus "read word data": escreve `command`, lê 2 bytes (LSB primeiro)
    fn smbus_read_word_data(&self, addr: u16, command: u8) -> Result<u16, BusError>;
}

/// Descrição de um dispositivo encontrado no barramento (device tree)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I2cBoardInfo {
    pub compatible: String,
    pub name: String,
    pub addr: u16,
    pub flags: u16,
    pub irq: i32,
}

impl I2cBoardInfo {
    /// Cria a partir de uma string `"fabricante,modelo"`; o nome é o modelo
    pub fn new(compatible: &str, addr: u16) -> Self {
        let name = compatible
            .split_once(',')
            .map(|(_, model)| model)
            .unwrap_or(compatible);
        Self {
            compatible: String::from(compatible),
            name: String::from(name),
            addr,
            flags: 0,
            irq: 0,
        }
    }

    pub fn with_flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_irq(mut self, irq: i32) -> Self {
        self.irq = irq;
        self
    }
}

/// Dispositivo endereçável num adaptador
pub struct I2cClient {
    addr: u16,
    name: String,
    flags: u16,
    irq: i32,
    adapter: Arc<dyn I2cAdapter>,
}

impl I2cClient {
    pub fn new(info: &I2cBoardInfo, adapter: Arc<dyn I2cAdapter>) -> Self {
        Self {
            addr: info.addr,
            name: info.name.clone(),
            flags: info.flags,
            irq: info.irq,
            adapter,
        }
    }

    pub fn addr(&self) -> u16 {
        self.addr
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flags(&self) -> u16 {
        self.flags
    }

    pub fn irq(&self) -> i32 {
        self.irq
    }

    /// O adaptador oferece todas as funcionalidades pedidas?
    pub fn check_functionality(&self, func: I2cFunc) -> bool {
        self.adapter.functionality().contains(func)
    }

    /// Lê um registrador de 16 bits enviado MSB primeiro
    pub fn read_word_swapped(&self, reg: u8) -> Result<u16, BusError> {
        self.adapter
            .smbus_read_word_data(self.addr, reg)
            .map(u16::swap_bytes)
    }
}

/// Entrada da tabela de compatibilidade (of_device_id)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfDeviceId {
    pub compatible: &'static str,
}

/// Driver de dispositivo I2C
pub trait I2cDriver: Driver {
    /// Strings `compatible` atendidas
    fn of_match_table(&self) -> &'static [OfDeviceId];

    /// Chamado quando um dispositivo compatível aparece
    fn probe(&self, client: &Arc<I2cClient>) -> Result<(), DriverError>;

    /// Chamado quando o dispositivo desaparece (uma vez por probe bem-sucedido)
    fn remove(&self, client: &I2cClient);

    fn matches(&self, compatible: &str) -> bool {
        self.of_match_table()
            .iter()
            .any(|id| id.compatible == compatible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_info_name_from_compatible() {
        let info = I2cBoardInfo::new("mz,mcp9808mz", 0x18);
        assert_eq!(info.name, "mcp9808mz");
        let plain = I2cBoardInfo::new("lm75", 0x48).with_irq(7).with_flags(2);
        assert_eq!(plain.name, "lm75");
        assert_eq!(plain.irq, 7);
        assert_eq!(plain.flags, 2);
    }

    #[test]
    fn test_read_word_swapped() {
        let stub = Arc::new(StubAdapter::new());
        stub.set_register(0x18, 0x05, 0xC1A2);
        let client = I2cClient::new(&I2cBoardInfo::new("mz,mcp9808mz", 0x18), stub.clone());
        assert_eq!(client.read_word_swapped(0x05), Ok(0xC1A2));
        assert_eq!(stub.transactions(), 1);
    }

    #[test]
    fn test_functionality_check() {
        let stub = Arc::new(StubAdapter::with_functionality(I2cFunc::I2C | I2cFunc::SMBUS_BYTE_DATA));
        let client = I2cClient::new(&I2cBoardInfo::new("x,y", 0x10), stub);
        assert!(client.check_functionality(I2cFunc::SMBUS_READ_BYTE_DATA));
        assert!(!client.check_functionality(I2cFunc::SMBUS_READ_WORD_DATA));
    }
}
