//! Adaptador I2C em memória
//!
//! Mantém um banco de registradores por endereço, permite injetar falhas
//! e conta transações. Usado pelos testes e pelo cliente de demonstração.

use super::{BusError, I2cAdapter, I2cFunc};
use alloc::collections::BTreeMap;
use core::sync::atomic::{AtomicUsize, Ordering};
use spin::Mutex;

pub struct StubAdapter {
    func: I2cFunc,
    /// (addr, reg) -> valor do registrador (como o sensor o define, MSB primeiro)
    regs: Mutex<BTreeMap<(u16, u8), u16>>,
    /// Falhas injetadas por endereço
    faults: Mutex<BTreeMap<u16, BusError>>,
    transactions: AtomicUsize,
}

impl StubAdapter {
    /// Adaptador com I2C puro + SMBus byte/word
    pub fn new() -> Self {
        Self::with_functionality(I2cFunc::I2C | I2cFunc::SMBUS_BYTE_DATA | I2cFunc::SMBUS_WORD_DATA)
    }

    pub fn with_functionality(func: I2cFunc) -> Self {
        Self {
            func,
            regs: Mutex::new(BTreeMap::new()),
            faults: Mutex::new(BTreeMap::new()),
            transactions: AtomicUsize::new(0),
        }
    }

    /// Define o valor de um registrador do dispositivo em `addr`
    pub fn set_register(&self, addr: u16, reg: u8, value: u16) {
        self.regs.lock().insert((addr, reg), value);
    }

    /// Toda transação para `addr` passa a falhar com `err`
    pub fn fail_address(&self, addr: u16, err: BusError) {
        self.faults.lock().insert(addr, err);
    }

    pub fn clear_failure(&self, addr: u16) {
        self.faults.lock().remove(&addr);
    }

    /// Transações tentadas até agora (inclusive as que falharam)
    pub fn transactions(&self) -> usize {
        self.transactions.load(Ordering::SeqCst)
    }
}

impl Default for StubAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl I2cAdapter for StubAdapter {
    fn name(&self) -> &str {
        "i2c-stub"
    }

    fn functionality(&self) -> I2cFunc {
        self.func
    }

    fn smbus_read_word_data(&self, addr: u16, command: u8) -> Result<u16, BusError> {
        self.transactions.fetch_add(1, Ordering::SeqCst);

        if let Some(err) = self.faults.lock().get(&addr) {
            return Err(*err);
        }

        // SMBus entrega LSB primeiro; o sensor envia MSB primeiro
        self.regs
            .lock()
            .get(&(addr, command))
            .map(|v| v.swap_bytes())
            .ok_or(BusError::NoAcknowledge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_device_nacks() {
        let stub = StubAdapter::new();
        assert_eq!(stub.smbus_read_word_data(0x20, 0x05), Err(BusError::NoAcknowledge));
        assert_eq!(stub.transactions(), 1);
    }

    #[test]
    fn test_injected_failure_and_recovery() {
        let stub = StubAdapter::new();
        stub.set_register(0x18, 0x05, 0x0050);
        stub.fail_address(0x18, BusError::Timeout);
        assert_eq!(stub.smbus_read_word_data(0x18, 0x05), Err(BusError::Timeout));
        stub.clear_failure(0x18);
        assert_eq!(stub.smbus_read_word_data(0x18, 0x05), Ok(0x5000));
    }
}
