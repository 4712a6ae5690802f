//! Testes para o módulo Filesystem
//!
//! # Como Executar os Testes
//!
//! ```bash
//! # Executar todos os testes de filesystem
//! cargo test --lib fs::tests
//!
//! # Executar um teste específico
//! cargo test --lib fs::tests::devfs::test_open_resolves_published_node
//! ```
//!
//! # Convenções
//!
//! - Prefixo `test_` para testes unitários
//! - Dispositivos falsos ficam neste arquivo, compartilhados pelos testes

#![cfg(test)]

pub mod devfs;

use crate::fs::devfs::{Device, DeviceNumber, DeviceType, OpenFlags, UserBuffer};
use crate::sys::error::Errno;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::string::String;

/// Dispositivo de teste: ioctl 0 devolve o próprio minor
pub struct EchoDevice {
    pub name: String,
    pub dev: DeviceNumber,
    pub opens: AtomicUsize,
    pub closes: AtomicUsize,
}

impl EchoDevice {
    pub fn new(name: &str, dev: DeviceNumber) -> Self {
        Self {
            name: String::from(name),
            dev,
            opens: AtomicUsize::new(0),
            closes: AtomicUsize::new(0),
        }
    }
}

impl Device for EchoDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn device_type(&self) -> DeviceType {
        DeviceType::Character
    }

    fn device_number(&self) -> DeviceNumber {
        self.dev
    }

    fn open(&self, _flags: OpenFlags) -> Result<(), Errno> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }

    fn ioctl(&self, cmd: u32, arg: Option<&mut dyn UserBuffer>) -> Result<usize, Errno> {
        match cmd {
            0 => {
                let out = arg.ok_or(Errno::EINVAL)?;
                out.copy_to_user(&self.dev.minor.to_ne_bytes())?;
                Ok(0)
            }
            _ => Err(Errno::ENOTTY),
        }
    }
}
