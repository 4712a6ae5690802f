//! Device Registry - Registro de nós publicados em /dev

use super::device::{Device, DeviceNumber};
use crate::sys::error::Errno;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// Número máximo de nós
pub const MAX_DEVICES: usize = 256;

// Entrada no registro de dispositivos
struct DeviceEntry {
    class: String,
    device: Arc<dyn Device>,
}

/// Registro de dispositivos
pub struct DeviceRegistry {
    devices: Vec<DeviceEntry>,
}

impl DeviceRegistry {
    /// Cria um novo registro
    pub const fn new() -> Self {
        Self {
            devices: Vec::new(),
        }
    }

    /// Registra um dispositivo sob uma classe
    pub fn register(&mut self, class: &str, device: Arc<dyn Device>) -> Result<(), Errno> {
        if self.devices.len() >= MAX_DEVICES {
            return Err(Errno::ENOSPC);
        }

        let dev = device.device_number();
        if self
            .devices
            .iter()
            .any(|e| e.device.name() == device.name() || e.device.device_number() == dev)
        {
            return Err(Errno::EEXIST);
        }

        self.devices.push(DeviceEntry {
            class: String::from(class),
            device,
        });
        Ok(())
    }

    /// Remove um dispositivo, devolvendo a referência que o registro tinha
    pub fn unregister(&mut self, dev: DeviceNumber) -> Result<Arc<dyn Device>, Errno> {
        let pos = self
            .devices
            .iter()
            .position(|e| e.device.device_number() == dev)
            .ok_or(Errno::ENOENT)?;
        Ok(self.devices.remove(pos).device)
    }

    /// Busca um dispositivo por nome
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Device>> {
        self.devices
            .iter()
            .find(|e| e.device.name() == name)
            .map(|e| e.device.clone())
    }

    /// Quantos nós pertencem à classe
    pub fn count_in_class(&self, class: &str) -> usize {
        self.devices.iter().filter(|e| e.class == class).count()
    }

    pub fn count(&self) -> usize {
        self.devices.len()
    }

    /// Nomes publicados, em ordem de registro
    pub fn names(&self) -> Vec<String> {
        self.devices
            .iter()
            .map(|e| String::from(e.device.name()))
            .collect()
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
