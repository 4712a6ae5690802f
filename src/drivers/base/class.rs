//! Classes de dispositivo e publicação de nós
//!
//! Um driver não fala com o DevFS diretamente: ele cria uma
//! [`DeviceClass`] sobre algum [`NodePublisher`] e publica/remove nós
//! através dela (equivalente a `class_create` / `device_create`).

use crate::fs::devfs::{Device, DeviceNumber};
use crate::sys::error::Errno;
use alloc::string::String;
use alloc::sync::Arc;

/// Subsistema capaz de tornar um dispositivo visível por nome
pub trait NodePublisher: Send + Sync {
    /// Registra uma classe (namespace de nós)
    fn register_class(&self, class: &str) -> Result<(), Errno>;

    /// Remove uma classe registrada
    fn unregister_class(&self, class: &str) -> Result<(), Errno>;

    /// Publica o nó `device.name()` sob a classe
    fn publish(&self, class: &str, device: Arc<dyn Device>) -> Result<(), Errno>;

    /// Remove o nó publicado com este device number
    fn unpublish(&self, dev: DeviceNumber) -> Result<(), Errno>;
}

/// Classe de dispositivo criada por um driver
pub struct DeviceClass {
    name: String,
    publisher: Arc<dyn NodePublisher>,
}

impl DeviceClass {
    /// Cria a classe no publicador
    pub fn create(name: &str, publisher: Arc<dyn NodePublisher>) -> Result<Self, Errno> {
        publisher.register_class(name)?;
        crate::kdebug!("(Class) Classe criada: ", name);
        Ok(Self {
            name: String::from(name),
            publisher,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Publica um nó desta classe
    pub fn device_create(&self, device: Arc<dyn Device>) -> Result<(), Errno> {
        self.publisher.publish(&self.name, device)
    }

    /// Remove um nó desta classe
    pub fn device_destroy(&self, dev: DeviceNumber) -> Result<(), Errno> {
        self.publisher.unpublish(dev)
    }

    /// Remove a classe do publicador
    pub fn destroy(self) -> Result<(), Errno> {
        crate::kdebug!("(Class) Classe destruída: ", self.name);
        self.publisher.unregister_class(&self.name)
    }
}
