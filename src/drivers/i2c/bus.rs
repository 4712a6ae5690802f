//! Barramento I2C - associação cliente ↔ driver
//!
//! Um único lock serializa descoberta, remoção e registro de drivers;
//! `probe` e `remove` rodam com ele adquirido. Drivers não devem chamar o
//! barramento de volta a partir desses callbacks.

use super::{I2cAdapter, I2cBoardInfo, I2cClient, I2cDriver};
use crate::sys::error::Errno;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use spin::Mutex;

/// Endereço mais alto no modo de 7 bits
const ADDR_7BIT_MAX: u16 = 0x7F;

struct Binding {
    client: Arc<I2cClient>,
    compatible: String,
    driver: Option<Arc<dyn I2cDriver>>,
}

struct BusState {
    drivers: Vec<Arc<dyn I2cDriver>>,
    bindings: Vec<Binding>,
}

pub struct I2cBus {
    adapter: Arc<dyn I2cAdapter>,
    state: Mutex<BusState>,
}

impl I2cBus {
    pub fn new(adapter: Arc<dyn I2cAdapter>) -> Self {
        Self {
            adapter,
            state: Mutex::new(BusState {
                drivers: Vec::new(),
                bindings: Vec::new(),
            }),
        }
    }

    pub fn adapter(&self) -> &Arc<dyn I2cAdapter> {
        &self.adapter
    }

    /// Um dispositivo apareceu no barramento
    pub fn add_device(&self, info: I2cBoardInfo) -> Result<Arc<I2cClient>, Errno> {
        if info.addr > ADDR_7BIT_MAX {
            return Err(Errno::EINVAL);
        }

        let mut state = self.state.lock();
        if state.bindings.iter().any(|b| b.client.addr() == info.addr) {
            return Err(Errno::EBUSY);
        }

        let client = Arc::new(I2cClient::new(&info, self.adapter.clone()));
        crate::ktrace!("(I2C) Novo cliente ", info.name, " addr=", info.addr);

        let driver = state
            .drivers
            .iter()
            .find(|d| d.matches(&info.compatible))
            .cloned()
            .filter(|d| try_probe(d.as_ref(), &client));

        state.bindings.push(Binding {
            client: client.clone(),
            compatible: info.compatible,
            driver,
        });
        Ok(client)
    }

    /// Um dispositivo saiu do barramento
    pub fn remove_device(&self, addr: u16) -> Result<(), Errno> {
        let mut state = self.state.lock();
        let pos = state
            .bindings
            .iter()
            .position(|b| b.client.addr() == addr)
            .ok_or(Errno::ENODEV)?;

        let binding = state.bindings.remove(pos);
        if let Some(driver) = binding.driver {
            driver.remove(&binding.client);
        }
        crate::ktrace!("(I2C) Cliente removido addr=", addr);
        Ok(())
    }

    /// Registra um driver e faz probe dos clientes compatíveis já presentes
    pub fn register_driver(&self, driver: Arc<dyn I2cDriver>) -> Result<(), Errno> {
        let mut state = self.state.lock();
        if state.drivers.iter().any(|d| d.name() == driver.name()) {
            return Err(Errno::EEXIST);
        }

        for binding in state.bindings.iter_mut() {
            if binding.driver.is_none()
                && driver.matches(&binding.compatible)
                && try_probe(driver.as_ref(), &binding.client)
            {
                binding.driver = Some(driver.clone());
            }
        }

        crate::kdebug!("(I2C) Driver registrado: ", driver.name());
        state.drivers.push(driver);
        Ok(())
    }

    /// Remove um driver: desassocia (remove) todos os seus clientes e o esquece
    pub fn del_driver(&self, name: &str) -> Result<(), Errno> {
        let mut state = self.state.lock();
        let pos = state
            .drivers
            .iter()
            .position(|d| d.name() == name)
            .ok_or(Errno::ENOENT)?;
        let driver = state.drivers.remove(pos);

        for binding in state.bindings.iter_mut() {
            if binding.driver.as_ref().is_some_and(|d| d.name() == name) {
                driver.remove(&binding.client);
                binding.driver = None;
            }
        }

        crate::kdebug!("(I2C) Driver removido: ", name);
        Ok(())
    }

    /// Existe cliente neste endereço?
    pub fn has_client(&self, addr: u16) -> bool {
        self.state
            .lock()
            .bindings
            .iter()
            .any(|b| b.client.addr() == addr)
    }

    /// O cliente neste endereço está associado a algum driver?
    pub fn is_bound(&self, addr: u16) -> bool {
        self.state
            .lock()
            .bindings
            .iter()
            .any(|b| b.client.addr() == addr && b.driver.is_some())
    }

    pub fn client_count(&self) -> usize {
        self.state.lock().bindings.len()
    }
}

fn try_probe(driver: &dyn I2cDriver, client: &Arc<I2cClient>) -> bool {
    match driver.probe(client) {
        Ok(()) => true,
        Err(e) => {
            crate::kwarn!(
                "(I2C) probe de ",
                driver.name(),
                " falhou addr=",
                client.addr(),
                ": ",
                e
            );
            false
        }
    }
}
