//! Registro das instâncias vivas
//!
//! Um único valor com ciclo de vida explícito: criado no carregamento do
//! driver com a região de minors e a classe, alterado a cada probe/remove,
//! desmontado no descarregamento.
//!
//! # Política de minors
//!
//! Menor slot livre de um bitmap de [`MAX_DEV`] bits. Slots liberados por
//! remoção são reutilizados; com [`MAX_DEV`] instâncias vivas a próxima
//! descoberta falha com `AllocationFailed`.

use super::config::MAX_DEV;
use super::device::Mcp9808Device;
use crate::core::logging::Dec;
use crate::drivers::base::{DeviceClass, DriverError};
use crate::drivers::i2c::{I2cClient, I2cFunc};
use crate::fs::devfs::{ChrdevRegion, DevFS};
use crate::klib::Bitmap;
use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// Funcionalidade exigida do adaptador (leitura de word SMBus)
pub const REQUIRED_FUNC: I2cFunc = I2cFunc::SMBUS_READ_WORD_DATA;

pub struct Registry {
    region: ChrdevRegion,
    class: DeviceClass,
    minors: Bitmap<1>,
    /// addr -> instância
    instances: BTreeMap<u16, Arc<Mcp9808Device>>,
}

impl Registry {
    pub fn new(region: ChrdevRegion, class: DeviceClass) -> Self {
        Self {
            region,
            class,
            minors: Bitmap::new(MAX_DEV),
            instances: BTreeMap::new(),
        }
    }

    pub fn region(&self) -> &ChrdevRegion {
        &self.region
    }

    /// Quantidade de instâncias vivas
    pub fn live_count(&self) -> usize {
        self.instances.len()
    }

    pub fn instance(&self, addr: u16) -> Option<Arc<Mcp9808Device>> {
        self.instances.get(&addr).cloned()
    }

    /// Cria e publica a instância de um sensor recém-descoberto
    pub fn on_device_discovered(
        &mut self,
        client: &Arc<I2cClient>,
    ) -> Result<Arc<Mcp9808Device>, DriverError> {
        if !client.check_functionality(REQUIRED_FUNC) {
            crate::kbug!("(MCP9808)", "addr=", client.addr(), " adaptador sem word read");
            return Err(DriverError::CapabilityUnsupported);
        }

        if self.instances.contains_key(&client.addr()) {
            crate::kbug!("(MCP9808)", "addr=", client.addr(), " já associado");
            return Err(DriverError::AlreadyBound);
        }

        let slot = self.minors.find_first_zero().ok_or_else(|| {
            crate::kbug!("(MCP9808)", "sem minors livres, addr=", client.addr());
            DriverError::AllocationFailed
        })?;
        let devt = self
            .region
            .devt(slot as u32)
            .ok_or(DriverError::AllocationFailed)?;

        let device = Arc::new(Mcp9808Device::new(client.clone(), devt));

        // Nada foi reservado ainda: uma publicação falha não deixa resíduo
        self.class.device_create(device.clone()).map_err(|e| {
            crate::kbug!("(MCP9808)", device.node_name(), " publicação: ", e);
            DriverError::PublishFailed(e)
        })?;

        self.minors.set(slot);
        self.instances.insert(client.addr(), device.clone());

        crate::kinfo!(
            "(MCP9808) Dispositivo ",
            device.node_name(),
            " probed: addr=",
            client.addr(),
            ", flags=",
            Dec(client.flags() as u64),
            ", irq=",
            client.irq(),
            ", devt=",
            devt
        );
        Ok(device)
    }

    /// Remove e despublica a instância do sensor
    ///
    /// Remover um endereço sem instância só gera um aviso.
    pub fn on_device_removed(&mut self, client: &I2cClient) {
        let Some(device) = self.instances.remove(&client.addr()) else {
            crate::kwarn!("(MCP9808) remove sem instância, addr=", client.addr());
            return;
        };
        self.release(&device);
        crate::kinfo!("(MCP9808) Dispositivo ", device.node_name(), " removido");
    }

    fn release(&mut self, device: &Mcp9808Device) {
        device.retire();
        let devt = device.devt();
        if let Err(e) = self.class.device_destroy(devt) {
            crate::kbug!("(MCP9808)", device.node_name(), " despublicação: ", e);
        }
        self.minors
            .clear((devt.minor - self.region.base().minor) as usize);
    }

    /// Desmonta o registro: classe destruída, região liberada
    ///
    /// O barramento já deve ter parado de entregar eventos para o driver.
    pub fn teardown(mut self, devfs: &DevFS) {
        if !self.instances.is_empty() {
            crate::kwarn!(
                "(MCP9808) teardown com instâncias vivas: ",
                Dec(self.instances.len() as u64)
            );
            let leftover: Vec<_> = core::mem::take(&mut self.instances).into_values().collect();
            for device in leftover {
                self.release(&device);
            }
        }
        self.minors.clear_all();

        let Registry { region, class, .. } = self;
        if let Err(e) = class.destroy() {
            crate::kbug!("(MCP9808)", "classe: ", e);
        }
        if let Err(e) = devfs.unregister_chrdev_region(&region) {
            crate::kbug!("(MCP9808)", "região: ", e);
        }
    }
}
