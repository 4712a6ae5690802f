//! # Driver MCP9808
//!
//! Sensor de temperatura I2C exposto como dispositivo de caractere.
//!
//! ```text
//! load ─▶ alloc_chrdev_region ─▶ class "mcp" ─▶ register_driver
//!                                                  │ probe (compatible "mz,mcp9808mz")
//!                                                  ▼
//!                                   Registry::on_device_discovered
//!                                                  │
//!                                   /dev/<nome><addr> ◀── open/ioctl/close
//! unload ─▶ del_driver (remove tudo) ─▶ Registry::teardown
//! ```
//!
//! # Módulos
//!
//! - `config` - Constantes do driver
//! - `codec` - Conversão do registrador T_A
//! - `ioctl` - Contrato READ_TEMP
//! - `device` - Instância por sensor (Device)
//! - `registry` - Instâncias vivas e minors

pub mod codec;
pub mod config;
pub mod device;
pub mod ioctl;
pub mod registry;



pub use codec::{decode, Celsius};
pub use device::Mcp9808Device;
pub use ioctl::{convert_temp, TempReading, IOCTL_MCP9808_READ_TEMP};
pub use registry::Registry;

use crate::drivers::base::{DeviceClass, DeviceType, Driver, DriverError};
use crate::drivers::i2c::{I2cBus, I2cClient, I2cDriver, OfDeviceId};
use crate::fs::devfs::DevFS;
use crate::sys::error::Errno;
use alloc::sync::Arc;
use config::{CLASS_NAME, COMPATIBLE, DRV_NAME, MAX_DEV};
use spin::Mutex;

static OF_MATCH: [OfDeviceId; 1] = [OfDeviceId {
    compatible: COMPATIBLE,
}];

/// Driver I2C; `None` depois do teardown
pub struct Mcp9808Driver {
    registry: Mutex<Option<Registry>>,
}

impl Mcp9808Driver {
    fn new(registry: Registry) -> Self {
        Self {
            registry: Mutex::new(Some(registry)),
        }
    }

    pub fn live_count(&self) -> usize {
        self.registry.lock().as_ref().map_or(0, Registry::live_count)
    }

    pub fn instance(&self, addr: u16) -> Option<Arc<Mcp9808Device>> {
        self.registry.lock().as_ref().and_then(|r| r.instance(addr))
    }

    pub fn major(&self) -> Option<u32> {
        self.registry.lock().as_ref().map(|r| r.region().major())
    }

    fn take_registry(&self) -> Option<Registry> {
        self.registry.lock().take()
    }
}

impl Driver for Mcp9808Driver {
    fn name(&self) -> &'static str {
        DRV_NAME
    }

    fn device_type(&self) -> DeviceType {
        DeviceType::Sensor
    }
}

impl I2cDriver for Mcp9808Driver {
    fn of_match_table(&self) -> &'static [OfDeviceId] {
        &OF_MATCH
    }

    fn probe(&self, client: &Arc<I2cClient>) -> Result<(), DriverError> {
        match self.registry.lock().as_mut() {
            Some(registry) => registry.on_device_discovered(client).map(|_| ()),
            None => {
                crate::kbug!("(MCP9808)", "probe depois do teardown");
                Err(DriverError::InitFailed(Errno::ENODEV))
            }
        }
    }

    fn remove(&self, client: &I2cClient) {
        match self.registry.lock().as_mut() {
            Some(registry) => registry.on_device_removed(client),
            None => crate::kwarn!("(MCP9808) remove depois do teardown, addr=", client.addr()),
        }
    }
}

/// Driver carregado: região, classe e registro no barramento
pub struct Mcp9808Module {
    devfs: Arc<DevFS>,
    bus: Arc<I2cBus>,
    driver: Arc<Mcp9808Driver>,
}

impl Mcp9808Module {
    /// Carrega o driver. Qualquer falha desfaz o que já foi adquirido.
    pub fn load(devfs: Arc<DevFS>, bus: Arc<I2cBus>) -> Result<Self, DriverError> {
        crate::kinfo!("(MCP9808) Driver ", DRV_NAME, " init");

        #[cfg(feature = "self_test")]
        {
            if !test::run_codec_tests().ok() {
                crate::kbug!("(MCP9808)", "self-test do codec");
                return Err(DriverError::InitFailed(Errno::EIO));
            }
        }

        let region = devfs
            .alloc_chrdev_region(0, MAX_DEV as u32, DRV_NAME)
            .map_err(|e| {
                crate::kbug!("(MCP9808)", "alloc_chrdev_region: ", e);
                DriverError::InitFailed(e)
            })?;

        let class = match DeviceClass::create(CLASS_NAME, devfs.clone()) {
            Ok(class) => class,
            Err(e) => {
                crate::kbug!("(MCP9808)", "class_create: ", e);
                let _ = devfs.unregister_chrdev_region(&region);
                return Err(DriverError::InitFailed(e));
            }
        };

        let driver = Arc::new(Mcp9808Driver::new(Registry::new(region, class)));

        if let Err(e) = bus.register_driver(driver.clone()) {
            crate::kbug!("(MCP9808)", "register_driver: ", e);
            if let Some(registry) = driver.take_registry() {
                registry.teardown(&devfs);
            }
            return Err(DriverError::InitFailed(e));
        }

        crate::kok!("(MCP9808) Driver carregado");
        Ok(Self { devfs, bus, driver })
    }

    /// Descarrega: primeiro o barramento para de entregar eventos
    /// (removendo toda instância), depois o registro é desmontado
    pub fn unload(self) {
        if let Err(e) = self.bus.del_driver(DRV_NAME) {
            crate::kbug!("(MCP9808)", "del_driver: ", e);
        }
        if let Some(registry) = self.driver.take_registry() {
            registry.teardown(&self.devfs);
        }
        crate::kinfo!("(MCP9808) Driver ", DRV_NAME, " exit");
    }

    pub fn driver(&self) -> &Arc<Mcp9808Driver> {
        &self.driver
    }
}
