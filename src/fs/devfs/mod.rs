//! DevFS - Device Filesystem
//!
//! Sistema de arquivos para dispositivos (/dev).
//!
//! # Responsabilidades
//!
//! - Alocar regiões de device numbers para drivers de caractere
//! - Manter as classes registradas (ex: `mcp`)
//! - Publicar/remover nós por nome ([`NodePublisher`])
//! - Resolver `open("/dev/<nome>")` para um [`FileHandle`]
//!
//! # Módulos
//!
//! - `device` - Trait Device e tipos base
//! - `char_device` - Regiões de major/minor
//! - `registry` - Registro de nós publicados
//! - `operations` - Flags, buffers do chamador, handles

pub mod char_device;
pub mod device;
pub mod operations;
pub mod registry;

// Re-exports públicos
pub use char_device::ChrdevRegion;
pub use device::{Device, DeviceNumber, DeviceType};
pub use operations::{FileHandle, OpenFlags, UserBuffer, UserSlice};
pub use registry::DeviceRegistry;

use crate::drivers::base::class::NodePublisher;
use crate::sys::error::Errno;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use spin::Mutex;

/// Primeiro major dinâmico tentado (desce até o último)
pub const CHRDEV_MAJOR_DYN_START: u32 = 254;
/// Último major dinâmico
pub const CHRDEV_MAJOR_DYN_END: u32 = 234;

/// Maior minor representável (20 bits)
const MINOR_MAX: u32 = 0xFFFFF;

/// DevFS - Device Filesystem
pub struct DevFS {
    /// Registro de nós publicados
    registry: Mutex<DeviceRegistry>,
    /// Regiões de device numbers reservadas
    regions: Mutex<Vec<ChrdevRegion>>,
    /// Classes registradas
    classes: Mutex<Vec<String>>,
}

impl DevFS {
    /// Cria uma nova instância de DevFS
    pub const fn new() -> Self {
        Self {
            registry: Mutex::new(DeviceRegistry::new()),
            regions: Mutex::new(Vec::new()),
            classes: Mutex::new(Vec::new()),
        }
    }

    // =========================================================================
    // REGIÕES DE DEVICE NUMBERS
    // =========================================================================

    /// Reserva `count` minors a partir de `first_minor` num major dinâmico
    pub fn alloc_chrdev_region(
        &self,
        first_minor: u32,
        count: u32,
        name: &str,
    ) -> Result<ChrdevRegion, Errno> {
        if count == 0 || first_minor.saturating_add(count) > MINOR_MAX {
            return Err(Errno::EINVAL);
        }

        let mut regions = self.regions.lock();
        let major = (CHRDEV_MAJOR_DYN_END..=CHRDEV_MAJOR_DYN_START)
            .rev()
            .find(|m| !regions.iter().any(|r| r.major() == *m))
            .ok_or(Errno::EBUSY)?;

        let region = ChrdevRegion::new(DeviceNumber::new(major, first_minor), count, name);
        regions.push(region.clone());

        crate::kdebug!("(DevFS) Região ", name, " major=", crate::core::logging::Dec(major as u64));
        Ok(region)
    }

    /// Libera uma região reservada
    pub fn unregister_chrdev_region(&self, region: &ChrdevRegion) -> Result<(), Errno> {
        let mut regions = self.regions.lock();
        let pos = regions
            .iter()
            .position(|r| r == region)
            .ok_or(Errno::ENOENT)?;
        regions.remove(pos);
        Ok(())
    }

    fn region_covers(&self, dev: DeviceNumber) -> bool {
        self.regions.lock().iter().any(|r| r.contains(dev))
    }

    // =========================================================================
    // NÓS
    // =========================================================================

    /// Abre um dispositivo por caminho (`nome` ou `/dev/nome`)
    pub fn open(&self, path: &str, flags: OpenFlags) -> Result<FileHandle, Errno> {
        let name = path.strip_prefix("/dev/").unwrap_or(path);
        let device = self.lookup(name).ok_or(Errno::ENOENT)?;
        device.open(flags)?;
        crate::ktrace!("(DevFS) open ", name, " flags=", flags.bits());
        Ok(FileHandle::new(&device, flags))
    }

    /// Busca um nó publicado
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Device>> {
        self.registry.lock().lookup(name)
    }

    /// Quantidade de nós publicados
    pub fn node_count(&self) -> usize {
        self.registry.lock().count()
    }

    /// Nomes dos nós publicados
    pub fn node_names(&self) -> Vec<String> {
        self.registry.lock().names()
    }

    /// A classe está registrada?
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.lock().iter().any(|c| c == class)
    }
}

impl Default for DevFS {
    fn default() -> Self {
        Self::new()
    }
}

impl NodePublisher for DevFS {
    fn register_class(&self, class: &str) -> Result<(), Errno> {
        let mut classes = self.classes.lock();
        if classes.iter().any(|c| c == class) {
            return Err(Errno::EEXIST);
        }
        classes.push(String::from(class));
        Ok(())
    }

    fn unregister_class(&self, class: &str) -> Result<(), Errno> {
        let mut classes = self.classes.lock();
        let pos = classes
            .iter()
            .position(|c| c == class)
            .ok_or(Errno::ENOENT)?;
        if self.registry.lock().count_in_class(class) != 0 {
            crate::kwarn!("(DevFS) Classe removida com nós publicados: ", class);
        }
        classes.remove(pos);
        Ok(())
    }

    fn publish(&self, class: &str, device: Arc<dyn Device>) -> Result<(), Errno> {
        if !self.has_class(class) {
            return Err(Errno::ENOENT);
        }
        // Equivalente ao cdev_add: o número precisa estar numa região reservada
        if !self.region_covers(device.device_number()) {
            return Err(Errno::ENXIO);
        }
        self.registry.lock().register(class, device)
    }

    fn unpublish(&self, dev: DeviceNumber) -> Result<(), Errno> {
        self.registry.lock().unregister(dev).map(|_| ())
    }
}
