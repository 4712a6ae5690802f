//! Character Device - Regiões de device numbers para drivers de caractere

use super::device::DeviceNumber;
use alloc::string::String;

/// Faixa contígua de minors sob um major (equivalente a `alloc_chrdev_region`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChrdevRegion {
    base: DeviceNumber,
    count: u32,
    name: String,
}

impl ChrdevRegion {
    pub(crate) fn new(base: DeviceNumber, count: u32, name: &str) -> Self {
        Self {
            base,
            count,
            name: String::from(name),
        }
    }

    /// Primeiro device number da região
    pub fn base(&self) -> DeviceNumber {
        self.base
    }

    pub fn major(&self) -> u32 {
        self.base.major
    }

    /// Quantidade de minors reservados
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Device number do slot `index` (MKDEV(major, base_minor + index))
    pub fn devt(&self, index: u32) -> Option<DeviceNumber> {
        (index < self.count).then(|| DeviceNumber::new(self.base.major, self.base.minor + index))
    }

    /// O device number pertence a esta região?
    pub fn contains(&self, dev: DeviceNumber) -> bool {
        dev.major == self.base.major
            && dev.minor >= self.base.minor
            && dev.minor < self.base.minor + self.count
    }
}
