//! Device Operations - Flags de abertura, buffers do chamador e handles

use super::device::{Device, DeviceNumber};
use crate::sys::error::Errno;
use alloc::sync::{Arc, Weak};

/// Flags para abertura de dispositivos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenFlags {
    bits: u32,
}

impl OpenFlags {
    /// Apenas leitura
    pub const RDONLY: Self = Self { bits: 0o0 };
    /// Leitura e escrita
    pub const RDWR: Self = Self { bits: 0o2 };

    /// Retorna os bits
    pub const fn bits(&self) -> u32 {
        self.bits
    }
}

// =============================================================================
// BUFFER DO CHAMADOR
// =============================================================================

/// Memória pertencente ao chamador (equivalente ao `copy_to_user`).
pub trait UserBuffer {
    /// Copia `src` para o início do buffer. Falha com EFAULT.
    fn copy_to_user(&mut self, src: &[u8]) -> Result<(), Errno>;
}

impl<const N: usize> UserBuffer for [u8; N] {
    fn copy_to_user(&mut self, src: &[u8]) -> Result<(), Errno> {
        UserSlice(&mut self[..]).copy_to_user(src)
    }
}

/// Fatia arbitrária do chamador
pub struct UserSlice<'a>(pub &'a mut [u8]);

impl UserBuffer for UserSlice<'_> {
    fn copy_to_user(&mut self, src: &[u8]) -> Result<(), Errno> {
        let dst = self.0.get_mut(..src.len()).ok_or(Errno::EFAULT)?;
        dst.copy_from_slice(src);
        Ok(())
    }
}

// =============================================================================
// FILE HANDLE
// =============================================================================

/// Handle de arquivo aberto sobre um nó de /dev.
///
/// Guarda apenas a ligação com o dispositivo. A ligação é fraca: se a
/// instância for removida, operações passam a falhar com ENODEV.
pub struct FileHandle {
    device: Option<Weak<dyn Device>>,
    dev: DeviceNumber,
    flags: OpenFlags,
}

impl FileHandle {
    pub(crate) fn new(device: &Arc<dyn Device>, flags: OpenFlags) -> Self {
        Self {
            device: Some(Arc::downgrade(device)),
            dev: device.device_number(),
            flags,
        }
    }

    pub fn device_number(&self) -> DeviceNumber {
        self.dev
    }

    pub fn flags(&self) -> OpenFlags {
        self.flags
    }

    /// Ainda ligado a um dispositivo?
    pub fn is_open(&self) -> bool {
        self.device.is_some()
    }

    fn bound(&self) -> Result<Arc<dyn Device>, Errno> {
        match &self.device {
            None => Err(Errno::EBADF),
            Some(weak) => weak.upgrade().ok_or(Errno::ENODEV),
        }
    }

    /// ioctl no dispositivo ligado
    pub fn ioctl(&self, cmd: u32, arg: Option<&mut dyn UserBuffer>) -> Result<usize, Errno> {
        let device = self.bound()?;
        device.ioctl(cmd, arg)
    }

    /// Desfaz a ligação. Sempre sucede, inclusive se já fechado.
    pub fn close(&mut self) -> Result<(), Errno> {
        if let Some(device) = self.device.take().and_then(|weak| weak.upgrade()) {
            device.close();
        }
        Ok(())
    }
}

impl Drop for FileHandle {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
