//! # Standard Error Codes (Errno)
//!
//! Define os códigos de erro retornados ao consumidor do dispositivo.
//! Baseado no padrão POSIX/Linux: o chamador observa o valor negado
//! (`-EIO`, `-EINVAL`, ...) como resultado de open/ioctl.
//!
//! ## Códigos usados pelo driver
//!
//! | Código  | Origem                                         |
//! |---------|------------------------------------------------|
//! | ENOENT  | nó `/dev/...` inexistente                      |
//! | EIO     | transação I2C falhou (ioctl)                   |
//! | EIO     | adaptador sem word read (probe)                |
//! | EBADF   | handle já fechado                              |
//! | ENOMEM  | pool de minors esgotado                        |
//! | EFAULT  | cópia para o buffer do chamador falhou         |
//! | EBUSY   | endereço I2C já ocupado                        |
//! | EEXIST  | nome/classe já publicado                       |
//! | ENODEV  | instância removida (handle ou referência viva) |
//! | EINVAL  | buffer de saída ausente                        |
//! | ENOSPC  | tabela de nós cheia                            |
//! | ENOTTY  | comando ioctl desconhecido                     |
//!
//! As duas linhas de EIO vêm de operações diferentes: a de probe nunca
//! chega a um handle, então o chamador de ioctl só vê a falha de transação.

use core::fmt;

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Errno {
    ENOENT = 2,   // No such file or directory
    EIO = 5,      // I/O error
    ENXIO = 6,    // No such device or address
    EBADF = 9,    // Bad file number
    ENOMEM = 12,  // Out of memory
    EFAULT = 14,  // Bad address
    EBUSY = 16,   // Device or resource busy
    EEXIST = 17,  // File exists
    ENODEV = 19,  // No such device
    EINVAL = 22,  // Invalid argument
    ENOTTY = 25,  // Not a typewriter (ioctl inválido)
    ENOSPC = 28,  // No space left on device
}

impl Errno {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Valor negativo observado pelo chamador
    pub fn as_isize(self) -> isize {
        -(self as i32) as isize
    }

    /// Nome simbólico (para logs)
    pub const fn name(self) -> &'static str {
        match self {
            Errno::ENOENT => "ENOENT",
            Errno::EIO => "EIO",
            Errno::ENXIO => "ENXIO",
            Errno::EBADF => "EBADF",
            Errno::ENOMEM => "ENOMEM",
            Errno::EFAULT => "EFAULT",
            Errno::EBUSY => "EBUSY",
            Errno::EEXIST => "EEXIST",
            Errno::ENODEV => "ENODEV",
            Errno::EINVAL => "EINVAL",
            Errno::ENOTTY => "ENOTTY",
            Errno::ENOSPC => "ENOSPC",
        }
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.as_isize())
    }
}

impl crate::core::logging::Emit for Errno {
    fn emit(&self, rec: &mut crate::core::logging::Record) {
        rec.push_str(self.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_codes() {
        assert_eq!(Errno::EIO.as_isize(), -5);
        assert_eq!(Errno::EINVAL.as_isize(), -22);
        assert_eq!(Errno::ENOTTY.as_isize(), -25);
        assert_eq!(Errno::EFAULT.as_i32(), 14);
    }
}
