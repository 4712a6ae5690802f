//! Trait base para drivers

use crate::core::logging::{Emit, Record};
use crate::drivers::i2c::BusError;
use crate::sys::error::Errno;
use core::fmt;

/// Tipo de dispositivo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Sensor,
}

/// Erro de driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// Adaptador do barramento não oferece a leitura necessária
    CapabilityUnsupported,
    /// Sem memória/slot para criar a instância
    AllocationFailed,
    /// Já existe instância para este endereço
    AlreadyBound,
    /// Publicação do nó falhou (erro do publicador)
    PublishFailed(Errno),
    /// Transação no barramento falhou
    Io(BusError),
    /// Comando de controle desconhecido
    InvalidRequest,
    /// Buffer de saída ausente
    InvalidArgument,
    /// Cópia para o buffer do chamador falhou
    CopyFailed,
    /// Instância já removida do registro
    Removed,
    /// Falha na inicialização do módulo
    InitFailed(Errno),
}

impl DriverError {
    /// Código observado pelo chamador (negar para o valor de retorno)
    pub fn errno(self) -> Errno {
        match self {
            DriverError::CapabilityUnsupported => Errno::EIO,
            DriverError::AllocationFailed => Errno::ENOMEM,
            DriverError::AlreadyBound => Errno::EBUSY,
            DriverError::PublishFailed(e) => e,
            DriverError::Io(_) => Errno::EIO,
            DriverError::InvalidRequest => Errno::ENOTTY,
            DriverError::InvalidArgument => Errno::EINVAL,
            DriverError::CopyFailed => Errno::EFAULT,
            DriverError::Removed => Errno::ENODEV,
            DriverError::InitFailed(e) => e,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DriverError::CapabilityUnsupported => "adaptador sem suporte",
            DriverError::AllocationFailed => "alocação falhou",
            DriverError::AlreadyBound => "endereço já associado",
            DriverError::PublishFailed(_) => "publicação falhou",
            DriverError::Io(_) => "erro de I/O",
            DriverError::InvalidRequest => "comando inválido",
            DriverError::InvalidArgument => "argumento inválido",
            DriverError::CopyFailed => "cópia falhou",
            DriverError::Removed => "instância removida",
            DriverError::InitFailed(_) => "inicialização falhou",
        }
    }
}

impl From<DriverError> for Errno {
    fn from(e: DriverError) -> Self {
        e.errno()
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.errno())
    }
}

impl Emit for DriverError {
    fn emit(&self, rec: &mut Record) {
        rec.push_str(self.as_str());
        rec.push_str(" ");
        self.errno().emit(rec);
    }
}

/// Trait que todo driver deve implementar
pub trait Driver: Send + Sync {
    /// Nome do driver
    fn name(&self) -> &'static str;

    /// Tipo de dispositivo
    fn device_type(&self) -> DeviceType;
}
