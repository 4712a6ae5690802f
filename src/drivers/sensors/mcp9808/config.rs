//! Configuração do driver MCP9808 (constantes de compilação)

/// Máximo de sensores simultâneos (tamanho da região de minors)
pub const MAX_DEV: usize = 8;

/// Nome do driver (e da região de device numbers)
pub const DRV_NAME: &str = "mcp9808";

/// Classe sob a qual os nós são publicados
pub const CLASS_NAME: &str = "mcp";

/// String `compatible` do device tree
pub const COMPATIBLE: &str = "mz,mcp9808mz";

/// Registrador de temperatura ambiente (T_A)
pub const REG_AMBIENT_TEMP: u8 = 0x05;

/// Byte de namespace dos ioctls
pub const IOCTL_MAGIC: u8 = b'M';

/// Número do ioctl READ_TEMP
pub const IOCTL_NR_READ_TEMP: u8 = 1;
