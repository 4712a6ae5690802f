//! Codificação de comandos ioctl (layout `_IOC` do Linux genérico).
//!
//! ```text
//!  31 30 29          16 15       8 7        0
//! ┌─────┬──────────────┬──────────┬──────────┐
//! │ dir │     size     │   type   │    nr    │
//! └─────┴──────────────┴──────────┴──────────┘
//! ```

const NRBITS: u32 = 8;
const TYPEBITS: u32 = 8;
const SIZEBITS: u32 = 14;

const NRSHIFT: u32 = 0;
const TYPESHIFT: u32 = NRSHIFT + NRBITS;
const SIZESHIFT: u32 = TYPESHIFT + TYPEBITS;
const DIRSHIFT: u32 = SIZESHIFT + SIZEBITS;

const NRMASK: u32 = (1 << NRBITS) - 1;
const TYPEMASK: u32 = (1 << TYPEBITS) - 1;
const SIZEMASK: u32 = (1 << SIZEBITS) - 1;

/// Sem transferência de dados
pub const IOC_NONE: u32 = 0;
/// Chamador escreve, driver lê
pub const IOC_WRITE: u32 = 1;
/// Driver escreve, chamador lê
pub const IOC_READ: u32 = 2;

/// Monta um comando a partir dos campos
pub const fn ioc(dir: u32, ty: u8, nr: u8, size: usize) -> u32 {
    (dir << DIRSHIFT)
        | ((ty as u32) << TYPESHIFT)
        | ((nr as u32) << NRSHIFT)
        | (((size as u32) & SIZEMASK) << SIZESHIFT)
}

/// `_IOR(ty, nr, T)`: comando de leitura com payload de `size` bytes
pub const fn ior(ty: u8, nr: u8, size: usize) -> u32 {
    ioc(IOC_READ, ty, nr, size)
}

pub const fn ioc_dir(cmd: u32) -> u32 {
    cmd >> DIRSHIFT
}

pub const fn ioc_type(cmd: u32) -> u8 {
    ((cmd >> TYPESHIFT) & TYPEMASK) as u8
}

pub const fn ioc_nr(cmd: u32) -> u8 {
    ((cmd >> NRSHIFT) & NRMASK) as u8
}

pub const fn ioc_size(cmd: u32) -> usize {
    ((cmd >> SIZESHIFT) & SIZEMASK) as usize
}
