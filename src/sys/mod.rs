//! System Definitions (ABI).
//!
//! Contém as constantes e tipos que definem a interface entre o driver e
//! quem o consome: códigos de erro e a codificação de comandos ioctl.

pub mod error;
pub mod ioctl;

pub use error::Errno;
