//! Sistema de arquivos de dispositivos.
//!
//! Submódulos:
//! - `devfs`: Nós de dispositivo (/dev) e handles abertos.

pub mod devfs;

#[cfg(test)]
mod tests;
