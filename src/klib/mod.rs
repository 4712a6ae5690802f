//! Kernel Library (KLib).
//!
//! Utilitários agnósticos de hardware para uso interno do driver.

pub mod bitmap;
pub mod test_framework;

pub use bitmap::Bitmap;
