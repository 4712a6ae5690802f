//! Core Module
//!
//! Infraestrutura central do driver, independente de barramento.

pub mod logging;
