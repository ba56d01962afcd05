//! Platform and infrastructure helpers shared by the experiment and the views.

pub mod config;
pub mod format;
pub mod platform;
pub mod storage;
pub mod timing;
