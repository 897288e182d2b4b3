// src/driver/mod.rs

// Declare the sub-module
pub mod sync_driver;

// Re-export the public SyncDriver struct
pub use sync_driver::SyncDriver;

// Test double for the transport and timer traits, shared by the driver tests
#[cfg(test)]
pub(crate) mod mock;
