pub mod config;
pub mod core;
pub mod io;
pub mod selection;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
