mod backend;
mod device;
pub mod fixtures;

pub use backend::TestBackend;
pub use device::TestDevice;
pub use fixtures::Catalog;

use std::env;

use env_logger::Builder;
use log::LevelFilter;

/// Route `log` output through the test harness. Safe to call from every test.
pub fn init_test_logging() {
    let mut builder = Builder::new();
    builder.is_test(true);
    match env::var("RUST_LOG") {
        Ok(filters) => {
            builder.parse_filters(&filters);
        }
        Err(_) => {
            builder.filter_level(LevelFilter::Warn);
            builder.filter_module("liftlog_engine", LevelFilter::Debug);
        }
    }
    let _ = builder.try_init();
}
