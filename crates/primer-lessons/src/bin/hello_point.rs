use anyhow::Result;

use primer_engine::device::GpuInit;
use primer_engine::logging::{init_logging, LoggingConfig};
use primer_engine::window::{Runtime, RuntimeConfig};
use primer_lessons::hello_point::{HelloPoint, TITLE};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    Runtime::run(RuntimeConfig::titled(TITLE), GpuInit::default(), HelloPoint::default())
}
