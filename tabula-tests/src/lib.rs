mod batch;
mod failures;
mod multiple;
mod tasks;

use crate::{batch::batch, failures::failures, tasks::tasks};
#[cfg(not(feature = "disable-multiple-statements"))]
use multiple::multiple;
use log::LevelFilter;
use std::env;
use tabula::{Connection, Database, QueryBuilder};

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

pub async fn execute_tests<C: Connection>(database: Database<C>) {
    let mut builder = QueryBuilder::new(database);
    tasks(&mut builder).await;
    batch(&mut builder).await;
    failures(&mut builder).await;
    #[cfg(not(feature = "disable-multiple-statements"))]
    multiple(&mut builder).await;
}

/// Column definition of an auto generated integer primary key.
pub fn auto_increment_id(driver: &str) -> &'static str {
    match driver {
        "mysql" => "BIGINT AUTO_INCREMENT PRIMARY KEY",
        _ => "INTEGER PRIMARY KEY AUTOINCREMENT",
    }
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        let result = { $($code)+ };
        log::set_max_level(level);
        result
    }};
}
