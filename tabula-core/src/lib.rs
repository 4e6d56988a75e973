mod builder;
mod column_spec;
mod config;
mod connection;
mod database;
mod driver;
mod error;
mod executor;
mod format;
mod query;
mod sql_writer;
mod util;
mod value;

pub use builder::*;
pub use column_spec::*;
pub use config::*;
pub use connection::*;
pub use database::*;
pub use driver::*;
pub use error::*;
pub use executor::*;
pub use format::*;
pub use query::*;
pub use sql_writer::*;
pub use util::*;
pub use value::*;

pub use ::anyhow;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;
