pub mod error;
pub mod record;

pub use error::{DatasetError, Result};
pub use record::{Dataset, Record};
