use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error(transparent)]
    Dataset(#[from] dataset::DatasetError),
}

pub type Result<T> = std::result::Result<T, StatsError>;
