use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("cannot read dataset `{dataset}` from {path}: {source}")]
    Unavailable {
        dataset: String,
        path: String,
        source: csv::Error,
    },

    #[error("CSV error in dataset `{dataset}`: {source}")]
    Csv { dataset: String, source: csv::Error },

    #[error("dataset `{dataset}` row {row}: missing field `{field}`")]
    MissingField {
        dataset: String,
        field: String,
        row: usize,
    },

    #[error("dataset `{dataset}` row {row}: field `{field}` is not an integer: {value:?}")]
    Parse {
        dataset: String,
        field: String,
        row: usize,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, DatasetError>;
