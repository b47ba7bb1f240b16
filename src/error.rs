use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {message}")]
    Csv { path: String, message: String },

    #[error("Invalid month filter: {0}")]
    MonthParse(String),

    #[error("Invalid metric: {0}")]
    MetricParse(String),

    #[error("Invalid date: {0}")]
    DateParse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
