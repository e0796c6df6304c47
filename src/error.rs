use thiserror::Error;

#[derive(Error, Debug)]
pub enum QcError {
    #[error("Email content is required")]
    EmptyInput,

    #[error("Failed to compile pattern list '{list}': {source}")]
    InvalidPattern {
        list: &'static str,
        #[source]
        source: regex::Error,
    },
}
