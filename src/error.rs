use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fixture JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("lua error: {0}")]
    Lua(#[from] mlua::Error),

    #[error("rng(1234).next_int_between(0, 256) should be {expected}, got {actual}")]
    SanityCheck { expected: i64, actual: i64 },

    #[error("too many failures (more than {limit})")]
    TooManyFailures { limit: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
