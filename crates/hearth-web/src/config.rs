use std::path::PathBuf;

/// Server configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the warehouse file; `None` means the default location.
    pub db_path: Option<PathBuf>,
    pub listen_addr: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            db_path: std::env::var_os("HEARTH_DB_PATH").map(PathBuf::from),
            listen_addr: std::env::var("HEARTH_LISTEN_ADDR")
                .unwrap_or_else(|_| String::from("127.0.0.1:8700")),
        }
    }
}
