use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

/// Server settings, read once from the environment (and `.env`) at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub images_dir: PathBuf,
    /// Wipe the directory and reseed the bootstrap admin before serving.
    pub reset_db: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let db_path = std::env::var("ROSTER_DB_PATH").unwrap_or_else(|_| "/tmp/users.db".into());
        let host = std::env::var("ROSTER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("ROSTER_PORT")
            .unwrap_or_else(|_| "1234".into())
            .parse()
            .context("ROSTER_PORT must be a port number")?;
        let images_dir =
            std::env::var("ROSTER_IMAGES_DIR").unwrap_or_else(|_| "/tmp/files".into());
        let reset_db = std::env::var("ROSTER_RESET_DB")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            db_path: db_path.into(),
            host,
            port,
            images_dir: images_dir.into(),
            reset_db,
        })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
