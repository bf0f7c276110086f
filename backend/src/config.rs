use std::{env, path::PathBuf};

use crate::{error::AppError, layout::RankDirection};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_dir: PathBuf,
    pub sibling_edges: bool,
    pub rank_direction: RankDirection,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = var("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".into());
        let port: u16 = var("PORT")
            .unwrap_or_else(|| "5001".into())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid PORT: {err}")))?;

        let log_dir = PathBuf::from(var("DIRGRAPH_LOG_DIR").unwrap_or_else(|| "./log".into()));

        let sibling_edges = var("DIRGRAPH_SIBLING_EDGES")
            .unwrap_or_else(|| "false".into())
            .parse::<bool>()
            .map_err(|err| AppError::Config(format!("invalid DIRGRAPH_SIBLING_EDGES: {err}")))?;

        let rank_direction = var("DIRGRAPH_RANK_DIRECTION")
            .unwrap_or_else(|| "TB".into())
            .parse::<RankDirection>()
            .map_err(|err| AppError::Config(format!("invalid DIRGRAPH_RANK_DIRECTION: {err}")))?;

        Ok(Self {
            host,
            port,
            log_dir,
            sibling_edges,
            rank_direction,
        })
    }
}
