use crate::api::{HabitzApi, HabitzPaths};
use crate::config::HabitzConfig;
use crate::day::{Clock, FixedClock, SystemClock};
use crate::error::Result;
use crate::logging::init_logging;
use crate::session::Session;
use crate::store::backend::StorageBackend;
use crate::store::fs_backend::FsBackend;
use crate::store::mem_backend::MemBackend;
use crate::store::snapshot::Persistence;
use chrono::NaiveDate;
use directories::ProjectDirs;
use log::warn;
use std::path::PathBuf;

/// Overrides the data directory (also used by the integration tests).
pub const HOME_ENV: &str = "HABITZ_HOME";

/// The backend a real session runs on: files under the data directory, or memory.
pub type SessionBackend = Box<dyn StorageBackend>;

pub struct HabitzContext {
    pub api: HabitzApi<SessionBackend>,
    pub config: HabitzConfig,
    /// Set when file logging could not be started; the session runs without it.
    pub logging_error: Option<String>,
    /// No data directory was found, so nothing outlives this run.
    pub in_memory: bool,
}

#[derive(Debug, Default, Clone)]
pub struct InitOptions {
    pub verbose: bool,
    /// Pretend today is this day instead of asking the system clock.
    pub today: Option<NaiveDate>,
    pub data_dir: Option<PathBuf>,
}

/// Resolves the data directory: `HABITZ_HOME`, then the platform data dir.
pub fn data_dir() -> Option<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        if !home.is_empty() {
            return Some(PathBuf::from(home));
        }
    }
    ProjectDirs::from("com", "habitz", "habitz").map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn initialize(options: InitOptions) -> Result<HabitzContext> {
    let data_dir = options.data_dir.clone().or_else(data_dir);
    open_context(data_dir, &options)
}

fn open_context(data_dir: Option<PathBuf>, options: &InitOptions) -> Result<HabitzContext> {
    let clock: Box<dyn Clock> = match options.today {
        Some(day) => Box::new(FixedClock(day)),
        None => Box::new(SystemClock),
    };

    let data_dir = match data_dir {
        Some(dir) => dir,
        None => return open_in_memory(clock),
    };

    let (config, config_error) = match HabitzConfig::load(&data_dir) {
        Ok(config) => (config, None),
        Err(e) => (HabitzConfig::default(), Some(e)),
    };

    let level = if options.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let logging_error = init_logging(level, &data_dir).err().map(|e| e.to_string());
    if let Some(e) = config_error {
        warn!(
            "event=config_load status=error fallback=defaults error={}",
            e
        );
    }

    let backend: SessionBackend = Box::new(FsBackend::new(data_dir.clone()));
    let persistence = Persistence::new(backend)?;
    let session = Session::open(persistence, clock, &config.default_description);
    let paths = HabitzPaths {
        data_dir: Some(data_dir),
    };

    Ok(HabitzContext {
        api: HabitzApi::new(session, paths),
        config,
        logging_error,
        in_memory: false,
    })
}

fn open_in_memory(clock: Box<dyn Clock>) -> Result<HabitzContext> {
    warn!("event=data_dir_resolve status=missing fallback=memory");
    let config = HabitzConfig::default();
    let backend: SessionBackend = Box::new(MemBackend::new());
    let persistence = Persistence::new(backend)?;
    let session = Session::open(persistence, clock, &config.default_description);

    Ok(HabitzContext {
        api: HabitzApi::new(session, HabitzPaths { data_dir: None }),
        config,
        logging_error: None,
        in_memory: true,
    })
}
