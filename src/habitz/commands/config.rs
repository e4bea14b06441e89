use crate::commands::{CmdMessage, CmdResult, HabitzPaths};
use crate::config::{HabitzConfig, CONFIG_KEYS};
use crate::error::{HabitzError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &HabitzPaths, action: ConfigAction) -> Result<CmdResult> {
    let mut config = match &paths.data_dir {
        Some(dir) => HabitzConfig::load(dir)?,
        None => HabitzConfig::default(),
    };
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {
            let mut values = Vec::with_capacity(CONFIG_KEYS.len());
            for key in CONFIG_KEYS {
                values.push((key.to_string(), config.get(key)?));
            }
            result = result.with_config_values(values);
        }
        ConfigAction::ShowKey(key) => {
            let value = config.get(&key)?;
            result = result.with_config_values(vec![(key, value)]);
        }
        ConfigAction::Set(key, value) => {
            let Some(dir) = &paths.data_dir else {
                let reason = "No data directory; settings cannot be saved";
                return Err(HabitzError::Config(reason.into()));
            };
            config.set(&key, &value)?;
            config.save(dir)?;
            let stored = config.get(&key)?;
            let message = format!("{} set to {}", key, stored);
            result.add_message(CmdMessage::success(message));
            result = result.with_config_values(vec![(key, stored)]);
        }
    }

    Ok(result)
}
