#[cfg(feature = "cli")]
pub mod cli;
pub mod environment;
pub mod local_session;
pub mod toml_config;

pub use environment::{ApiSettings, Environment};
pub use local_session::FileSessionStore;
pub use toml_config::TomlConfig;

use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// 依序套用：內建環境設定 -> TOML 檔 -> 環境變數，最後驗證
pub fn resolve_settings(
    env_flag: Option<&str>,
    file: Option<&TomlConfig>,
) -> Result<ApiSettings> {
    let environment = Environment::resolve(env_flag);
    let mut settings = ApiSettings::for_environment(environment);

    if let Some(file) = file {
        file.validate()?;
        file.apply_to(&mut settings);
    }
    settings.apply_env_overrides()?;
    settings.validate()?;

    settings.log_summary();
    Ok(settings)
}

/// TOML 指定的位置優先，否則用使用者設定目錄
pub fn session_store(file: Option<&TomlConfig>) -> FileSessionStore {
    match file.and_then(TomlConfig::session_path) {
        Some(path) => FileSessionStore::new(path.to_path_buf()),
        None => FileSessionStore::default_location(),
    }
}
