use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::form::DEFAULT_ELECTRICITY_RATE;

/// 기본 설정 파일 경로.
pub const CONFIG_PATH: &str = "config.toml";

/// 애플리케이션 설정을 표현한다. 파일에 없는 항목은 기본값으로 채운다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드. "auto"면 시스템 로케일을 따른다.
    pub language: String,
    /// 사용자 언어팩 디렉터리
    pub language_pack_dir: Option<String>,
    /// 폼을 열 때 채워 둘 전력 단가 [$/kWh]
    pub default_electricity_rate: String,
    /// GUI 창 불투명도(0.3~1.0)
    pub window_alpha: f32,
    /// GUI 창 항상 위
    pub always_on_top: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            default_electricity_rate: DEFAULT_ELECTRICITY_RATE.to_string(),
            window_alpha: 1.0,
            always_on_top: false,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_from(CONFIG_PATH)
}

/// 지정한 경로의 설정을 로드한다. 파일이 없으면 기본값을 그 경로에 저장한다.
pub fn load_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "config loaded");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        info!(path = %path.display(), "default config written");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(CONFIG_PATH)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), content)?;
        info!(path = %path.as_ref().display(), "config saved");
        Ok(())
    }
}
