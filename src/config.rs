use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::presentation::DisplayUnits;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 외부 계산기 접속 설정. API 키 자체는 저장하지 않고 환경 변수 이름만 둔다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    pub endpoint: String,
    pub model: String,
    /// API 키를 읽을 환경 변수 이름
    pub api_key_env: String,
    /// 요청 전체 시간 제한(초)
    pub timeout_secs: u64,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".into(),
            model: "gemini-3-pro-preview".into(),
            api_key_env: "API_KEY".into(),
            timeout_secs: 60,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// "auto", "en", "ko" 등
    pub language: String,
    pub resolver: ResolverSettings,
    /// 결과 화면의 그룹별 초기 표시 단위
    pub display_units: DisplayUnits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            resolver: ResolverSettings::default(),
            display_units: DisplayUnits::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 지정 경로의 설정을 로드한다. 파일이 없으면 기본 설정을 써 둔다.
pub fn load_or_create(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        tracing::info!(path = %path.display(), "기본 설정 파일 생성");
        Ok(cfg)
    }
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 지정 경로에 저장한다.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        save_config(self, path)
    }
}

/// 설정 파일 경로를 결정한다. 명시 경로가 없으면 기본 경로.
pub fn resolve_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            language = "ko"
            [resolver]
            timeout_secs = 5
            [display_units]
            pressure = "Bar"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.language, "ko");
        assert_eq!(cfg.resolver.timeout_secs, 5);
        assert_eq!(cfg.resolver.api_key_env, "API_KEY");
        assert_eq!(
            cfg.display_units.pressure,
            crate::units::PressureUnit::Bar
        );
        assert_eq!(
            cfg.display_units.temperature,
            crate::units::TemperatureUnit::Celsius
        );
    }

    #[test]
    fn missing_file_is_created_then_reloaded() {
        let path = std::env::temp_dir().join(format!("snapsteam-config-{}.toml", std::process::id()));
        let _ = fs::remove_file(&path);

        let mut cfg = load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg, Config::default());

        cfg.display_units.pressure = crate::units::PressureUnit::Psia;
        cfg.save_to(&path).unwrap();
        let back = load_or_create(&path).unwrap();
        assert_eq!(back.display_units.pressure, crate::units::PressureUnit::Psia);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn default_round_trips_through_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, Config::default());
    }
}
