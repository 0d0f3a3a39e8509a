//! 외부 물성 계산기 경계.
//!
//! 실제 계산은 외부 서비스가 수행한다. 이 모듈은 요청/응답 형태와 오류 분류만 정의하고,
//! 구현체는 `PropertyResolver` 트레이트 뒤에 둔다.

pub mod gemini;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::form::CalculationRequest;

pub use gemini::GeminiResolver;

/// 건도 관례값: 과냉 액체.
pub const QUALITY_SUBCOOLED: f64 = -1.0;
/// 건도 관례값: 과열 증기.
pub const QUALITY_SUPERHEATED: f64 = 2.0;

/// 계산된 물성 묶음. 모든 값은 기준 단위다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SteamProperties {
    /// MPa
    pub pressure: f64,
    /// °C
    pub temperature: f64,
    /// m³/kg
    pub specific_volume: f64,
    /// kJ/kg
    pub internal_energy: f64,
    /// kJ/kg
    pub enthalpy: f64,
    /// kJ/(kg·K)
    pub entropy: f64,
    /// 0~1: 포화 혼합물, -1: 과냉 액체, 2: 과열 증기
    #[serde(default)]
    pub quality: Option<f64>,
    pub phase: String,
}

/// 계산 결과 한 건.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub properties: SteamProperties,
    #[serde(default)]
    pub description: String,
}

/// 외부 계산기 호출 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// 자격 증명(API 키)이 없어 호출 자체를 할 수 없음
    #[error(
        "API Key is missing. Please add '{var}' to your environment variables (or a .env file).\nGet your key here: https://aistudio.google.com/app/apikey"
    )]
    MissingCredential { var: String },
    /// 네트워크/서비스 오류 또는 시간 초과
    #[error("Property service request failed: {0}")]
    Invocation(String),
    /// 응답이 기대한 구조로 해석되지 않음
    #[error("Failed to process calculation results: {0}")]
    MalformedResponse(String),
}

impl ResolveError {
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, ResolveError::MissingCredential { .. })
    }
}

/// 요청 하나를 물성 묶음으로 바꾸는 외부 협력자.
pub trait PropertyResolver {
    fn resolve(&self, request: &CalculationRequest) -> Result<CalculationResult, ResolveError>;
}

impl<R: PropertyResolver + ?Sized> PropertyResolver for Box<R> {
    fn resolve(&self, request: &CalculationRequest) -> Result<CalculationResult, ResolveError> {
        (**self).resolve(request)
    }
}

impl<R: PropertyResolver + ?Sized> PropertyResolver for std::sync::Arc<R> {
    fn resolve(&self, request: &CalculationRequest) -> Result<CalculationResult, ResolveError> {
        (**self).resolve(request)
    }
}

/// 구성에 실패한 계산기 자리에 두는 대체물. 호출할 때마다 같은 오류를 돌려준다.
#[derive(Debug, Clone)]
pub struct Unavailable(pub ResolveError);

impl PropertyResolver for Unavailable {
    fn resolve(&self, _request: &CalculationRequest) -> Result<CalculationResult, ResolveError> {
        Err(self.0.clone())
    }
}

/// 공유 가능한 계산기 핸들.
pub type SharedResolver = std::sync::Arc<dyn PropertyResolver + Send + Sync>;

/// 설정으로부터 계산기를 만든다.
///
/// 자격 증명이 없어도 프로그램은 뜬다. 그 경우 계산 시점에 `MissingCredential`이 보인다.
pub fn from_settings(settings: &crate::config::ResolverSettings) -> SharedResolver {
    match GeminiResolver::from_settings(settings) {
        Ok(resolver) => std::sync::Arc::new(resolver),
        Err(err) => {
            tracing::warn!(error = %err, "계산기 구성 실패");
            std::sync::Arc::new(Unavailable(err))
        }
    }
}

/// 계산기가 돌려준 JSON 텍스트를 결과로 해석한다.
///
/// 필수 필드가 빠졌거나 숫자가 유한하지 않으면 `MalformedResponse`.
pub fn parse_result(json_text: &str) -> Result<CalculationResult, ResolveError> {
    let text = json_text.trim();
    if text.is_empty() {
        return Err(ResolveError::MalformedResponse("empty response".into()));
    }
    let result: CalculationResult = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| ResolveError::MalformedResponse(e.to_string()))?;
    let p = &result.properties;
    let numbers = [
        ("pressure", p.pressure),
        ("temperature", p.temperature),
        ("specificVolume", p.specific_volume),
        ("internalEnergy", p.internal_energy),
        ("enthalpy", p.enthalpy),
        ("entropy", p.entropy),
    ];
    if let Some((name, _)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
        return Err(ResolveError::MalformedResponse(format!("{name} is not finite")));
    }
    Ok(result)
}

// 모델이 ```json 블록으로 감싸 보내는 경우가 있다.
fn strip_code_fence(text: &str) -> &str {
    text.strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "properties": {
            "pressure": 0.101325, "temperature": 100.0, "specificVolume": 1.6729,
            "internalEnergy": 2506.0, "enthalpy": 2675.6, "entropy": 7.3542,
            "quality": 2, "phase": "Superheated Vapor"
        },
        "description": "Just above saturation at 1 atm."
    }"#;

    #[test]
    fn parses_full_payload() {
        let r = parse_result(SAMPLE).unwrap();
        assert_eq!(r.properties.quality, Some(QUALITY_SUPERHEATED));
        assert_eq!(r.properties.phase, "Superheated Vapor");
        assert!((r.properties.specific_volume - 1.6729).abs() < 1e-12);
    }

    #[test]
    fn quality_is_optional() {
        let text = SAMPLE.replace(r#""quality": 2, "#, "");
        let r = parse_result(&text).unwrap();
        assert_eq!(r.properties.quality, None);
    }

    #[test]
    fn missing_required_field_is_malformed() {
        let text = SAMPLE.replace(r#""enthalpy": 2675.6, "#, "");
        let err = parse_result(&text).unwrap_err();
        assert!(matches!(err, ResolveError::MalformedResponse(_)), "{err:?}");
    }

    #[test]
    fn fenced_payload_is_accepted() {
        let fenced = format!("```json\n{SAMPLE}\n```");
        assert!(parse_result(&fenced).is_ok());
    }

    #[test]
    fn empty_text_is_malformed() {
        assert!(matches!(
            parse_result("  "),
            Err(ResolveError::MalformedResponse(_))
        ));
    }
}
