//! Generative Language REST API 기반 계산기.
//!
//! 모델에게 IAPWS-97 증기표 계산기 역할을 지시하고, 응답 스키마를 지정해 JSON으로 받는다.
//! 호출 전체에 시간 제한을 둔다.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_result, CalculationResult, PropertyResolver, ResolveError};
use crate::config::ResolverSettings;
use crate::form::CalculationRequest;

/// Generative Language API 호출기.
#[derive(Debug, Clone)]
pub struct GeminiResolver {
    endpoint: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl GeminiResolver {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            timeout,
        }
    }

    /// 설정과 환경 변수로부터 만든다. `.env` 파일이 있으면 먼저 읽는다.
    ///
    /// 키가 없거나 비어 있으면 `MissingCredential`.
    pub fn from_settings(settings: &ResolverSettings) -> Result<Self, ResolveError> {
        if dotenvy::dotenv().is_err() {
            tracing::debug!(".env 파일 없음");
        }
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ResolveError::MissingCredential {
                var: settings.api_key_env.clone(),
            })?;
        Ok(Self::new(
            settings.endpoint.clone(),
            settings.model.clone(),
            api_key,
            Duration::from_secs(settings.timeout_secs),
        ))
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

impl PropertyResolver for GeminiResolver {
    fn resolve(&self, request: &CalculationRequest) -> Result<CalculationResult, ResolveError> {
        let description = request.describe();
        tracing::debug!(model = %self.model, %description, "물성 계산 요청");

        let body = request_body(&description);
        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();
        let response = agent
            .post(&self.url())
            .set("x-goog-api-key", &self.api_key)
            .set("Content-Type", "application/json")
            .send_string(&body.to_string());

        let text = match response {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| ResolveError::Invocation(e.to_string()))?,
            Err(ureq::Error::Status(code, resp)) => {
                let detail = resp.into_string().unwrap_or_default();
                return Err(ResolveError::Invocation(format!("HTTP {code}: {}", detail.trim())));
            }
            Err(ureq::Error::Transport(t)) => {
                return Err(ResolveError::Invocation(t.to_string()));
            }
        };

        let json_text = extract_text(&text)?;
        let result = parse_result(&json_text)?;
        tracing::info!(phase = %result.properties.phase, "물성 계산 완료");
        Ok(result)
    }
}

/// 모델에게 전달하는 지시문.
pub fn build_prompt(description: &str) -> String {
    format!(
        r#"Act as an expert thermodynamicist and steam table calculator based on IAPWS-97 standards.

Calculate the thermodynamic properties of water/steam for the following user-defined state:
{description}

If the user selected "Saturated", treat the inputs as saturation properties (e.g. Saturation Pressure or Saturation Temperature) combined with Quality.
If the user selected "Subcooled/Superheated", determine the phase (Subcooled, Superheated, or Mixture) based on the two inputs.

If the state is impossible (e.g., negative pressure, temperature below absolute zero, quality < 0 or > 1 in saturated mode), return sensible error-like values or handle gracefully in the description.

IMPORTANT RULES:
1. Standardize all output units to:
   - Pressure: MPa
   - Temperature: °C (Celsius)
   - Specific Volume: m³/kg
   - Internal Energy: kJ/kg
   - Enthalpy: kJ/kg
   - Entropy: kJ/(kg·K)
   - Quality: 0 to 1 (if saturated), -1 (if subcooled liquid), 2 (if superheated vapor).

2. Provide a short description of the phase (e.g., "Compressed Liquid", "Saturated Mixture", "Superheated Vapor", "Supercritical Fluid") and the calculation context.
"#
    )
}

/// 응답 스키마. `quality`만 선택 필드다.
pub fn response_schema() -> Value {
    let number = |description: &str| json!({ "type": "NUMBER", "description": description });
    json!({
        "type": "OBJECT",
        "properties": {
            "properties": {
                "type": "OBJECT",
                "properties": {
                    "pressure": number("Pressure in MPa"),
                    "temperature": number("Temperature in Celsius"),
                    "specificVolume": number("Specific Volume in m^3/kg"),
                    "internalEnergy": number("Internal Energy in kJ/kg"),
                    "enthalpy": number("Enthalpy in kJ/kg"),
                    "entropy": number("Entropy in kJ/(kg K)"),
                    "quality": number("Vapor quality (x). Use -1 for Subcooled, 2 for Superheated, 0-1 for Saturated."),
                    "phase": { "type": "STRING", "description": "Phase description (e.g. Superheated Vapor)" }
                },
                "required": ["pressure", "temperature", "specificVolume", "internalEnergy", "enthalpy", "entropy", "phase"]
            },
            "description": { "type": "STRING", "description": "A brief explanation of the state." }
        },
        "required": ["properties", "description"]
    })
}

fn request_body(description: &str) -> Value {
    json!({
        "contents": [{ "role": "user", "parts": [{ "text": build_prompt(description) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema()
        }
    })
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// API 응답 봉투에서 첫 후보의 텍스트를 꺼낸다.
fn extract_text(raw: &str) -> Result<String, ResolveError> {
    let envelope: GenerateResponse =
        serde_json::from_str(raw).map_err(|e| ResolveError::MalformedResponse(e.to_string()))?;
    let text: String = envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(ResolveError::MalformedResponse(
            "no data returned from the model".into(),
        ));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;
    use std::time::Instant;

    fn sample_request() -> CalculationRequest {
        crate::form::InputState::default().to_request()
    }

    fn local_resolver(listener: &TcpListener, timeout: Duration) -> GeminiResolver {
        let addr = listener.local_addr().unwrap();
        GeminiResolver::new(format!("http://{addr}/v1beta"), "m1", "k", timeout)
    }

    // 요청 본문을 읽어 소켓 버퍼를 비운다. 짧은 읽기 제한으로 끝을 판단한다.
    fn drain_request(stream: &mut TcpStream) {
        stream
            .set_read_timeout(Some(Duration::from_millis(200)))
            .unwrap();
        let mut buf = [0u8; 4096];
        while matches!(stream.read(&mut buf), Ok(n) if n > 0) {}
    }

    #[test]
    fn silent_server_times_out_as_invocation() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let resolver = local_resolver(&listener, Duration::from_secs(1));
        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            thread::sleep(Duration::from_secs(4));
            drop(stream);
        });

        let started = Instant::now();
        let outcome = resolver.resolve(&sample_request());
        let elapsed = started.elapsed();

        assert!(matches!(outcome, Err(ResolveError::Invocation(_))), "{outcome:?}");
        assert!(elapsed < Duration::from_secs(3), "took {elapsed:?}");
        server.join().unwrap();
    }

    #[test]
    fn http_error_status_is_invocation_with_code() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let resolver = local_resolver(&listener, Duration::from_secs(5));
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            drain_request(&mut stream);
            stream
                .write_all(
                    b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 4\r\nConnection: close\r\n\r\nboom",
                )
                .unwrap();
            stream.flush().unwrap();
        });

        let err = resolver.resolve(&sample_request()).unwrap_err();
        server.join().unwrap();
        match err {
            ResolveError::Invocation(msg) => {
                assert!(msg.contains("HTTP 500"), "{msg}");
                assert!(msg.contains("boom"), "{msg}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn extracts_concatenated_parts() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]}}]}"#;
        assert_eq!(extract_text(raw).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn empty_candidates_is_malformed() {
        let err = extract_text(r#"{"candidates":[]}"#).unwrap_err();
        assert!(matches!(err, ResolveError::MalformedResponse(_)));
    }

    #[test]
    fn prompt_embeds_description() {
        let p = build_prompt("Fluid State: Saturated, Input 1: 1 MPa, Input 2: 0.5 - (Pressure & Quality)");
        assert!(p.contains("Input 1: 1 MPa"));
        assert!(p.contains("IAPWS-97"));
    }

    #[test]
    fn schema_marks_quality_optional() {
        let schema = response_schema();
        let required = schema["properties"]["properties"]["required"]
            .as_array()
            .unwrap();
        assert_eq!(required.len(), 7);
        assert!(!required.iter().any(|v| v == "quality"));
    }

    #[test]
    fn url_joins_endpoint_and_model() {
        let r = GeminiResolver::new(
            "https://example.test/v1beta/",
            "m1",
            "k",
            Duration::from_secs(1),
        );
        assert_eq!(r.url(), "https://example.test/v1beta/models/m1:generateContent");
    }
}
