use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

use crate::presentation::QualityDisplay;
use crate::resolver::ResolveError;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.app_title";
    pub const APP_SUBTITLE: &str = "general.app_subtitle";
    pub const FOOTNOTE_IAPWS: &str = "general.footnote_iapws";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_FLUID_STATE: &str = "main_menu.fluid_state";
    pub const MAIN_MENU_MODE: &str = "main_menu.mode";
    pub const MAIN_MENU_VALUE1: &str = "main_menu.value1";
    pub const MAIN_MENU_VALUE2: &str = "main_menu.value2";
    pub const MAIN_MENU_UNITS: &str = "main_menu.units";
    pub const MAIN_MENU_CALCULATE: &str = "main_menu.calculate";
    pub const MAIN_MENU_DISPLAY_UNITS: &str = "main_menu.display_units";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const PROMPT_VALUE: &str = "prompt.value";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const FORM_HEADING: &str = "form.heading";
    pub const FORM_CURRENT: &str = "form.current";
    pub const FORM_FLUID_STATE: &str = "form.fluid_state";
    pub const FORM_INPUT_VARIABLES: &str = "form.input_variables";
    pub const FORM_UNIT: &str = "form.unit";
    pub const FORM_PLACEHOLDER: &str = "form.placeholder";
    pub const FORM_HINT_SINGLE_PHASE: &str = "form.hint_single_phase";
    pub const FORM_HINT_SATURATED: &str = "form.hint_saturated";
    pub const FORM_CALCULATE: &str = "form.calculate";
    pub const FORM_CALCULATING: &str = "form.calculating";
    pub const FORM_NEEDS_VALUES: &str = "form.needs_values";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_WAITING_TITLE: &str = "result.waiting_title";
    pub const RESULT_WAITING_BODY: &str = "result.waiting_body";
    pub const RESULT_UNIT_GROUP_PROMPT: &str = "result.unit_group_prompt";
    pub const QUALITY_SUBCOOLED: &str = "quality.subcooled";
    pub const QUALITY_SUPERHEATED: &str = "quality.superheated";

    pub const ERROR_TITLE: &str = "error.title";
    pub const ERROR_MISSING_KEY: &str = "error.missing_key";
    pub const ERROR_MISSING_KEY_HINT: &str = "error.missing_key_hint";
    pub const ERROR_INVOCATION: &str = "error.invocation";
    pub const ERROR_MALFORMED: &str = "error.malformed";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            overrides,
            ..Self::new(lang_code)
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 언어팩 → 내장 표 → 영어 순으로 찾는다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.clone();
        }
        let builtin = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        builtin.unwrap_or("[missing translation]").to_string()
    }

    /// 건도 표시를 현재 언어로 옮긴다.
    pub fn quality(&self, q: &QualityDisplay) -> String {
        match q {
            QualityDisplay::Subcooled => self.t(keys::QUALITY_SUBCOOLED),
            QualityDisplay::Superheated => self.t(keys::QUALITY_SUPERHEATED),
            other => other.to_string(),
        }
    }

    /// 계산 실패 메시지를 현재 언어로 만든다.
    pub fn resolve_error(&self, err: &ResolveError) -> String {
        match err {
            ResolveError::MissingCredential { var } => {
                self.t(keys::ERROR_MISSING_KEY).replace("{var}", var)
            }
            ResolveError::Invocation(detail) => {
                format!("{} {detail}", self.t(keys::ERROR_INVOCATION))
            }
            ResolveError::MalformedResponse(detail) => {
                format!("{} {detail}", self.t(keys::ERROR_MALFORMED))
            }
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    get_locale()
        .and_then(|loc| normalize_locale_string(&loc))
        .or_else(|| {
            ["LC_ALL", "LANG"]
                .iter()
                .filter_map(|var| std::env::var(var).ok())
                .find_map(|v| normalize_locale_string(&v))
        })
}

/// TOML 기반 언어팩을 로드한다. 형식: 섹션/키 구조를 점 표기 키로 펼친 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_EXIT => "프로그램을 종료합니다.",
        APP_TITLE => "SnapSteam",
        APP_SUBTITLE => "증기표 계산기",
        FOOTNOTE_IAPWS => "모든 계산값은 IAPWS-97 기준 추정치입니다.",
        MAIN_MENU_TITLE => "\n=== SnapSteam ===",
        MAIN_MENU_FLUID_STATE => "1) 유체 상태 선택",
        MAIN_MENU_MODE => "2) 입력 변수 조합 선택",
        MAIN_MENU_VALUE1 => "3) 첫 번째 값 입력",
        MAIN_MENU_VALUE2 => "4) 두 번째 값 입력",
        MAIN_MENU_UNITS => "5) 입력 단위 선택",
        MAIN_MENU_CALCULATE => "6) 계산",
        MAIN_MENU_DISPLAY_UNITS => "7) 결과 표시 단위 변경",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        PROMPT_VALUE => "값 입력: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        FORM_HEADING => "상태 설정",
        FORM_CURRENT => "현재 입력:",
        FORM_FLUID_STATE => "유체 상태",
        FORM_INPUT_VARIABLES => "입력 변수",
        FORM_UNIT => "단위",
        FORM_PLACEHOLDER => "값 입력",
        FORM_HINT_SINGLE_PHASE => "과냉 액체 또는 과열 증기 영역용.",
        FORM_HINT_SATURATED => "포화 액체/증기 혼합물(증기 돔 내부)용.",
        FORM_CALCULATE => "물성 계산",
        FORM_CALCULATING => "계산 중...",
        FORM_NEEDS_VALUES => "두 값을 모두 입력해야 계산할 수 있습니다.",
        RESULT_HEADING => "계산된 상태",
        RESULT_WAITING_TITLE => "입력 대기 중",
        RESULT_WAITING_BODY => "왼쪽에서 유체 상태와 입력 변수를 고른 뒤 계산을 누르세요.",
        RESULT_UNIT_GROUP_PROMPT => "그룹: 1=압력 2=온도 3=비체적 4=에너지 5=엔트로피",
        QUALITY_SUBCOOLED => "해당 없음 (과냉)",
        QUALITY_SUPERHEATED => "해당 없음 (과열)",
        ERROR_TITLE => "계산 실패",
        ERROR_MISSING_KEY => "API 키가 없습니다. 환경 변수(또는 .env 파일)에 '{var}'를 추가하세요.\n키 발급: https://aistudio.google.com/app/apikey",
        ERROR_MISSING_KEY_HINT => "API 키를 설정한 뒤 프로그램을 다시 시작하세요.",
        ERROR_INVOCATION => "외부 계산 서비스 호출 실패:",
        ERROR_MALFORMED => "계산 결과를 해석하지 못했습니다:",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_EXIT => "Exiting application.",
        APP_TITLE => "SnapSteam",
        APP_SUBTITLE => "Intelligent Steam Tables",
        FOOTNOTE_IAPWS => "All calculations are estimated based on IAPWS-97 standards.",
        MAIN_MENU_TITLE => "\n=== SnapSteam ===",
        MAIN_MENU_FLUID_STATE => "1) Select fluid state",
        MAIN_MENU_MODE => "2) Select input variables",
        MAIN_MENU_VALUE1 => "3) Enter first value",
        MAIN_MENU_VALUE2 => "4) Enter second value",
        MAIN_MENU_UNITS => "5) Select input units",
        MAIN_MENU_CALCULATE => "6) Calculate",
        MAIN_MENU_DISPLAY_UNITS => "7) Change result display units",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        PROMPT_VALUE => "Value: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        FORM_HEADING => "State Configuration",
        FORM_CURRENT => "Current input:",
        FORM_FLUID_STATE => "Fluid State",
        FORM_INPUT_VARIABLES => "Input Variables",
        FORM_UNIT => "Unit",
        FORM_PLACEHOLDER => "Enter value",
        FORM_HINT_SINGLE_PHASE => "For subcooled liquid or superheated steam regions.",
        FORM_HINT_SATURATED => "For saturated liquid/vapor mixtures (inside the vapor dome).",
        FORM_CALCULATE => "Calculate Properties",
        FORM_CALCULATING => "Calculating...",
        FORM_NEEDS_VALUES => "Enter both values to calculate.",
        RESULT_HEADING => "Calculated State",
        RESULT_WAITING_TITLE => "Waiting for Input",
        RESULT_WAITING_BODY => "Select fluid state and input variables on the left panel, then click Calculate.",
        RESULT_UNIT_GROUP_PROMPT => "Group: 1=pressure 2=temperature 3=volume 4=energy 5=entropy",
        QUALITY_SUBCOOLED => "N/A (Subcooled)",
        QUALITY_SUPERHEATED => "N/A (Superheated)",
        ERROR_TITLE => "Calculation Failed",
        ERROR_MISSING_KEY => "API Key is missing. Please add '{var}' to your environment variables (or a .env file).\nGet your key here: https://aistudio.google.com/app/apikey",
        ERROR_MISSING_KEY_HINT => "Set the API key, then restart the application.",
        ERROR_INVOCATION => "Property service request failed:",
        ERROR_MALFORMED => "Failed to process calculation results:",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn korean_falls_back_per_key() {
        let tr = Translator::new("ko-KR");
        assert_eq!(tr.language(), Language::Ko);
        assert_eq!(tr.t(keys::FORM_UNIT), "단위");
        assert_eq!(tr.t("no.such.key"), "[missing translation]");
    }

    #[test]
    fn missing_pack_dir_uses_builtin_tables() {
        let tr = Translator::new_with_pack("ko", Some("no/such/locales"));
        assert_eq!(tr.language(), Language::Ko);
        assert_eq!(tr.t(keys::FORM_UNIT), "단위");
    }

    #[test]
    fn missing_key_message_names_variable() {
        let tr = Translator::new("en");
        let msg = tr.resolve_error(&ResolveError::MissingCredential {
            var: "STEAM_KEY".into(),
        });
        assert!(msg.contains("'STEAM_KEY'"));
    }

    #[test]
    fn explicit_flag_beats_config() {
        assert_eq!(resolve_language("ko", Some("en")), "ko");
        assert_eq!(resolve_language("auto", Some("en-US")), "en");
    }

    #[test]
    fn nested_pack_keys_are_flattened() {
        let map = parse_toml_to_map("[form]\nunit = \"Einheit\"\n").unwrap();
        assert_eq!(map.get("form.unit").map(String::as_str), Some("Einheit"));
    }
}
