use serde::{Deserialize, Serialize};

/// 온도 표시 단위. 내부 기준은 섭씨(°C)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Celsius,
    Kelvin,
    Fahrenheit,
    Rankine,
}

const KELVIN_OFFSET: f64 = 273.15;
const RANKINE_PER_KELVIN: f64 = 1.8;

impl TemperatureUnit {
    pub const ALL: [TemperatureUnit; 4] = [
        TemperatureUnit::Celsius,
        TemperatureUnit::Kelvin,
        TemperatureUnit::Fahrenheit,
        TemperatureUnit::Rankine,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Kelvin => "K",
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Rankine => "°R",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "°c" | "c" | "celsius" => Some(TemperatureUnit::Celsius),
            "k" | "kelvin" => Some(TemperatureUnit::Kelvin),
            "°f" | "f" | "fahrenheit" => Some(TemperatureUnit::Fahrenheit),
            "°r" | "r" | "rankine" => Some(TemperatureUnit::Rankine),
            _ => None,
        }
    }

    /// °C 값을 이 단위로 환산한다. 켈빈은 가산, 화씨는 선형+오프셋, 랭킨은 둘을 합성한다.
    pub fn from_base(self, value_c: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value_c,
            TemperatureUnit::Kelvin => value_c + KELVIN_OFFSET,
            TemperatureUnit::Fahrenheit => value_c * 9.0 / 5.0 + 32.0,
            TemperatureUnit::Rankine => (value_c + KELVIN_OFFSET) * RANKINE_PER_KELVIN,
        }
    }

    /// 이 단위의 값을 °C로 되돌린다.
    pub fn to_base(self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Kelvin => value - KELVIN_OFFSET,
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureUnit::Rankine => value / RANKINE_PER_KELVIN - KELVIN_OFFSET,
        }
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 온도를 서로 다른 단위로 변환한다.
pub fn convert_temperature_units(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    to.from_base(from.to_base(value))
}
