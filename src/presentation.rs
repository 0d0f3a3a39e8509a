//! 결과 표시: 속성 그룹별 단위 환산과 숫자 서식.
//!
//! 표시 단위 변경은 저장된 결과 값에 영향을 주지 않는다.

use serde::{Deserialize, Serialize};

use crate::quantity::QuantityKind;
use crate::resolver::{CalculationResult, QUALITY_SUBCOOLED, QUALITY_SUPERHEATED};
use crate::units::*;

/// 표시 단위를 공유하는 속성 그룹.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyGroup {
    Pressure,
    Temperature,
    Volume,
    /// 내부에너지와 엔탈피
    Energy,
    Entropy,
}

impl PropertyGroup {
    pub fn quantity(self) -> QuantityKind {
        match self {
            PropertyGroup::Pressure => QuantityKind::Pressure,
            PropertyGroup::Temperature => QuantityKind::Temperature,
            PropertyGroup::Volume => QuantityKind::SpecificVolume,
            PropertyGroup::Energy => QuantityKind::SpecificEnergy,
            PropertyGroup::Entropy => QuantityKind::SpecificEntropy,
        }
    }
}

/// 그룹별 표시 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayUnits {
    pub pressure: PressureUnit,
    pub temperature: TemperatureUnit,
    pub volume: SpecificVolumeUnit,
    pub energy: SpecificEnergyUnit,
    pub entropy: SpecificEntropyUnit,
}

impl Default for DisplayUnits {
    fn default() -> Self {
        Self {
            pressure: PressureUnit::MegaPascal,
            temperature: TemperatureUnit::Celsius,
            volume: SpecificVolumeUnit::CubicMeterPerKg,
            energy: SpecificEnergyUnit::KjPerKg,
            entropy: SpecificEntropyUnit::KjPerKgK,
        }
    }
}

impl DisplayUnits {
    /// 그룹의 현재 단위 표기.
    pub fn label(&self, group: PropertyGroup) -> &'static str {
        match group {
            PropertyGroup::Pressure => self.pressure.label(),
            PropertyGroup::Temperature => self.temperature.label(),
            PropertyGroup::Volume => self.volume.label(),
            PropertyGroup::Energy => self.energy.label(),
            PropertyGroup::Entropy => self.entropy.label(),
        }
    }

    /// 그룹 단위를 표기 문자열로 바꾼다. 그룹에 없는 표기면 false를 돌려주고 그대로 둔다.
    pub fn set(&mut self, group: PropertyGroup, label: &str) -> bool {
        let updated = match group {
            PropertyGroup::Pressure => PressureUnit::parse(label).map(|u| self.pressure = u),
            PropertyGroup::Temperature => {
                TemperatureUnit::parse(label).map(|u| self.temperature = u)
            }
            PropertyGroup::Volume => SpecificVolumeUnit::parse(label).map(|u| self.volume = u),
            PropertyGroup::Energy => SpecificEnergyUnit::parse(label).map(|u| self.energy = u),
            PropertyGroup::Entropy => SpecificEntropyUnit::parse(label).map(|u| self.entropy = u),
        };
        updated.is_some()
    }

    fn convert(&self, group: PropertyGroup, base_value: f64) -> f64 {
        match group {
            PropertyGroup::Pressure => self.pressure.from_base(base_value),
            PropertyGroup::Temperature => self.temperature.from_base(base_value),
            PropertyGroup::Volume => self.volume.from_base(base_value),
            PropertyGroup::Energy => self.energy.from_base(base_value),
            PropertyGroup::Entropy => self.entropy.from_base(base_value),
        }
    }
}

/// 속성 값을 표시 문자열로 만든다.
///
/// 절댓값이 1e-4 미만이거나 1e4 초과면 소수 5자리 지수 표기, 아니면 소수 5자리 고정 표기.
pub fn format_value(value: f64) -> String {
    // -0.0 + 0.0 == +0.0
    let value = value + 0.0;
    let magnitude = value.abs();
    if magnitude < 1e-4 || magnitude > 1e4 {
        exponential(value, 5)
    } else {
        format!("{value:.5}")
    }
}

// `{:e}`는 양의 지수에 부호를 붙이지 않으므로 "e+N" 형태로 맞춘다.
fn exponential(value: f64, digits: usize) -> String {
    let raw = format!("{value:.digits$e}");
    match raw.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => raw,
    }
}

/// 건도 표시.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QualityDisplay {
    /// 값 없음
    Missing,
    /// 0~1 범위의 혼합물 건도 (소수 4자리)
    Fraction(String),
    /// 과냉 액체 관례값(-1)
    Subcooled,
    /// 과열 증기 관례값(2)
    Superheated,
    /// 관례 밖의 값 (소수 2자리)
    Other(String),
}

impl std::fmt::Display for QualityDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityDisplay::Missing => f.write_str("-"),
            QualityDisplay::Fraction(s) | QualityDisplay::Other(s) => f.write_str(s),
            QualityDisplay::Subcooled => f.write_str("N/A (Subcooled)"),
            QualityDisplay::Superheated => f.write_str("N/A (Superheated)"),
        }
    }
}

/// 건도 값을 표시 형태로 분류한다.
pub fn format_quality(quality: Option<f64>) -> QualityDisplay {
    match quality.map(|q| q + 0.0) {
        None => QualityDisplay::Missing,
        Some(q) if (0.0..=1.0).contains(&q) => QualityDisplay::Fraction(format!("{q:.4}")),
        Some(q) if q == QUALITY_SUBCOOLED => QualityDisplay::Subcooled,
        Some(q) if q == QUALITY_SUPERHEATED => QualityDisplay::Superheated,
        Some(q) => QualityDisplay::Other(format!("{q:.2}")),
    }
}

/// 결과 화면의 한 줄.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRow {
    pub label: &'static str,
    pub symbol: &'static str,
    /// 단위를 바꿀 수 있는 행이면 그룹, 건도 행은 None
    pub group: Option<PropertyGroup>,
    /// 표시 단위로 환산된 값. 건도 행은 원래 값.
    pub value: Option<f64>,
    pub text: String,
    pub unit: &'static str,
    pub note: Option<&'static str>,
}

/// 결과를 표시 단위에 맞춰 행 목록으로 만든다.
pub fn property_rows(result: &CalculationResult, units: &DisplayUnits) -> Vec<PropertyRow> {
    let p = &result.properties;
    let row = |label: &'static str,
               symbol: &'static str,
               group: PropertyGroup,
               base: f64,
               note: Option<&'static str>| {
        let value = units.convert(group, base);
        PropertyRow {
            label,
            symbol,
            group: Some(group),
            value: Some(value),
            text: format_value(value),
            unit: units.label(group),
            note,
        }
    };
    vec![
        row("Pressure", "P", PropertyGroup::Pressure, p.pressure, None),
        row("Temperature", "T", PropertyGroup::Temperature, p.temperature, None),
        row(
            "Specific Volume",
            "v",
            PropertyGroup::Volume,
            p.specific_volume,
            Some("Volume per unit mass"),
        ),
        row("Internal Energy", "u", PropertyGroup::Energy, p.internal_energy, None),
        row(
            "Enthalpy",
            "h",
            PropertyGroup::Energy,
            p.enthalpy,
            Some("Total heat content"),
        ),
        row(
            "Entropy",
            "s",
            PropertyGroup::Entropy,
            p.entropy,
            Some("Measure of disorder"),
        ),
        PropertyRow {
            label: "Quality",
            symbol: "x",
            group: None,
            value: p.quality,
            text: format_quality(p.quality).to_string(),
            unit: QUALITY_UNIT,
            note: Some("Mass fraction of vapor"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponential_matches_fixed_width_mantissa() {
        assert_eq!(exponential(0.0, 5), "0.00000e+0");
        assert_eq!(exponential(-2.5e-7, 3), "-2.500e-7");
    }

    #[test]
    fn negative_zero_prints_without_sign() {
        assert_eq!(format_value(-0.0), "0.00000e+0");
        assert_eq!(format_quality(Some(-0.0)), QualityDisplay::Fraction("0.0000".into()));
    }

    #[test]
    fn set_rejects_foreign_unit() {
        let mut u = DisplayUnits::default();
        assert!(!u.set(PropertyGroup::Pressure, "K"));
        assert_eq!(u.pressure, PressureUnit::MegaPascal);
        assert!(u.set(PropertyGroup::Temperature, "K"));
        assert_eq!(u.temperature, TemperatureUnit::Kelvin);
    }
}
