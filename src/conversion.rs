//! 단위 표기 문자열 기반 변환.
//!
//! 모든 함수는 물리량별 기준 단위(MPa, °C, m³/kg, kJ/kg, kJ/(kg·K)) 값을 받아
//! 요청된 표시 단위로 환산한다. 알 수 없는 단위 표기는 값을 그대로 돌려준다
//! (`convert`). 표기 오류를 잡아야 하면 `convert_strict`를 쓴다.

use thiserror::Error;

use crate::quantity::QuantityKind;
use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("알 수 없는 단위: {unit} ({kind:?})")]
    UnknownUnit { kind: QuantityKind, unit: String },
}

/// MPa 값을 `to_unit`으로 환산한다.
pub fn convert_pressure(value: f64, to_unit: &str) -> f64 {
    PressureUnit::parse(to_unit).map_or(value, |u| u.from_base(value))
}

/// °C 값을 `to_unit`으로 환산한다.
pub fn convert_temperature(value: f64, to_unit: &str) -> f64 {
    TemperatureUnit::parse(to_unit).map_or(value, |u| u.from_base(value))
}

/// m³/kg 값을 `to_unit`으로 환산한다.
pub fn convert_volume(value: f64, to_unit: &str) -> f64 {
    SpecificVolumeUnit::parse(to_unit).map_or(value, |u| u.from_base(value))
}

/// kJ/kg 값을 `to_unit`으로 환산한다.
pub fn convert_energy(value: f64, to_unit: &str) -> f64 {
    SpecificEnergyUnit::parse(to_unit).map_or(value, |u| u.from_base(value))
}

/// kJ/(kg·K) 값을 `to_unit`으로 환산한다.
pub fn convert_entropy(value: f64, to_unit: &str) -> f64 {
    SpecificEntropyUnit::parse(to_unit).map_or(value, |u| u.from_base(value))
}

/// 기준 단위 값을 물리량 종류에 맞춰 환산한다. 모르는 단위는 항등 변환.
pub fn convert(kind: QuantityKind, value: f64, to_unit: &str) -> f64 {
    convert_strict(kind, value, to_unit).unwrap_or(value)
}

/// `convert`와 같지만 모르는 단위 표기를 오류로 보고한다.
pub fn convert_strict(kind: QuantityKind, value: f64, to_unit: &str) -> Result<f64, ConversionError> {
    let unknown = || ConversionError::UnknownUnit {
        kind,
        unit: to_unit.to_string(),
    };
    let converted = match kind {
        QuantityKind::Pressure => PressureUnit::parse(to_unit).map(|u| u.from_base(value)),
        QuantityKind::Temperature => TemperatureUnit::parse(to_unit).map(|u| u.from_base(value)),
        QuantityKind::SpecificVolume => {
            SpecificVolumeUnit::parse(to_unit).map(|u| u.from_base(value))
        }
        QuantityKind::SpecificEnergy => {
            SpecificEnergyUnit::parse(to_unit).map(|u| u.from_base(value))
        }
        QuantityKind::SpecificEntropy => {
            SpecificEntropyUnit::parse(to_unit).map(|u| u.from_base(value))
        }
        QuantityKind::Quality => (to_unit.trim() == QUALITY_UNIT).then_some(value),
    };
    converted.ok_or_else(unknown)
}

/// 표시 단위 값을 기준 단위로 되돌린다. 모르는 단위는 항등 변환.
pub fn to_base(kind: QuantityKind, value: f64, from_unit: &str) -> f64 {
    to_base_strict(kind, value, from_unit).unwrap_or(value)
}

/// `to_base`와 같지만 모르는 단위 표기를 오류로 보고한다.
pub fn to_base_strict(
    kind: QuantityKind,
    value: f64,
    from_unit: &str,
) -> Result<f64, ConversionError> {
    let unknown = || ConversionError::UnknownUnit {
        kind,
        unit: from_unit.to_string(),
    };
    let converted = match kind {
        QuantityKind::Pressure => PressureUnit::parse(from_unit).map(|u| u.to_base(value)),
        QuantityKind::Temperature => TemperatureUnit::parse(from_unit).map(|u| u.to_base(value)),
        QuantityKind::SpecificVolume => {
            SpecificVolumeUnit::parse(from_unit).map(|u| u.to_base(value))
        }
        QuantityKind::SpecificEnergy => {
            SpecificEnergyUnit::parse(from_unit).map(|u| u.to_base(value))
        }
        QuantityKind::SpecificEntropy => {
            SpecificEntropyUnit::parse(from_unit).map(|u| u.to_base(value))
        }
        QuantityKind::Quality => (from_unit.trim() == QUALITY_UNIT).then_some(value),
    };
    converted.ok_or_else(unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_unit_is_identity() {
        assert_eq!(convert_pressure(1.5, "furlongs"), 1.5);
        assert_eq!(convert(QuantityKind::Temperature, 42.0, ""), 42.0);
        assert_eq!(to_base(QuantityKind::SpecificEnergy, 7.0, "eV"), 7.0);
    }

    #[test]
    fn strict_reports_unknown_unit() {
        let err = convert_strict(QuantityKind::SpecificEntropy, 1.0, "J/K").unwrap_err();
        assert_eq!(
            err,
            ConversionError::UnknownUnit {
                kind: QuantityKind::SpecificEntropy,
                unit: "J/K".into()
            }
        );
    }

    #[test]
    fn quality_only_accepts_dash() {
        assert_eq!(convert_strict(QuantityKind::Quality, 0.3, "-"), Ok(0.3));
        assert!(convert_strict(QuantityKind::Quality, 0.3, "%").is_err());
    }
}
