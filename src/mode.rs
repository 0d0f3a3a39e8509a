//! 유체 상태 → 입력 모드 → 축 구성 정적 테이블.
//!
//! 모든 조회는 enum에 대한 완전한 `match`로 작성해, 항목 누락이 런타임 오류가
//! 아니라 컴파일 오류가 되게 한다.

use serde::{Deserialize, Serialize};

use crate::quantity::QuantityKind;

/// 유체 상태 선택지. 허용되는 입력 모드를 결정한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FluidState {
    SubcooledOrSuperheated,
    Saturated,
}

impl FluidState {
    pub const ALL: [FluidState; 2] = [FluidState::SubcooledOrSuperheated, FluidState::Saturated];

    pub fn label(self) -> &'static str {
        match self {
            FluidState::SubcooledOrSuperheated => "Subcooled/Superheated",
            FluidState::Saturated => "Saturated",
        }
    }

    /// 표기 문자열(또는 CLI 약칭)을 해석한다.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "subcooled/superheated" | "subcooled" | "superheated" | "single" | "single-phase" => {
                Some(FluidState::SubcooledOrSuperheated)
            }
            "saturated" | "sat" => Some(FluidState::Saturated),
            _ => None,
        }
    }

    /// 허용 모드 목록. 비어 있지 않으며 첫 항목이 상태 전환 시 기본값이다.
    pub fn permitted_modes(self) -> &'static [InputMode] {
        match self {
            FluidState::SubcooledOrSuperheated => &[
                InputMode::PressureTemperature,
                InputMode::PressureEnthalpy,
                InputMode::PressureEntropy,
                InputMode::TemperatureEnthalpy,
            ],
            FluidState::Saturated => &[InputMode::PressureQuality, InputMode::TemperatureQuality],
        }
    }

    pub fn default_mode(self) -> InputMode {
        self.permitted_modes()[0]
    }

    pub fn permits(self, mode: InputMode) -> bool {
        self.permitted_modes().contains(&mode)
    }
}

impl std::fmt::Display for FluidState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 두 입력 변수의 조합.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputMode {
    PressureTemperature,
    PressureEnthalpy,
    PressureEntropy,
    PressureQuality,
    TemperatureQuality,
    TemperatureEnthalpy,
}

impl InputMode {
    pub const ALL: [InputMode; 6] = [
        InputMode::PressureTemperature,
        InputMode::PressureEnthalpy,
        InputMode::PressureEntropy,
        InputMode::PressureQuality,
        InputMode::TemperatureQuality,
        InputMode::TemperatureEnthalpy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InputMode::PressureTemperature => "Pressure & Temperature",
            InputMode::PressureEnthalpy => "Pressure & Enthalpy",
            InputMode::PressureEntropy => "Pressure & Entropy",
            InputMode::PressureQuality => "Pressure & Quality",
            InputMode::TemperatureQuality => "Temperature & Quality",
            InputMode::TemperatureEnthalpy => "Temperature & Enthalpy",
        }
    }

    /// 표기 문자열 또는 두 글자 약칭(pt, ph, ps, px, tx, th)을 해석한다.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        let by_label = InputMode::ALL
            .into_iter()
            .find(|m| m.label().to_lowercase() == lower);
        by_label.or(match lower.as_str() {
            "pt" => Some(InputMode::PressureTemperature),
            "ph" => Some(InputMode::PressureEnthalpy),
            "ps" => Some(InputMode::PressureEntropy),
            "px" => Some(InputMode::PressureQuality),
            "tx" => Some(InputMode::TemperatureQuality),
            "th" => Some(InputMode::TemperatureEnthalpy),
            _ => None,
        })
    }

    /// 이 모드를 허용하는 유체 상태.
    pub fn fluid_state(self) -> FluidState {
        match self {
            InputMode::PressureTemperature
            | InputMode::PressureEnthalpy
            | InputMode::PressureEntropy
            | InputMode::TemperatureEnthalpy => FluidState::SubcooledOrSuperheated,
            InputMode::PressureQuality | InputMode::TemperatureQuality => FluidState::Saturated,
        }
    }

    /// 모드별 축 구성.
    pub fn config(self) -> ModeConfig {
        use QuantityKind::*;
        let (label1, quantity1, label2, quantity2) = match self {
            InputMode::PressureTemperature => ("Pressure", Pressure, "Temperature", Temperature),
            InputMode::PressureEnthalpy => ("Pressure", Pressure, "Enthalpy", SpecificEnergy),
            InputMode::PressureEntropy => ("Pressure", Pressure, "Entropy", SpecificEntropy),
            InputMode::PressureQuality => {
                ("Pressure (Saturation)", Pressure, "Quality (x)", Quality)
            }
            InputMode::TemperatureQuality => {
                ("Temperature (Saturation)", Temperature, "Quality (x)", Quality)
            }
            InputMode::TemperatureEnthalpy => {
                ("Temperature", Temperature, "Enthalpy", SpecificEnergy)
            }
        };
        ModeConfig {
            first: AxisConfig::new(label1, quantity1),
            second: AxisConfig::new(label2, quantity2),
        }
    }
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 입력 축 하나의 구성.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisConfig {
    pub label: &'static str,
    pub quantity: QuantityKind,
    pub default_unit: &'static str,
    pub units: &'static [&'static str],
}

impl AxisConfig {
    fn new(label: &'static str, quantity: QuantityKind) -> Self {
        Self {
            label,
            quantity,
            default_unit: quantity.base_unit(),
            units: quantity.unit_labels(),
        }
    }

    /// 단위 선택지가 하나뿐이면 사용자가 바꿀 수 없다.
    pub fn unit_selectable(&self) -> bool {
        self.units.len() > 1
    }

    pub fn accepts_unit(&self, unit: &str) -> bool {
        self.units.contains(&unit)
    }
}

/// 입력 모드의 두 축 구성.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeConfig {
    pub first: AxisConfig,
    pub second: AxisConfig,
}

/// `FluidState::permitted_modes`의 함수형 별칭.
pub fn permitted_modes(state: FluidState) -> &'static [InputMode] {
    state.permitted_modes()
}

/// `InputMode::config`의 함수형 별칭.
pub fn config(mode: InputMode) -> ModeConfig {
    mode.config()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mode_belongs_to_exactly_one_state() {
        for mode in InputMode::ALL {
            let owners: Vec<_> = FluidState::ALL
                .into_iter()
                .filter(|s| s.permits(mode))
                .collect();
            assert_eq!(owners, vec![mode.fluid_state()], "{mode}");
        }
    }

    #[test]
    fn short_codes_parse() {
        assert_eq!(InputMode::parse("PX"), Some(InputMode::PressureQuality));
        assert_eq!(
            InputMode::parse("Temperature & Enthalpy"),
            Some(InputMode::TemperatureEnthalpy)
        );
        assert_eq!(InputMode::parse("pv"), None);
    }
}
