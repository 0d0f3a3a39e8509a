//! 입력 폼 상태와 전이 규칙.
//!
//! 모든 전이는 `(이전 상태, 액션) -> 새 상태`인 순수 함수이며, 중간의 무효 상태는
//! 밖에서 관찰되지 않는다.

use serde::{Deserialize, Serialize};

use crate::mode::{FluidState, InputMode};

/// 폼의 현재 선택값. 값은 사용자가 입력한 원문 그대로 보관한다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub fluid_state: FluidState,
    pub mode: InputMode,
    pub value1: String,
    pub value2: String,
    pub unit1: String,
    pub unit2: String,
}

impl Default for InputState {
    /// 대기압(0.101325 MPa), 100 °C.
    fn default() -> Self {
        Self {
            fluid_state: FluidState::SubcooledOrSuperheated,
            mode: InputMode::PressureTemperature,
            value1: "0.101325".into(),
            value2: "100".into(),
            unit1: "MPa".into(),
            unit2: "°C".into(),
        }
    }
}

/// 입력 필드 위치.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    First,
    Second,
}

/// 사용자 편집 하나.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    SetFluidState(FluidState),
    SetMode(InputMode),
    SetValue(Field, String),
    SetUnit(Field, String),
}

impl InputState {
    /// 주어진 유체 상태의 기본 모드, 빈 값, 기본 단위로 새 상태를 만든다.
    pub fn for_fluid_state(fluid_state: FluidState) -> Self {
        Self::for_mode(fluid_state, fluid_state.default_mode())
    }

    fn for_mode(fluid_state: FluidState, mode: InputMode) -> Self {
        let cfg = mode.config();
        Self {
            fluid_state,
            mode,
            value1: String::new(),
            value2: String::new(),
            unit1: cfg.first.default_unit.to_string(),
            unit2: cfg.second.default_unit.to_string(),
        }
    }

    /// 액션을 적용한 새 상태를 반환한다.
    ///
    /// 현재 유체 상태가 허용하지 않는 모드나, 현재 모드의 목록에 없는 단위는
    /// 무시되어 원래 상태가 그대로 반환된다.
    pub fn apply(self, action: FormAction) -> Self {
        match action {
            FormAction::SetFluidState(state) => Self::for_fluid_state(state),
            FormAction::SetMode(mode) => {
                if !self.fluid_state.permits(mode) {
                    tracing::warn!(%mode, state = %self.fluid_state, "허용되지 않는 모드 선택 무시");
                    return self;
                }
                Self::for_mode(self.fluid_state, mode)
            }
            FormAction::SetValue(Field::First, value) => Self {
                value1: value,
                ..self
            },
            FormAction::SetValue(Field::Second, value) => Self {
                value2: value,
                ..self
            },
            FormAction::SetUnit(field, unit) => {
                let cfg = self.mode.config();
                let axis = match field {
                    Field::First => cfg.first,
                    Field::Second => cfg.second,
                };
                if !axis.accepts_unit(&unit) {
                    tracing::warn!(%unit, mode = %self.mode, "목록에 없는 단위 선택 무시");
                    return self;
                }
                match field {
                    Field::First => Self {
                        unit1: unit,
                        ..self
                    },
                    Field::Second => Self {
                        unit2: unit,
                        ..self
                    },
                }
            }
        }
    }

    /// 모드가 유체 상태에 허용되고 두 단위가 모드의 목록에 있는지 확인한다.
    pub fn is_consistent(&self) -> bool {
        let cfg = self.mode.config();
        self.fluid_state.permits(self.mode)
            && cfg.first.accepts_unit(&self.unit1)
            && cfg.second.accepts_unit(&self.unit2)
    }

    /// 두 값이 모두 채워졌는지. 공백만 있는 값은 빈 값으로 본다.
    pub fn has_values(&self) -> bool {
        !self.value1.trim().is_empty() && !self.value2.trim().is_empty()
    }

    /// 계산 버튼 활성 여부.
    pub fn can_calculate(&self, loading: bool) -> bool {
        !loading && self.has_values()
    }

    /// 외부 계산기로 넘길 요청을 만든다. 값은 원문 그대로 담는다.
    pub fn to_request(&self) -> CalculationRequest {
        CalculationRequest {
            fluid_state: self.fluid_state,
            mode: self.mode,
            value1: self.value1.trim().to_string(),
            unit1: self.unit1.clone(),
            value2: self.value2.trim().to_string(),
            unit2: self.unit2.clone(),
        }
    }
}

/// 계산 요청 한 건.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationRequest {
    pub fluid_state: FluidState,
    pub mode: InputMode,
    pub value1: String,
    pub unit1: String,
    pub value2: String,
    pub unit2: String,
}

impl CalculationRequest {
    /// 외부 계산기에 전달하는 설명 문자열.
    pub fn describe(&self) -> String {
        format!(
            "Fluid State: {}, Input 1: {} {}, Input 2: {} {} ({})",
            self.fluid_state, self.value1, self.unit1, self.value2, self.unit2, self.mode
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_consistent() {
        let s = InputState::default();
        assert!(s.is_consistent());
        assert!(s.can_calculate(false));
        assert!(!s.can_calculate(true));
    }

    #[test]
    fn whitespace_value_counts_as_empty() {
        let s = InputState::default().apply(FormAction::SetValue(Field::Second, "  ".into()));
        assert!(!s.can_calculate(false));
    }

    #[test]
    fn describe_contains_literal_fields() {
        let req = InputState::default().to_request();
        assert_eq!(
            req.describe(),
            "Fluid State: Subcooled/Superheated, Input 1: 0.101325 MPa, Input 2: 100 °C (Pressure & Temperature)"
        );
    }
}
