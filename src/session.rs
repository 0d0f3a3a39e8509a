//! 세션 컨텍스트와 계산 흐름 조율.
//!
//! 입력 상태, 현재 결과, 로딩/오류 플래그, 표시 단위를 한 객체로 묶어 전달한다.
//! 전역 상태는 두지 않는다. 요청은 한 번에 하나만 진행되며, 로딩 중에는
//! `begin_calculation`이 새 요청을 만들지 않는다.

use crate::form::{CalculationRequest, FormAction, InputState};
use crate::presentation::{property_rows, DisplayUnits, PropertyGroup, PropertyRow};
use crate::resolver::{CalculationResult, PropertyResolver, ResolveError};

/// 진행 중인 요청 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
}

/// 사용자 세션 하나의 상태.
#[derive(Debug, Clone, Default)]
pub struct Session {
    input: InputState,
    result: Option<CalculationResult>,
    status: Status,
    error: Option<ResolveError>,
    display: DisplayUnits,
}

impl Session {
    pub fn new(display: DisplayUnits) -> Self {
        Self {
            display,
            ..Self::default()
        }
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn result(&self) -> Option<&CalculationResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&ResolveError> {
        self.error.as_ref()
    }

    pub fn display_units(&self) -> &DisplayUnits {
        &self.display
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    /// 폼 편집을 적용한다.
    pub fn dispatch(&mut self, action: FormAction) {
        let current = std::mem::take(&mut self.input);
        self.input = current.apply(action);
    }

    /// 결과 표시 단위만 바꾼다. 저장된 결과는 건드리지 않는다.
    pub fn set_display_unit(&mut self, group: PropertyGroup, label: &str) -> bool {
        self.display.set(group, label)
    }

    pub fn can_calculate(&self) -> bool {
        self.input.can_calculate(self.is_loading())
    }

    /// 계산을 시작한다. 조건이 맞지 않으면 None.
    ///
    /// 이전 오류 메시지는 지우지만 이전 결과는 유지한다.
    pub fn begin_calculation(&mut self) -> Option<CalculationRequest> {
        if !self.can_calculate() {
            return None;
        }
        self.status = Status::Loading;
        self.error = None;
        let request = self.input.to_request();
        tracing::debug!(request = %request.describe(), "계산 시작");
        Some(request)
    }

    /// 계산 결과를 반영하고 로딩을 끝낸다. 실패 시 이전 결과는 그대로 남는다.
    pub fn complete_calculation(&mut self, outcome: Result<CalculationResult, ResolveError>) {
        self.status = Status::Idle;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "계산 실패");
                self.error = Some(err);
            }
        }
    }

    /// 동기 호출 경로: 시작, 계산기 호출, 반영까지 한 번에 처리한다.
    ///
    /// 계산을 시작하지 못했으면 false.
    pub fn calculate<R: PropertyResolver + ?Sized>(&mut self, resolver: &R) -> bool {
        let Some(request) = self.begin_calculation() else {
            return false;
        };
        let outcome = resolver.resolve(&request);
        self.complete_calculation(outcome);
        true
    }

    /// 현재 결과를 표시 단위로 환산한 행 목록.
    pub fn rows(&self) -> Option<Vec<PropertyRow>> {
        self.result
            .as_ref()
            .map(|result| property_rows(result, &self.display))
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}
