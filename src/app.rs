use std::path::Path;

use thiserror::Error;

use crate::config::Config;
use crate::conversion::{self, ConversionError};
use crate::form::{Field, FormAction};
use crate::i18n::{self, Translator};
use crate::mode::{FluidState, InputMode};
use crate::quantity::QuantityKind;
use crate::resolver::{PropertyResolver, ResolveError};
use crate::session::Session;
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] crate::config::ConfigError),
    /// 단위 변환 오류
    #[error("단위 변환 오류: {0}")]
    Conversion(#[from] ConversionError),
    /// 외부 계산기 오류
    #[error("{0}")]
    Resolve(#[from] ResolveError),
    /// 명령행 인자 등 사용자 입력 오류
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 종료 시 결과 표시 단위를 설정 파일에 남긴다.
pub fn run(
    config: &mut Config,
    config_path: &Path,
    tr: &Translator,
    resolver: &dyn PropertyResolver,
) -> Result<(), AppError> {
    let mut session = Session::new(config.display_units);
    loop {
        ui_cli::print_form(tr, session.input());
        match ui_cli::main_menu(tr)? {
            MenuChoice::FluidState => ui_cli::handle_fluid_state(tr, &mut session)?,
            MenuChoice::Mode => ui_cli::handle_mode(tr, &mut session)?,
            MenuChoice::Value(field) => ui_cli::handle_value(tr, &mut session, field)?,
            MenuChoice::Units => ui_cli::handle_units(tr, &mut session)?,
            MenuChoice::Calculate => ui_cli::handle_calculate(tr, &mut session, resolver),
            MenuChoice::DisplayUnits => ui_cli::handle_display_units(tr, &mut session)?,
            MenuChoice::Exit => {
                config.display_units = *session.display_units();
                config.save_to(config_path)?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}

/// 한 번의 계산 요청 인자.
#[derive(Debug, Clone)]
pub struct CalcArgs {
    pub state: String,
    pub mode: Option<String>,
    pub value1: String,
    pub unit1: Option<String>,
    pub value2: String,
    pub unit2: Option<String>,
}

/// 대화형 메뉴 없이 한 번 계산한다. 성공하면 결과가 담긴 세션을 돌려준다.
pub fn calculate_once(
    config: &Config,
    resolver: &dyn PropertyResolver,
    args: &CalcArgs,
) -> Result<Session, AppError> {
    let state = FluidState::parse(&args.state)
        .ok_or_else(|| AppError::InvalidInput(format!("유체 상태 '{}'", args.state)))?;
    let mode = match &args.mode {
        Some(m) => InputMode::parse(m)
            .ok_or_else(|| AppError::InvalidInput(format!("입력 모드 '{m}'")))?,
        None => state.default_mode(),
    };
    if !state.permits(mode) {
        return Err(AppError::InvalidInput(format!(
            "'{mode}' 모드는 '{state}' 상태에서 쓸 수 없습니다"
        )));
    }

    let mut session = Session::new(config.display_units);
    session.dispatch(FormAction::SetFluidState(state));
    session.dispatch(FormAction::SetMode(mode));

    let cfg = mode.config();
    for (field, axis, unit) in [
        (Field::First, cfg.first, &args.unit1),
        (Field::Second, cfg.second, &args.unit2),
    ] {
        if let Some(unit) = unit {
            if !axis.accepts_unit(unit) {
                return Err(AppError::InvalidInput(format!(
                    "'{}'에 단위 '{unit}' 없음 (가능: {})",
                    axis.label,
                    axis.units.join(", ")
                )));
            }
            session.dispatch(FormAction::SetUnit(field, unit.clone()));
        }
    }
    session.dispatch(FormAction::SetValue(Field::First, args.value1.clone()));
    session.dispatch(FormAction::SetValue(Field::Second, args.value2.clone()));

    if !session.calculate(resolver) {
        return Err(AppError::InvalidInput("두 값을 모두 입력하세요".into()));
    }
    if let Some(err) = session.error() {
        return Err(AppError::Resolve(err.clone()));
    }
    Ok(session)
}

/// 기준 단위 값을 대상 단위로 바꾼다. `strict`면 모르는 단위를 오류로 본다.
pub fn convert_once(
    quantity: &str,
    value: f64,
    to_unit: &str,
    strict: bool,
) -> Result<f64, AppError> {
    let kind = QuantityKind::parse(quantity)
        .ok_or_else(|| AppError::InvalidInput(format!("물리량 '{quantity}'")))?;
    if strict {
        Ok(conversion::convert_strict(kind, value, to_unit)?)
    } else {
        Ok(conversion::convert(kind, value, to_unit))
    }
}
