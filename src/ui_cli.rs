use std::io::{self, Write};

use crate::app::AppError;
use crate::form::{Field, FormAction, InputState};
use crate::i18n::{keys, Translator};
use crate::mode::{FluidState, InputMode};
use crate::presentation::PropertyGroup;
use crate::quantity::QuantityKind;
use crate::resolver::PropertyResolver;
use crate::session::Session;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    FluidState,
    Mode,
    Value(Field),
    Units,
    Calculate,
    DisplayUnits,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_FLUID_STATE,
        keys::MAIN_MENU_MODE,
        keys::MAIN_MENU_VALUE1,
        keys::MAIN_MENU_VALUE2,
        keys::MAIN_MENU_UNITS,
        keys::MAIN_MENU_CALCULATE,
        keys::MAIN_MENU_DISPLAY_UNITS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::FluidState),
            "2" => return Ok(MenuChoice::Mode),
            "3" => return Ok(MenuChoice::Value(Field::First)),
            "4" => return Ok(MenuChoice::Value(Field::Second)),
            "5" => return Ok(MenuChoice::Units),
            "6" => return Ok(MenuChoice::Calculate),
            "7" => return Ok(MenuChoice::DisplayUnits),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 현재 입력 상태를 한 블록으로 출력한다.
pub fn print_form(tr: &Translator, input: &InputState) {
    let cfg = input.mode.config();
    println!("\n{}", tr.t(keys::FORM_CURRENT));
    println!("  {}: {}", tr.t(keys::FORM_FLUID_STATE), input.fluid_state);
    println!("  {}: {}", tr.t(keys::FORM_INPUT_VARIABLES), input.mode);
    println!("  {}: {} {}", cfg.first.label, input.value1, input.unit1);
    println!("  {}: {} {}", cfg.second.label, input.value2, input.unit2);
}

pub fn handle_fluid_state(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    println!("\n-- {} --", tr.t(keys::FORM_FLUID_STATE));
    let state = select_from(tr, &FluidState::ALL, |s| s.label().to_string())?;
    if state != session.input().fluid_state {
        session.dispatch(FormAction::SetFluidState(state));
    }
    let hint = match state {
        FluidState::SubcooledOrSuperheated => keys::FORM_HINT_SINGLE_PHASE,
        FluidState::Saturated => keys::FORM_HINT_SATURATED,
    };
    println!("{}", tr.t(hint));
    Ok(())
}

pub fn handle_mode(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    println!("\n-- {} --", tr.t(keys::FORM_INPUT_VARIABLES));
    let modes = session.input().fluid_state.permitted_modes();
    let mode = select_from(tr, modes, |m| m.label().to_string())?;
    if mode != session.input().mode {
        session.dispatch(FormAction::SetMode(mode));
    }
    Ok(())
}

pub fn handle_value(tr: &Translator, session: &mut Session, field: Field) -> Result<(), AppError> {
    let cfg = session.input().mode.config();
    let axis = match field {
        Field::First => cfg.first,
        Field::Second => cfg.second,
    };
    println!("\n-- {} --", axis.label);
    let text = read_number_text(tr, &tr.t(keys::PROMPT_VALUE))?;
    session.dispatch(FormAction::SetValue(field, text));
    Ok(())
}

/// 두 입력 축의 단위를 고른다. 선택지가 하나뿐인 축은 건너뛴다.
pub fn handle_units(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    let cfg = session.input().mode.config();
    for (field, axis) in [(Field::First, cfg.first), (Field::Second, cfg.second)] {
        if !axis.unit_selectable() {
            continue;
        }
        println!("\n-- {} {} --", axis.label, tr.t(keys::FORM_UNIT));
        let unit = select_from(tr, axis.units, |u| u.to_string())?;
        session.dispatch(FormAction::SetUnit(field, unit.to_string()));
    }
    Ok(())
}

/// 계산을 수행하고 결과나 오류를 출력한다. 계산 실패는 메뉴 루프를 끝내지 않는다.
pub fn handle_calculate(tr: &Translator, session: &mut Session, resolver: &dyn PropertyResolver) {
    if !session.can_calculate() {
        println!("{}", tr.t(keys::FORM_NEEDS_VALUES));
        return;
    }
    println!("{}", tr.t(keys::FORM_CALCULATING));
    session.calculate(resolver);
    if let Some(err) = session.error() {
        println!("\n[{}] {}", tr.t(keys::ERROR_TITLE), tr.resolve_error(err));
        if err.is_missing_credential() {
            println!("{}", tr.t(keys::ERROR_MISSING_KEY_HINT));
        }
    }
    print_result(tr, session);
}

/// 결과 표시 단위를 그룹별로 바꾼 뒤 결과를 다시 출력한다.
pub fn handle_display_units(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    println!("{}", tr.t(keys::RESULT_UNIT_GROUP_PROMPT));
    let group = loop {
        let sel = read_line(&tr.t(keys::PROMPT_SELECT))?;
        match sel.trim() {
            "1" => break PropertyGroup::Pressure,
            "2" => break PropertyGroup::Temperature,
            "3" => break PropertyGroup::Volume,
            "4" => break PropertyGroup::Energy,
            "5" => break PropertyGroup::Entropy,
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    };
    let unit = select_from(tr, group.quantity().unit_labels(), |u| u.to_string())?;
    session.set_display_unit(group, unit);
    print_result(tr, session);
    Ok(())
}

/// 현재 결과를 표 형태로 출력한다. 결과가 없으면 대기 안내를 출력한다.
pub fn print_result(tr: &Translator, session: &Session) {
    let (Some(result), Some(rows)) = (session.result(), session.rows()) else {
        println!("\n{}", tr.t(keys::RESULT_WAITING_TITLE));
        println!("{}", tr.t(keys::RESULT_WAITING_BODY));
        return;
    };
    println!("\n== {}: {} ==", tr.t(keys::RESULT_HEADING), result.properties.phase);
    if !result.description.is_empty() {
        println!("{}", result.description);
    }
    for row in rows {
        let text = if row.group.is_none() {
            tr.quality(&crate::presentation::format_quality(row.value))
        } else {
            row.text
        };
        println!("  {:<16} {:<2} = {:>16} {}", row.label, row.symbol, text, row.unit);
    }
    println!("{}", tr.t(keys::FOOTNOTE_IAPWS));
}

/// 유체 상태별 입력 모드와 축 구성을 출력한다.
pub fn print_modes(tr: &Translator) {
    for state in FluidState::ALL {
        println!("\n[{}] {}", tr.t(keys::FORM_FLUID_STATE), state);
        for mode in state.permitted_modes() {
            print_mode(*mode);
        }
    }
}

fn print_mode(mode: InputMode) {
    let cfg = mode.config();
    println!("  {mode}");
    for axis in [cfg.first, cfg.second] {
        println!("    {:<26} {}", axis.label, axis.units.join(" | "));
    }
}

/// 변환 결과 한 줄.
pub fn print_conversion(kind: QuantityKind, value: f64, converted: f64, to_unit: &str) {
    println!("{value} {} = {converted} {to_unit}", kind.base_unit());
}

fn select_from<T: Copy>(
    tr: &Translator,
    items: &[T],
    label: impl Fn(&T) -> String,
) -> Result<T, AppError> {
    for (i, item) in items.iter().enumerate() {
        println!("{}) {}", i + 1, label(item));
    }
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_SELECT))?;
        let picked = sel
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| items.get(i));
        match picked {
            Some(item) => return Ok(*item),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed").into());
    }
    Ok(buf)
}

// 입력 원문을 보존하되 숫자로 읽히는지만 확인한다.
fn read_number_text(tr: &Translator, prompt: &str) -> Result<String, AppError> {
    loop {
        let s = read_line(prompt)?;
        let text = s.trim();
        match text.parse::<f64>() {
            Ok(_) => return Ok(text.to_string()),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
