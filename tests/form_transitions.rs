//! 입력 폼 전이 규칙.
use snapsteam::form::{Field, FormAction, InputState};
use snapsteam::mode::{FluidState, InputMode};

#[test]
fn switching_to_saturated_resets_mode_values_and_units() {
    let s = InputState::default().apply(FormAction::SetFluidState(FluidState::Saturated));
    assert_eq!(s.fluid_state, FluidState::Saturated);
    assert_eq!(s.mode, InputMode::PressureQuality);
    assert_eq!(s.value1, "");
    assert_eq!(s.value2, "");
    assert_eq!(s.unit1, "MPa");
    assert_eq!(s.unit2, "-");
    assert!(s.is_consistent());
    assert!(!s.can_calculate(false));
}

#[test]
fn reselecting_the_same_state_still_clears_values() {
    let s = InputState::default()
        .apply(FormAction::SetFluidState(FluidState::SubcooledOrSuperheated));
    assert_eq!(s.mode, InputMode::PressureTemperature);
    assert!(s.value1.is_empty() && s.value2.is_empty());
}

#[test]
fn mode_change_clears_values_and_applies_default_units() {
    let s = InputState::default()
        .apply(FormAction::SetUnit(Field::First, "bar".into()))
        .apply(FormAction::SetMode(InputMode::TemperatureEnthalpy));
    assert_eq!(s.fluid_state, FluidState::SubcooledOrSuperheated);
    assert_eq!(s.unit1, "°C");
    assert_eq!(s.unit2, "kJ/kg");
    assert!(s.value1.is_empty() && s.value2.is_empty());
}

#[test]
fn mode_outside_current_state_is_ignored() {
    let before = InputState::default();
    let after = before.clone().apply(FormAction::SetMode(InputMode::TemperatureQuality));
    assert_eq!(after, before);
}

#[test]
fn unit_outside_axis_list_is_ignored() {
    let before = InputState::default();
    let after = before.clone().apply(FormAction::SetUnit(Field::Second, "bar".into()));
    assert_eq!(after, before);
}

#[test]
fn value_edit_touches_only_its_field() {
    let s = InputState::default().apply(FormAction::SetValue(Field::First, "1.5".into()));
    assert_eq!(s.value1, "1.5");
    assert_eq!(s.value2, "100");
    assert_eq!(s.unit1, "MPa");
    assert_eq!(s.mode, InputMode::PressureTemperature);

    let s = s.apply(FormAction::SetUnit(Field::Second, "K".into()));
    assert_eq!(s.unit2, "K");
    assert_eq!(s.value2, "100");
}

#[test]
fn calculate_gate_needs_both_values_and_idle() {
    let s = InputState::for_fluid_state(FluidState::Saturated)
        .apply(FormAction::SetValue(Field::First, "1".into()));
    assert!(!s.can_calculate(false));
    let s = s.apply(FormAction::SetValue(Field::Second, "0.5".into()));
    assert!(s.can_calculate(false));
    assert!(!s.can_calculate(true));
}

#[test]
fn request_keeps_raw_text() {
    let req = InputState::for_fluid_state(FluidState::Saturated)
        .apply(FormAction::SetMode(InputMode::TemperatureQuality))
        .apply(FormAction::SetValue(Field::First, " 1e2 ".into()))
        .apply(FormAction::SetValue(Field::Second, "0.25".into()))
        .to_request();
    assert_eq!(
        req.describe(),
        "Fluid State: Saturated, Input 1: 1e2 °C, Input 2: 0.25 - (Temperature & Quality)"
    );
}
