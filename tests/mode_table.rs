//! 유체 상태/입력 모드 표 구성 검사.
use snapsteam::mode::{self, FluidState, InputMode};
use snapsteam::quantity::QuantityKind;

#[test]
fn every_mode_has_a_config_and_one_owner() {
    for m in InputMode::ALL {
        let cfg = mode::config(m);
        for axis in [cfg.first, cfg.second] {
            assert!(!axis.units.is_empty(), "{m} {}", axis.label);
            assert!(axis.accepts_unit(axis.default_unit), "{m} {}", axis.label);
            assert_eq!(axis.default_unit, axis.units[0]);
        }
        let owners = FluidState::ALL.iter().filter(|s| s.permits(m)).count();
        assert_eq!(owners, 1, "{m}");
        assert!(m.fluid_state().permits(m));
    }
}

#[test]
fn permitted_mode_lists() {
    assert_eq!(
        mode::permitted_modes(FluidState::SubcooledOrSuperheated),
        &[
            InputMode::PressureTemperature,
            InputMode::PressureEnthalpy,
            InputMode::PressureEntropy,
            InputMode::TemperatureEnthalpy,
        ]
    );
    assert_eq!(
        mode::permitted_modes(FluidState::Saturated),
        &[InputMode::PressureQuality, InputMode::TemperatureQuality]
    );
    assert_eq!(FluidState::Saturated.default_mode(), InputMode::PressureQuality);
}

#[test]
fn saturated_modes_use_saturation_labels_and_fixed_quality_unit() {
    let px = InputMode::PressureQuality.config();
    assert_eq!(px.first.label, "Pressure (Saturation)");
    assert_eq!(px.second.label, "Quality (x)");
    assert_eq!(px.second.quantity, QuantityKind::Quality);
    assert_eq!(px.second.units, &["-"]);
    assert!(!px.second.unit_selectable());

    let tx = InputMode::TemperatureQuality.config();
    assert_eq!(tx.first.label, "Temperature (Saturation)");
    assert_eq!(tx.first.units, &["°C", "K", "°F", "°R"]);
}

#[test]
fn single_phase_unit_lists() {
    let ph = InputMode::PressureEnthalpy.config();
    assert_eq!(ph.first.units, &["MPa", "bar", "kPa", "atm", "psia"]);
    assert_eq!(ph.second.units, &["kJ/kg", "Btu/lb"]);
    let ps = InputMode::PressureEntropy.config();
    assert_eq!(ps.second.units, &["kJ/(kg·K)", "Btu/(lb·°R)"]);
}

#[test]
fn modes_parse_by_label_and_short_name() {
    assert_eq!(InputMode::parse("tx"), Some(InputMode::TemperatureQuality));
    assert_eq!(
        InputMode::parse("Pressure & Temperature"),
        Some(InputMode::PressureTemperature)
    );
    assert_eq!(InputMode::parse("xy"), None);
}
