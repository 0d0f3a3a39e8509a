//! 표시 단위 변환 회귀 테스트.
use proptest::prelude::*;
use snapsteam::conversion::{self, ConversionError};
use snapsteam::quantity::QuantityKind;
use snapsteam::units::{
    convert_pressure_units, convert_temperature_units, PressureUnit, TemperatureUnit,
};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

#[test]
fn pressure_factors() {
    assert_close("bar", conversion::convert_pressure(0.101325, "bar"), 1.01325, 1e-12);
    assert_close("kPa", conversion::convert_pressure(0.101325, "kPa"), 101.325, 1e-12);
    assert_close("atm", conversion::convert_pressure(1.0, "atm"), 9.86923, 1e-12);
    assert_close("psia", conversion::convert_pressure(1.0, "psia"), 145.038, 1e-12);
    assert_eq!(conversion::convert_pressure(2.5, "MPa"), 2.5);
}

#[test]
fn temperature_offsets() {
    assert_close("K", conversion::convert_temperature(100.0, "K"), 373.15, 1e-12);
    assert_close("°F", conversion::convert_temperature(100.0, "°F"), 212.0, 1e-12);
    assert_close("°R", conversion::convert_temperature(0.0, "°R"), 491.67, 1e-12);
    assert_close("-40", conversion::convert_temperature(-40.0, "°F"), -40.0, 1e-12);
}

#[test]
fn specific_property_factors() {
    assert_close("ft³/lb", conversion::convert_volume(1.0, "ft³/lb"), 16.0185, 1e-12);
    assert_close("Btu/lb", conversion::convert_energy(2.326, "Btu/lb"), 1.0, 1e-12);
    assert_close(
        "Btu/(lb·°R)",
        conversion::convert_entropy(4.1868, "Btu/(lb·°R)"),
        1.0,
        1e-12,
    );
}

#[test]
fn unit_to_unit_goes_through_base() {
    assert_close(
        "bar->psia",
        convert_pressure_units(1.0, PressureUnit::Bar, PressureUnit::Psia),
        14.5038,
        1e-12,
    );
    assert_close(
        "°F->K",
        convert_temperature_units(212.0, TemperatureUnit::Fahrenheit, TemperatureUnit::Kelvin),
        373.15,
        1e-12,
    );
}

#[test]
fn unknown_unit_returns_value_unchanged() {
    assert_eq!(conversion::convert_pressure(3.0, "furlongs"), 3.0);
    assert_eq!(conversion::convert_temperature(-12.5, ""), -12.5);
    assert_eq!(conversion::convert(QuantityKind::SpecificEnergy, 7.0, "cal/g"), 7.0);
}

#[test]
fn strict_conversion_reports_unknown_unit() {
    let err = conversion::convert_strict(QuantityKind::Pressure, 1.0, "torr").unwrap_err();
    assert_eq!(
        err,
        ConversionError::UnknownUnit {
            kind: QuantityKind::Pressure,
            unit: "torr".into()
        }
    );
    assert!(conversion::convert_strict(QuantityKind::Quality, 0.5, "-").is_ok());
}

#[test]
fn every_listed_label_is_recognized_strictly() {
    for kind in QuantityKind::ALL {
        for unit in kind.unit_labels() {
            assert!(
                conversion::convert_strict(kind, 1.0, unit).is_ok(),
                "{kind:?} {unit}"
            );
        }
    }
}

proptest! {
    #[test]
    fn base_round_trip(value in -1.0e6_f64..1.0e6_f64) {
        for kind in QuantityKind::ALL {
            for unit in kind.unit_labels() {
                let shown = conversion::convert(kind, value, unit);
                let back = conversion::to_base(kind, shown, unit);
                let tol = 1e-9 * value.abs().max(1.0);
                prop_assert!((back - value).abs() <= tol, "{:?} {} {} -> {}", kind, unit, value, back);
            }
        }
    }
}
