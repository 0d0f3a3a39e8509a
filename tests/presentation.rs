//! 결과 표시 서식과 그룹별 단위 환산.
use snapsteam::presentation::{
    format_quality, format_value, property_rows, DisplayUnits, PropertyGroup, QualityDisplay,
};
use snapsteam::resolver::{CalculationResult, SteamProperties};
use snapsteam::units::{PressureUnit, SpecificEnergyUnit};

fn sample(quality: Option<f64>) -> CalculationResult {
    CalculationResult {
        properties: SteamProperties {
            pressure: 0.101325,
            temperature: 100.0,
            specific_volume: 1.6729,
            internal_energy: 2506.0,
            enthalpy: 2675.6,
            entropy: 7.3542,
            quality,
            phase: "Saturated Vapor".into(),
        },
        description: "At 1 atm.".into(),
    }
}

#[test]
fn value_format_switches_to_exponent_outside_band() {
    assert_eq!(format_value(3.14159), "3.14159");
    assert_eq!(format_value(0.00005), "5.00000e-5");
    assert_eq!(format_value(12345.6), "1.23456e+4");
    assert_eq!(format_value(-0.5), "-0.50000");
    assert_eq!(format_value(10000.0), "10000.00000");
    assert_eq!(format_value(-0.0), "0.00000e+0");
}

#[test]
fn negative_zero_quality_is_a_plain_fraction() {
    assert_eq!(format_quality(Some(-0.0)).to_string(), "0.0000");
}

#[test]
fn quality_sentinels() {
    assert_eq!(format_quality(Some(0.5)), QualityDisplay::Fraction("0.5000".into()));
    assert_eq!(format_quality(Some(-1.0)), QualityDisplay::Subcooled);
    assert_eq!(format_quality(Some(2.0)), QualityDisplay::Superheated);
    assert_eq!(format_quality(Some(1.5)).to_string(), "1.50");
    assert_eq!(format_quality(None).to_string(), "-");
    assert_eq!(format_quality(Some(2.0)).to_string(), "N/A (Superheated)");
    assert_eq!(format_quality(Some(1.0)).to_string(), "1.0000");
}

#[test]
fn rows_cover_all_properties_in_order() {
    let rows = property_rows(&sample(Some(1.0)), &DisplayUnits::default());
    let symbols: Vec<_> = rows.iter().map(|r| r.symbol).collect();
    assert_eq!(symbols, ["P", "T", "v", "u", "h", "s", "x"]);
    assert_eq!(rows[1].text, "100.00000");
    assert_eq!(rows[0].unit, "MPa");
    assert_eq!(rows[6].group, None);
    assert_eq!(rows[6].unit, "-");
}

#[test]
fn energy_group_converts_both_rows() {
    let mut units = DisplayUnits::default();
    assert!(units.set(PropertyGroup::Energy, "Btu/lb"));
    assert_eq!(units.energy, SpecificEnergyUnit::BtuPerPound);
    let rows = property_rows(&sample(None), &units);
    let u = rows[3].value.unwrap();
    let h = rows[4].value.unwrap();
    assert!((u - 2506.0 / 2.326).abs() < 1e-9);
    assert!((h - 2675.6 / 2.326).abs() < 1e-9);
    assert_eq!(rows[3].unit, "Btu/lb");
    assert_eq!(rows[4].unit, "Btu/lb");
    assert_eq!(rows[0].unit, "MPa");
}

#[test]
fn display_change_leaves_result_untouched() {
    let result = sample(Some(2.0));
    let mut units = DisplayUnits::default();
    units.pressure = PressureUnit::Bar;
    let rows = property_rows(&result, &units);
    assert_eq!(rows[0].text, "1.01325");
    assert_eq!(result.properties.pressure, 0.101325);
}
