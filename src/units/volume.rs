use serde::{Deserialize, Serialize};

/// 비체적 단위. 내부 기준은 m³/kg이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecificVolumeUnit {
    CubicMeterPerKg,
    CubicFootPerPound,
}

const FT3_LB_PER_M3_KG: f64 = 16.0185;

impl SpecificVolumeUnit {
    pub const ALL: [SpecificVolumeUnit; 2] = [
        SpecificVolumeUnit::CubicMeterPerKg,
        SpecificVolumeUnit::CubicFootPerPound,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SpecificVolumeUnit::CubicMeterPerKg => "m³/kg",
            SpecificVolumeUnit::CubicFootPerPound => "ft³/lb",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "m³/kg" | "m3/kg" | "m^3/kg" => Some(SpecificVolumeUnit::CubicMeterPerKg),
            "ft³/lb" | "ft3/lb" | "ft^3/lb" | "ft3/lbm" => {
                Some(SpecificVolumeUnit::CubicFootPerPound)
            }
            _ => None,
        }
    }

    pub fn from_base(self, value_m3_kg: f64) -> f64 {
        match self {
            SpecificVolumeUnit::CubicMeterPerKg => value_m3_kg,
            SpecificVolumeUnit::CubicFootPerPound => value_m3_kg * FT3_LB_PER_M3_KG,
        }
    }

    pub fn to_base(self, value: f64) -> f64 {
        match self {
            SpecificVolumeUnit::CubicMeterPerKg => value,
            SpecificVolumeUnit::CubicFootPerPound => value / FT3_LB_PER_M3_KG,
        }
    }
}

impl std::fmt::Display for SpecificVolumeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
