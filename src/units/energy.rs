use serde::{Deserialize, Serialize};

/// 비에너지(내부에너지, 엔탈피) 단위. 내부 기준은 kJ/kg이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecificEnergyUnit {
    KjPerKg,
    BtuPerPound,
}

const KJ_KG_PER_BTU_LB: f64 = 2.326;

impl SpecificEnergyUnit {
    pub const ALL: [SpecificEnergyUnit; 2] =
        [SpecificEnergyUnit::KjPerKg, SpecificEnergyUnit::BtuPerPound];

    pub fn label(self) -> &'static str {
        match self {
            SpecificEnergyUnit::KjPerKg => "kJ/kg",
            SpecificEnergyUnit::BtuPerPound => "Btu/lb",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kj/kg" => Some(SpecificEnergyUnit::KjPerKg),
            "btu/lb" | "btu/lbm" => Some(SpecificEnergyUnit::BtuPerPound),
            _ => None,
        }
    }

    pub fn from_base(self, value_kj_kg: f64) -> f64 {
        match self {
            SpecificEnergyUnit::KjPerKg => value_kj_kg,
            SpecificEnergyUnit::BtuPerPound => value_kj_kg / KJ_KG_PER_BTU_LB,
        }
    }

    pub fn to_base(self, value: f64) -> f64 {
        match self {
            SpecificEnergyUnit::KjPerKg => value,
            SpecificEnergyUnit::BtuPerPound => value * KJ_KG_PER_BTU_LB,
        }
    }
}

impl std::fmt::Display for SpecificEnergyUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
