use serde::{Deserialize, Serialize};

/// 비엔트로피 단위. 내부 기준은 kJ/(kg·K)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecificEntropyUnit {
    KjPerKgK,
    BtuPerPoundR,
}

const KJ_KGK_PER_BTU_LBR: f64 = 4.1868;

impl SpecificEntropyUnit {
    pub const ALL: [SpecificEntropyUnit; 2] = [
        SpecificEntropyUnit::KjPerKgK,
        SpecificEntropyUnit::BtuPerPoundR,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SpecificEntropyUnit::KjPerKgK => "kJ/(kg·K)",
            SpecificEntropyUnit::BtuPerPoundR => "Btu/(lb·°R)",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kj/(kg·k)" | "kj/kgk" | "kj/kg-k" | "kj/(kg.k)" => {
                Some(SpecificEntropyUnit::KjPerKgK)
            }
            "btu/(lb·°r)" | "btu/lbr" | "btu/lb-r" | "btu/(lb.r)" => {
                Some(SpecificEntropyUnit::BtuPerPoundR)
            }
            _ => None,
        }
    }

    pub fn from_base(self, value_kj_kgk: f64) -> f64 {
        match self {
            SpecificEntropyUnit::KjPerKgK => value_kj_kgk,
            SpecificEntropyUnit::BtuPerPoundR => value_kj_kgk / KJ_KGK_PER_BTU_LBR,
        }
    }

    pub fn to_base(self, value: f64) -> f64 {
        match self {
            SpecificEntropyUnit::KjPerKgK => value,
            SpecificEntropyUnit::BtuPerPoundR => value * KJ_KGK_PER_BTU_LBR,
        }
    }
}

impl std::fmt::Display for SpecificEntropyUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
