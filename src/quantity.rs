use serde::{Deserialize, Serialize};

use crate::units::*;

/// 다루는 물리량 종류를 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityKind {
    Pressure,
    Temperature,
    SpecificVolume,
    /// 내부에너지와 엔탈피가 함께 쓴다.
    SpecificEnergy,
    SpecificEntropy,
    /// 무차원 건도. 단위 선택지는 "-" 하나뿐이다.
    Quality,
}

impl QuantityKind {
    pub const ALL: [QuantityKind; 6] = [
        QuantityKind::Pressure,
        QuantityKind::Temperature,
        QuantityKind::SpecificVolume,
        QuantityKind::SpecificEnergy,
        QuantityKind::SpecificEntropy,
        QuantityKind::Quality,
    ];

    /// 기준 단위 표기.
    pub fn base_unit(self) -> &'static str {
        self.unit_labels()[0]
    }

    /// 선택 가능한 단위 표기 목록. 첫 항목이 기준 단위다.
    pub fn unit_labels(self) -> &'static [&'static str] {
        match self {
            QuantityKind::Pressure => &["MPa", "bar", "kPa", "atm", "psia"],
            QuantityKind::Temperature => &["°C", "K", "°F", "°R"],
            QuantityKind::SpecificVolume => &["m³/kg", "ft³/lb"],
            QuantityKind::SpecificEnergy => &["kJ/kg", "Btu/lb"],
            QuantityKind::SpecificEntropy => &["kJ/(kg·K)", "Btu/(lb·°R)"],
            QuantityKind::Quality => &[QUALITY_UNIT],
        }
    }

    /// CLI 인자 등에서 물리량 이름을 해석한다.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "p" | "pressure" => Some(QuantityKind::Pressure),
            "t" | "temperature" => Some(QuantityKind::Temperature),
            "v" | "volume" | "specific-volume" => Some(QuantityKind::SpecificVolume),
            "h" | "u" | "energy" | "enthalpy" | "internal-energy" => {
                Some(QuantityKind::SpecificEnergy)
            }
            "s" | "entropy" => Some(QuantityKind::SpecificEntropy),
            "x" | "quality" => Some(QuantityKind::Quality),
            _ => None,
        }
    }
}
