use serde::{Deserialize, Serialize};

/// 압력 표시 단위. 내부 기준은 항상 MPa(절대압)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PressureUnit {
    MegaPascal,
    Bar,
    KiloPascal,
    Atm,
    Psia,
}

const BAR_PER_MPA: f64 = 10.0;
const KPA_PER_MPA: f64 = 1000.0;
const ATM_PER_MPA: f64 = 9.86923;
const PSIA_PER_MPA: f64 = 145.038;

impl PressureUnit {
    /// 선택 목록에 노출되는 순서.
    pub const ALL: [PressureUnit; 5] = [
        PressureUnit::MegaPascal,
        PressureUnit::Bar,
        PressureUnit::KiloPascal,
        PressureUnit::Atm,
        PressureUnit::Psia,
    ];

    /// 화면/요청 문자열에 쓰이는 단위 표기.
    pub fn label(self) -> &'static str {
        match self {
            PressureUnit::MegaPascal => "MPa",
            PressureUnit::Bar => "bar",
            PressureUnit::KiloPascal => "kPa",
            PressureUnit::Atm => "atm",
            PressureUnit::Psia => "psia",
        }
    }

    /// 표기 문자열을 단위로 해석한다. 대소문자는 구분하지 않는다.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mpa" | "megapascal" => Some(PressureUnit::MegaPascal),
            "bar" => Some(PressureUnit::Bar),
            "kpa" | "kilopascal" => Some(PressureUnit::KiloPascal),
            "atm" => Some(PressureUnit::Atm),
            "psia" | "psi" => Some(PressureUnit::Psia),
            _ => None,
        }
    }

    /// MPa 값을 이 단위로 환산한다.
    pub fn from_base(self, value_mpa: f64) -> f64 {
        match self {
            PressureUnit::MegaPascal => value_mpa,
            PressureUnit::Bar => value_mpa * BAR_PER_MPA,
            PressureUnit::KiloPascal => value_mpa * KPA_PER_MPA,
            PressureUnit::Atm => value_mpa * ATM_PER_MPA,
            PressureUnit::Psia => value_mpa * PSIA_PER_MPA,
        }
    }

    /// 이 단위의 값을 MPa로 되돌린다.
    pub fn to_base(self, value: f64) -> f64 {
        match self {
            PressureUnit::MegaPascal => value,
            PressureUnit::Bar => value / BAR_PER_MPA,
            PressureUnit::KiloPascal => value / KPA_PER_MPA,
            PressureUnit::Atm => value / ATM_PER_MPA,
            PressureUnit::Psia => value / PSIA_PER_MPA,
        }
    }
}

impl std::fmt::Display for PressureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 압력을 단위 간에 변환한다.
pub fn convert_pressure_units(value: f64, from: PressureUnit, to: PressureUnit) -> f64 {
    to.from_base(from.to_base(value))
}
