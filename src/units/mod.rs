//! 단위 정의 및 변환 모듈 모음.

pub mod energy;
pub mod entropy;
pub mod pressure;
pub mod temperature;
pub mod volume;

pub use energy::SpecificEnergyUnit;
pub use entropy::SpecificEntropyUnit;
pub use pressure::{convert_pressure_units, PressureUnit};
pub use temperature::{convert_temperature_units, TemperatureUnit};
pub use volume::SpecificVolumeUnit;

/// 건도 축에 쓰이는 무차원 표기.
pub const QUALITY_UNIT: &str = "-";
