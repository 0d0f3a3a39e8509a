//! 증기표 계산 화면의 상태/단위/표시 로직을 라이브러리로 분리하여 CLI와 GUI가 함께 쓴다.
//!
//! 물성 계산 자체는 외부 계산기(`resolver`)가 맡는다.

pub mod app;
pub mod config;
pub mod conversion;
pub mod form;
pub mod i18n;
pub mod mode;
pub mod presentation;
pub mod quantity;
pub mod resolver;
pub mod session;
pub mod ui_cli;
pub mod units;
