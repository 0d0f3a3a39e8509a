use clap::{Parser, Subcommand};
use std::path::PathBuf;

use snapsteam::app::{self, AppError, CalcArgs};
use snapsteam::config;
use snapsteam::i18n::{self, Translator};
use snapsteam::quantity::QuantityKind;
use snapsteam::{resolver, ui_cli};

#[derive(Parser)]
#[command(name = "snapsteam_cli")]
#[command(about = "SnapSteam CLI - steam table lookups through an external property service", long_about = None)]
struct Cli {
    /// Interface language (auto, en, ko)
    #[arg(short = 'L', long, global = true, default_value = "auto")]
    lang: String,
    /// Path to config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List fluid states, their input modes and accepted units
    Modes,
    /// Convert a base-unit value (MPa, °C, m³/kg, kJ/kg, kJ/(kg·K)) to another unit
    Convert {
        /// Quantity: p, t, v, h, s, x
        #[arg(short, long)]
        quantity: String,
        /// Value in the quantity's base unit
        #[arg(short, long, allow_negative_numbers = true)]
        value: f64,
        /// Target unit label (e.g. bar, K, ft³/lb)
        #[arg(short, long)]
        to: String,
        /// Fail on unknown units instead of returning the value unchanged
        #[arg(long)]
        strict: bool,
    },
    /// Calculate one state and print the property table
    Calc {
        /// Fluid state: single (subcooled/superheated) or saturated
        #[arg(short, long)]
        state: String,
        /// Input mode: pt, ph, ps, th, px, tx (defaults to the state's first mode)
        #[arg(short, long)]
        mode: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        value1: String,
        #[arg(long)]
        unit1: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        value2: String,
        #[arg(long)]
        unit2: Option<String>,
    },
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 하위 명령 또는 대화형 메뉴를 실행한다.
fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(err) = try_run(cli) {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let path = config::resolve_path(cli.config);
    let mut cfg = config::load_or_create(&path)?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = Translator::new_with_pack(&lang, Some("locales"));

    match cli.command {
        None => {
            let resolver = resolver::from_settings(&cfg.resolver);
            app::run(&mut cfg, &path, &tr, resolver.as_ref())
        }
        Some(Commands::Modes) => {
            ui_cli::print_modes(&tr);
            Ok(())
        }
        Some(Commands::Convert {
            quantity,
            value,
            to,
            strict,
        }) => {
            let converted = app::convert_once(&quantity, value, &to, strict)?;
            let kind = QuantityKind::parse(&quantity)
                .ok_or_else(|| AppError::InvalidInput(quantity.clone()))?;
            ui_cli::print_conversion(kind, value, converted, &to);
            Ok(())
        }
        Some(Commands::Calc {
            state,
            mode,
            value1,
            unit1,
            value2,
            unit2,
        }) => {
            let resolver = resolver::from_settings(&cfg.resolver);
            let args = CalcArgs {
                state,
                mode,
                value1,
                unit1,
                value2,
                unit2,
            };
            match app::calculate_once(&cfg, resolver.as_ref(), &args) {
                Ok(session) => {
                    ui_cli::print_result(&tr, &session);
                    Ok(())
                }
                Err(AppError::Resolve(err)) => {
                    eprintln!("[{}] {}", tr.t(i18n::keys::ERROR_TITLE), tr.resolve_error(&err));
                    Err(AppError::Resolve(err))
                }
                Err(other) => Err(other),
            }
        }
    }
}
