use colored::Colorize;
use is_terminal::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use vc::commands::dispatch::Dispatcher;
use vc::commands::registry::Registry;
use vc::config::Tools;
use vc::error::{EXIT_FAILURE, exit_code_for};

const LOG_ENV: &str = "VC_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn run() -> anyhow::Result<i32> {
    let cwd = std::env::current_dir()?;
    let dispatcher = Dispatcher::new(Registry::standard(), Tools::from_env());

    dispatcher.run(
        &cwd,
        std::env::args_os().skip(1).collect(),
        Box::new(std::io::stdout()),
    )
}

fn main() -> ExitCode {
    if !std::io::stderr().is_terminal() {
        colored::control::set_override(false);
    }
    init_tracing();

    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "vc:".red().bold());
            exit_code_for(&err)
        }
    };

    ExitCode::from(u8::try_from(code).unwrap_or(EXIT_FAILURE as u8))
}
