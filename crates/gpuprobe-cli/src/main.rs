//! CLI entry point.
//!
//! Loads `.env`, parses arguments, installs the tracing subscriber and
//! dispatches to handlers. Errors map to sysexits-style exit codes.
//!
//! The tokio runtime is built by hand so process environment defaults can
//! be applied while the process is still single-threaded.

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use gpuprobe_cli::{
    Cli, CliConfig, CliError, Commands, bootstrap, handlers, missing_env_defaults,
};
use gpuprobe_core::ProbeConfig;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    apply_process_env_defaults();

    let result = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::from)
        .and_then(|runtime| runtime.block_on(run(cli)));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Give this process the same defaults diagnostic children get, so EGL
/// loaded in-process sees them too.
#[allow(unsafe_code)]
fn apply_process_env_defaults() {
    let defaults = ProbeConfig::default().child_env_defaults;
    let missing = missing_env_defaults(&defaults, |name| {
        std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    });
    for (name, value) in missing {
        debug!(%name, %value, "Setting process environment default");
        // SAFETY: called from main before the tokio runtime or any other
        // thread exists.
        unsafe { std::env::set_var(&name, &value) };
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = CliConfig::from_cli(&cli)?;
    let format = cli.format;

    match cli.command {
        Commands::Probe { video } => {
            let ctx = bootstrap(config);
            handlers::probe::execute(&ctx, video, format).await
        }
        Commands::Inference { model } => {
            let config = match model {
                Some(path) => config.with_model_path(path),
                None => config,
            };
            let ctx = bootstrap(config);
            handlers::inference::execute(&ctx, format).await
        }
        Commands::Benchmark {
            video,
            model_path,
            model_url,
        } => {
            let config = match model_path {
                Some(path) => config.with_model_path(path),
                None => config,
            };
            let config = match model_url {
                Some(url) => config.with_model_url(url),
                None => config,
            };
            config.harness.validate()?;
            let ctx = bootstrap(config);
            handlers::benchmark::execute(&ctx, video, format).await
        }
        Commands::Environment => {
            let ctx = bootstrap(config);
            handlers::environment::execute(&ctx, format).await
        }
        Commands::Serve {
            port,
            host,
            cors_origins,
        } => handlers::serve::execute(config, host, port, cors_origins).await,
    }
}
