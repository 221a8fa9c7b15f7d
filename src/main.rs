use clap::Parser;
use mock_check::cli::{self, CheckMocksConfig, Cli};
use std::process::ExitCode;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOGが設定されていればそちらを優先
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mock_check={default_level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 2)
                .with_file(verbose >= 3)
                .with_line_number(verbose >= 3)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing(args.verbose);

    if !args.mocks {
        println!("Oops, no command specified. Try --help.");
        return ExitCode::SUCCESS;
    }

    let config = CheckMocksConfig {
        filename: args.filename,
        directory: args.directory,
        config_file: args.config,
        format: args.format,
        colored: !args.no_color,
    };

    match cli::execute_check_mocks(config).await {
        Ok(run) => ExitCode::from(cli::exit_code(&run)),
        Err(error) => {
            tracing::debug!(?error, "mock check aborted");
            eprintln!("{error:#}");
            ExitCode::from(cli::EXIT_ERROR)
        }
    }
}
