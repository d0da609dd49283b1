mod cli;
use cli::{parse_cli_options, run_menu_mode, run_week_mode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();

    let options = match parse_cli_options() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!(
                "Usage: uniplan [--week YYYY/MM/DD] [--course FACULTY-CODE] [--out PATH] [--menu]"
            );
            return Ok(());
        }
    };

    if options.menu {
        return run_menu_mode(&options).await;
    }

    run_week_mode(&options).await
}

fn setup_logging() {
    let log_dir = dirs::config_dir()
        .map(|d| d.join("uniplan"))
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "uniplan.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("uniplan started");
}
