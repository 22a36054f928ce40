use driver_input_reader::cli_app::{CliApp, CliArgs};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse(std::env::args().skip(1))?;
    setup_logging(args.verbose);

    CliApp::new(&args)?.run()
}

fn setup_logging(verbose: bool) {
    FmtSubscriber::builder()
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_file(verbose)
        .with_line_number(verbose)
        .init();
}
