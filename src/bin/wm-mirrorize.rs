use mirrorize::{args, help};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

fn main() {
    // warnings by default, RUST_LOG overrides
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    if let Err(e) = real_main() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), mirrorize::MagickError> {
    help::maybe_print_help_and_exit("wm-mirrorize");
    let arguments: Vec<_> = std::env::args_os().collect();
    let plan = args::parse_args(arguments)?;
    plan.execute()
}
