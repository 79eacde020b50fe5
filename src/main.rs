use clap::Parser;
use log::LevelFilter;
use miette::Result;
use roi::cli::Cli;

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    let level = if cli.global.quiet {
        LevelFilter::Error
    } else {
        match cli.global.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("ROI_LOG")
        .format_timestamp(None)
        .init();

    roi::cli::dispatch(cli)
}
