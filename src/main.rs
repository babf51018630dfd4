use clap::Parser;
use miette::Result;
use rca::cli::{logging, Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for diagnostics
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
    let global = cli.global;

    if global.no_color || std::env::var_os("NO_COLOR").is_some() {
        console::set_colors_enabled(false);
    }
    logging::init(&global);
    tracing::debug!(format = ?global.format, "starting");

    match cli.command {
        Commands::Walk(args) => rca::cli::commands::walk::run(args, &global),
        Commands::Show(args) => rca::cli::commands::show::run(args, &global),
        Commands::List(args) => rca::cli::commands::list::run(args, &global),
        Commands::Kpi(cmd) => rca::cli::commands::kpi::run(cmd, &global),
        Commands::Report(args) => rca::cli::commands::report::run(args, &global),
        Commands::Config(cmd) => rca::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => rca::cli::commands::completions::run(args),
    }
}
