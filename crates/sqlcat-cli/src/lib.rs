mod cli;
mod render;

use tracing_subscriber::EnvFilter;

pub fn run(args: Vec<String>) -> anyhow::Result<()> {
    let cli = cli::parse_args(&args)?;
    init_tracing(cli.verbose);

    match cli.command {
        cli::Command::Help(topic) => {
            cli::print_help(topic);
            Ok(())
        }
        cli::Command::Render(args) => {
            let out = render::run(&args)?;
            println!("{out}");
            Ok(())
        }
        cli::Command::Orders(args) => {
            for order in sqlcat::parse_orders(&args.tokens) {
                println!("{order}");
            }
            Ok(())
        }
    }
}

/// Log to stderr; stdout carries the rendered SQL.
fn init_tracing(verbose: bool) {
    let default = if verbose { "sqlcat=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
