use bible_search::cli::{Cli, run};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    bible_search::tracing::init(cli.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out).inspect_err(|e| {
        tracing::error!("{:#}", e);
    })
}
