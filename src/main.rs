use clap::Parser;
use laserdxx::cli::{self, Cli};
use laserdxx::init_logging;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    init_logging(args.json_log)?;

    cli::run(&args)
}
