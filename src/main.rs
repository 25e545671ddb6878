use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = htpasswd_manager::cli::Cli::parse();
    htpasswd_manager::util::logging::init(cli.verbose);
    cli.run()
}
