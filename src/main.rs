use std::io;

use tracing_subscriber::EnvFilter;

use teller::{cli, domain::bank::Bank, error::Result};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut bank = Bank::new();
    cli::run(&mut bank, io::stdin().lock(), io::stdout().lock())
}
