use std::{env, fs::File, io, path::Path};

use overdraft_engine::{
    config::OverdraftPolicy, dlq::StdErrDLQ, domain::BalanceAuthority, engine::Engine,
    ingestion::CsvReader, store::InMemoryAccountStore,
};

#[tokio::main] // using Tokio runtime for async
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs and dead letters go to stderr, the report to stdout
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let mut args = env::args();
    let file_path = args
        .nth(1)
        .ok_or("usage: overdraft_engine <commands.csv>")?;
    let file = File::open(Path::new(&file_path))?;

    let policy = OverdraftPolicy::from_env()?;
    tracing::info!(limit = %policy.limit, fee = %policy.fee, "overdraft policy loaded");

    // Initialize engine with injected components
    let mut engine = Engine::new(
        CsvReader::new(file),
        InMemoryAccountStore::new(),
        BalanceAuthority::new(policy),
        StdErrDLQ::default(),
    );

    engine.process().await?;

    engine.flush(&mut io::stdout().lock())?;

    Ok(())
}
