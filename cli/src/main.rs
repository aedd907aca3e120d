mod commands;
mod terminal;

use commands::{CommandLine, scan};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    terminal::logging::init_logging(commands.verbose);

    scan::scan(&commands).await
}
