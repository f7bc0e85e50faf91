use anyhow::Result;
use formwright::{cli, config::Config, logger};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    let log = logger::init(cli::log_level(&matches, &config)?)?;

    let mut out = std::io::stdout();
    if let Err(e) = cli::run(&matches, config, log, &mut out).await {
        log::error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}
