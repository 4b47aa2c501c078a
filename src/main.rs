use clap::Parser;
use colored::Colorize;
use std::error::Error;
use xpath_ipaddress::config::Config;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let config = Config::parse();

    if config.log_config.exists() {
        log4rs::init_file(&config.log_config, Default::default())
            .map_err(|e| format!("Error initializing log4rs: {e}"))?;
    } else {
        eprintln!(
            "{} log config {} not found, logging disabled",
            "WARN".yellow(),
            config.log_config.display()
        );
    }
    log::info!("#Start main()");

    if let Err(e) = xpath_ipaddress::run(&config) {
        log::error!("{e}");
        eprintln!("{} {e}", "ERROR".on_red());
        std::process::exit(1);
    }
    Ok(())
}
