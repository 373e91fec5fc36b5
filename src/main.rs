use std::io;

use xkcd_alt::config::Config;
use xkcd_alt::errors::EXIT_CONFIG;
use xkcd_alt::services::FetchService;

fn main() {
    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let fetcher = FetchService::new(config.feed_url.clone());

    let code = xkcd_alt::app::run(
        &args,
        &config,
        &fetcher,
        &mut io::stdout().lock(),
        // Unlocked: the transport's log output shares stderr from other threads
        &mut io::stderr(),
    );
    std::process::exit(code);
}
