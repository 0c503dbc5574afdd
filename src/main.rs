mod amount;
mod cli;
mod converter;
mod date_format;
mod error;
mod qif;
mod settings;

use cli::Cli;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse_args();

    if let Err(e) = cli::convert::run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
