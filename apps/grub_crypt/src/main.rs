#![forbid(unsafe_code)]
#![warn(clippy::default_trait_access)]

use std::io;
use std::process;

use grub_crypt::{Config, Error, Options, Terminal};
use structopt::StructOpt;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new("warn"))
                .unwrap(),
        )
        .init();
}

fn main() {
    init_tracing();

    let options: Options = Options::from_args();
    let config = match Config::load(options.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    if let Err(err) = grub_crypt::run(&options, &config, &mut Terminal, &mut stdout.lock()) {
        tracing::debug!(error = ?err, "grub-crypt failed");
        match err {
            Error::PasswordMismatch => eprintln!("{}", err),
            _ => eprintln!("Error: {}", err),
        }
        process::exit(1);
    }
}
