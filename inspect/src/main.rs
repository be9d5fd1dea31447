use std::error::Error;
use std::fs;
use std::process;

use configuration::InspectConfiguration;
use log::{error, info};

mod cli_args;
mod commands;

use cli_args::{CliArgs, Command};

fn main() {
    let _ = env_logger::try_init();

    let args: CliArgs = argh::from_env();
    if let Err(e) = run(args) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<(), Box<dyn Error>> {
    let config: InspectConfiguration = configuration::get_config(args.config)?;

    match args.command {
        Command::Decode(decode) => {
            let format = decode.format.unwrap_or(config.input.format);
            let max_message_size = config.input.max_message_size;
            let message = commands::decode_file(&decode.file, format, max_message_size)?;
            print!("{}", message);
        }
        Command::Query(query) => {
            let qtype = query.qtype.as_deref().unwrap_or(&config.query.qtype);
            let bytes = commands::build_query(&query.domain, qtype, config.query.ids)?;

            match query.out {
                Some(path) => {
                    fs::write(&path, &bytes)?;
                    info!("wrote {} bytes to {}", bytes.len(), path.display());
                }
                None => println!("{}", hex::encode(&bytes)),
            }
        }
    }

    Ok(())
}
