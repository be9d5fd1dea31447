use std::path::PathBuf;

use argh::FromArgs;
use configuration::InputFormat;

fn default_config_path() -> PathBuf {
    PathBuf::from("./inspect_config.toml")
}

fn parse_format(value: &str) -> Result<InputFormat, String> {
    match value {
        "hex" => Ok(InputFormat::Hex),
        "binary" => Ok(InputFormat::Binary),
        other => Err(format!("unknown format '{}', expected hex or binary", other)),
    }
}

#[derive(Debug, FromArgs)]
/// Decode and build DNS messages offline.
pub struct CliArgs {
    #[argh(
        option,
        description = "config file path, default: './inspect_config.toml'",
        default = "default_config_path()"
    )]
    pub config: PathBuf,

    #[argh(subcommand)]
    pub command: Command,
}

#[derive(Debug, FromArgs)]
#[argh(subcommand)]
pub enum Command {
    Decode(DecodeArgs),
    Query(QueryArgs),
}

#[derive(Debug, FromArgs)]
/// Decode a message read from a file.
#[argh(subcommand, name = "decode")]
pub struct DecodeArgs {
    #[argh(positional, description = "file holding the message")]
    pub file: PathBuf,

    #[argh(
        option,
        description = "hex or binary, default from the config file",
        from_str_fn(parse_format)
    )]
    pub format: Option<InputFormat>,
}

#[derive(Debug, FromArgs)]
/// Build a recursion-desired query.
#[argh(subcommand, name = "query")]
pub struct QueryArgs {
    #[argh(positional, description = "domain to ask for")]
    pub domain: String,

    #[argh(option, description = "query type, mnemonic or number, default from the config file")]
    pub qtype: Option<String>,

    #[argh(option, description = "write the raw message here instead of printing hex")]
    pub out: Option<PathBuf>,
}
