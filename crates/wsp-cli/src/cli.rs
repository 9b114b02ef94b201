use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

pub const CLI_NAME: &str = "walrus-preview";

/// Single-dash spellings of long flags, e.g. `-testnet -id 0x...`.
static SINGLE_DASH_FLAGS: [(&str, &str); 4] = [
    ("-id", "--id"),
    ("-testnet", "--testnet"),
    ("-mainnet", "--mainnet"),
    ("-port", "--port"),
];

/// Rewrite single-dash long flags to their `--` form before parsing.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let long = arg
                .to_str()
                .and_then(|a| SINGLE_DASH_FLAGS.iter().find(|(short, _)| *short == a))
                .map(|(_, long)| OsString::from(*long));
            long.unwrap_or(arg)
        })
        .collect()
}

#[derive(Parser, Debug)]
#[command(
    name = "walrus-preview",
    about = "Walrus Sites standalone preview: serve a site from Sui + Walrus on localhost",
    version
)]
pub struct Cli {
    /// Path to config.json; a missing file is treated as empty
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Fill unset rpc/aggregator/sitePackage with testnet defaults
    #[arg(long, conflicts_with = "mainnet")]
    pub testnet: bool,

    /// Fill unset rpc/aggregator/sitePackage with mainnet defaults
    #[arg(long)]
    pub mainnet: bool,

    /// Site object ID
    #[arg(long = "id", visible_alias = "site-object-id", value_name = "0x...")]
    pub site_object_id: Option<String>,

    /// Sui RPC URLs, comma-separated
    #[arg(long, value_name = "CSV")]
    pub rpc: Option<String>,

    /// Walrus aggregator URL
    #[arg(long, value_name = "URL")]
    pub aggregator: Option<String>,

    /// Walrus site Move package address
    #[arg(long, value_name = "0x...")]
    pub site_package: Option<String>,

    /// Informational network name
    #[arg(long)]
    pub network: Option<String>,

    /// Bind address
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Local port
    #[arg(
        short,
        long,
        default_value_t = 3000,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub port: u16,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Network preset selected by `--testnet` / `--mainnet`.
    pub fn preset_name(&self) -> Option<&'static str> {
        if self.testnet {
            Some("testnet")
        } else if self.mainnet {
            Some("mainnet")
        } else {
            None
        }
    }

    /// `--rpc` split on commas, blanks dropped.
    pub fn rpc_urls(&self) -> Option<Vec<String>> {
        self.rpc.as_ref().map(|csv| {
            csv.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["walrus-preview"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("config.json"));
        assert_eq!(cli.host, "localhost");
        assert_eq!(cli.port, 3000);
        assert_eq!(cli.preset_name(), None);
        assert!(cli.rpc_urls().is_none());
    }

    #[test]
    fn parse_site_flags() {
        let cli = Cli::try_parse_from([
            "walrus-preview",
            "--testnet",
            "--id",
            "0xabc",
            "-p",
            "8080",
            "--rpc",
            "https://a, https://b,,",
        ])
        .unwrap();
        assert_eq!(cli.preset_name(), Some("testnet"));
        assert_eq!(cli.site_object_id.as_deref(), Some("0xabc"));
        assert_eq!(cli.port, 8080);
        assert_eq!(
            cli.rpc_urls(),
            Some(vec!["https://a".to_string(), "https://b".to_string()])
        );
    }

    #[test]
    fn site_object_id_alias() {
        let cli = Cli::try_parse_from(["walrus-preview", "--site-object-id", "0x1"]).unwrap();
        assert_eq!(cli.site_object_id.as_deref(), Some("0x1"));
    }

    #[test]
    fn networks_are_exclusive() {
        assert!(Cli::try_parse_from(["walrus-preview", "--testnet", "--mainnet"]).is_err());
    }

    #[test]
    fn single_dash_long_flags() {
        let argv = normalize_args(["walrus-preview", "-testnet", "-id", "0xabc", "-port", "4000"]);
        let cli = Cli::try_parse_from(argv).unwrap();
        assert_eq!(cli.preset_name(), Some("testnet"));
        assert_eq!(cli.site_object_id.as_deref(), Some("0xabc"));
        assert_eq!(cli.port, 4000);

        let cli = Cli::try_parse_from(normalize_args(["walrus-preview", "-mainnet", "-p", "81"])).unwrap();
        assert_eq!(cli.preset_name(), Some("mainnet"));
        assert_eq!(cli.port, 81);
    }

    #[test]
    fn flag_values_are_left_alone() {
        let argv = normalize_args(["walrus-preview", "--network", "testnet"]);
        assert_eq!(argv[2], OsString::from("testnet"));
    }

    #[test]
    fn port_range() {
        assert!(Cli::try_parse_from(["walrus-preview", "--port", "0"]).is_err());
        assert!(Cli::try_parse_from(["walrus-preview", "--port", "65536"]).is_err());
        assert!(Cli::try_parse_from(["walrus-preview", "--port", "65535"]).is_ok());
    }
}
