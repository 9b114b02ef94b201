use std::fs;
use std::path::Path;

use anyhow::Context;
use wsp_resolver::SiteConfig;

use crate::cli::Cli;

/// Built-in endpoints and package address of a public network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetworkPreset {
    pub network: &'static str,
    pub rpc_url: &'static str,
    pub aggregator_url: &'static str,
    pub site_package: &'static str,
}

pub const MAINNET: NetworkPreset = NetworkPreset {
    network: "mainnet",
    rpc_url: "https://fullnode.mainnet.sui.io",
    aggregator_url: "https://aggregator.walrus-mainnet.walrus.space",
    site_package: "0x26eb7ee8688da02c5f671679524e379f0b837a12f1d1d799f255b7eea260ad27",
};

pub const TESTNET: NetworkPreset = NetworkPreset {
    network: "testnet",
    rpc_url: "https://fullnode.testnet.sui.io",
    aggregator_url: "https://aggregator.walrus-testnet.walrus.space",
    site_package: "0xf99aee9f21493e1590e7e5a9aea6f343a1f381031a04a732724871fc294be799",
};

pub fn preset(name: &str) -> Option<NetworkPreset> {
    match name {
        "mainnet" => Some(MAINNET),
        "testnet" => Some(TESTNET),
        _ => None,
    }
}

/// Read `config.json`. A file that does not exist is an empty config.
pub fn load_file(path: &Path) -> anyhow::Result<SiteConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file");
        return Ok(SiteConfig::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse JSON at {}", path.display()))
}

/// Overlay command-line values on the file config.
pub fn apply_cli(mut config: SiteConfig, cli: &Cli) -> SiteConfig {
    if let Some(network) = &cli.network {
        config.network = Some(network.clone());
    }
    if let Some(urls) = cli.rpc_urls() {
        config.rpc_url_list = urls;
    }
    if let Some(aggregator) = &cli.aggregator {
        config.aggregator_url = aggregator.clone();
    }
    if let Some(package) = &cli.site_package {
        config.site_package = package.clone();
    }
    if let Some(id) = &cli.site_object_id {
        config.site_object_id = id.clone();
    }
    config
}

/// Fill fields still unset from a network preset.
pub fn apply_preset(mut config: SiteConfig, preset: &NetworkPreset) -> SiteConfig {
    if config.network.as_deref().map_or(true, str::is_empty) {
        config.network = Some(preset.network.to_owned());
    }
    if config.rpc_url_list.is_empty() {
        config.rpc_url_list = vec![preset.rpc_url.to_owned()];
    }
    if config.aggregator_url.is_empty() {
        config.aggregator_url = preset.aggregator_url.to_owned();
    }
    if config.site_package.is_empty() {
        config.site_package = preset.site_package.to_owned();
    }
    config
}

/// Final site config: CLI over file over network defaults.
pub fn resolve(cli: &Cli) -> anyhow::Result<SiteConfig> {
    let config = apply_cli(load_file(&cli.config)?, cli);
    Ok(match cli.preset_name().and_then(preset) {
        Some(preset) => apply_preset(config, &preset),
        None => config,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["walrus-preview"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn write_config(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_file(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn invalid_json_is_an_error() {
        let file = write_config("{ not json");
        let err = load_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse JSON"));
    }

    #[test]
    fn testnet_preset_fills_everything_but_site() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = resolve(&cli(&["--testnet", "--config", path.to_str().unwrap()])).unwrap();
        assert_eq!(config.network.as_deref(), Some("testnet"));
        assert_eq!(config.rpc_url(), Some(TESTNET.rpc_url));
        assert_eq!(config.aggregator_url, TESTNET.aggregator_url);
        assert_eq!(config.site_package, TESTNET.site_package);
        assert_eq!(config.missing_fields(), vec!["siteObjectId"]);
    }

    #[test]
    fn cli_beats_file_beats_preset() {
        let file = write_config(
            r#"{"aggregatorUrl":"https://file-agg","sitePackage":"0xfile","siteObjectId":"0xfile-site"}"#,
        );
        let config = resolve(&cli(&[
            "--mainnet",
            "--config",
            file.path().to_str().unwrap(),
            "--id",
            "0xcli-site",
        ]))
        .unwrap();
        assert_eq!(config.site_object_id, "0xcli-site");
        assert_eq!(config.aggregator_url, "https://file-agg");
        assert_eq!(config.site_package, "0xfile");
        assert_eq!(config.rpc_url(), Some(MAINNET.rpc_url));
    }

    #[test]
    fn no_preset_leaves_gaps() {
        let file = write_config(r#"{"siteObjectId":"0x1"}"#);
        let config = resolve(&cli(&["--config", file.path().to_str().unwrap()])).unwrap();
        assert_eq!(
            config.missing_fields(),
            vec!["rpcUrlList", "aggregatorUrl", "sitePackage"]
        );
    }

    #[test]
    fn unknown_preset() {
        assert!(preset("devnet").is_none());
        assert_eq!(preset("mainnet"), Some(MAINNET));
    }
}
