use anyhow::bail;
use colored::Colorize;
use wsp_resolver::SiteResolver;
use wsp_server::{PreviewServer, ServerConfig};

use crate::cli::{Cli, CLI_NAME};
use crate::config;

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let site = config::resolve(&cli)?;
    let missing = site.missing_fields();
    if !missing.is_empty() {
        bail!(
            "Missing config fields: {}\nPass CLI flags (e.g. `{CLI_NAME} --testnet --id 0x...`) or create ./config.json.",
            missing.join(", ")
        );
    }

    let resolver = SiteResolver::from_config(&site)?;
    let server = PreviewServer::new(ServerConfig::new(cli.host.clone(), cli.port), resolver);
    let listener = server.bind().await?;

    println!("{}", "Walrus Sites preview".bold());
    if let Some(network) = &site.network {
        println!("  Network:     {}", network.cyan());
    }
    println!("  Site object: {}", site.site_object_id.yellow());
    println!("  Aggregator:  {}", site.aggregator_url);
    println!("  {} {}", "➜".green(), server.config().local_url().bold());

    server.serve(listener).await?;
    Ok(())
}
