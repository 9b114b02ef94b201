use serde::{Deserialize, Serialize};

/// Where a site lives and how to reach the networks serving it.
///
/// Field names match the `config.json` format (`rpcUrlList`,
/// `aggregatorUrl`, `sitePackage`, `siteObjectId`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Informational network name (`mainnet`, `testnet`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    /// Sui full node RPC URLs. Only the first one is used.
    #[serde(default)]
    pub rpc_url_list: Vec<String>,
    /// Walrus aggregator base URL.
    #[serde(default)]
    pub aggregator_url: String,
    /// Address of the Walrus Sites Move package.
    #[serde(default)]
    pub site_package: String,
    /// Root site object.
    #[serde(default)]
    pub site_object_id: String,
}

impl SiteConfig {
    /// Names of required fields that are unset or empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.rpc_url().is_none() {
            missing.push("rpcUrlList");
        }
        if self.aggregator_url.trim().is_empty() {
            missing.push("aggregatorUrl");
        }
        if self.site_package.trim().is_empty() {
            missing.push("sitePackage");
        }
        if self.site_object_id.trim().is_empty() {
            missing.push("siteObjectId");
        }
        missing
    }

    /// The RPC URL resolution uses.
    pub fn rpc_url(&self) -> Option<&str> {
        self.rpc_url_list
            .first()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> SiteConfig {
        SiteConfig {
            network: None,
            rpc_url_list: vec!["https://rpc.example".into(), "https://backup.example".into()],
            aggregator_url: "https://agg.example".into(),
            site_package: "0x26eb".into(),
            site_object_id: "0x1234".into(),
        }
    }

    #[test]
    fn complete_config_has_no_missing_fields() {
        assert!(full().missing_fields().is_empty());
        assert_eq!(full().rpc_url(), Some("https://rpc.example"));
    }

    #[test]
    fn empty_config_lists_all_fields() {
        assert_eq!(
            SiteConfig::default().missing_fields(),
            vec!["rpcUrlList", "aggregatorUrl", "sitePackage", "siteObjectId"]
        );
    }

    #[test]
    fn blank_first_rpc_url_counts_as_missing() {
        let mut c = full();
        c.rpc_url_list = vec!["  ".into()];
        assert_eq!(c.missing_fields(), vec!["rpcUrlList"]);
    }

    #[test]
    fn json_uses_camel_case() {
        let c: SiteConfig = serde_json::from_str(
            r#"{"rpcUrlList":["https://r"],"aggregatorUrl":"https://a","sitePackage":"0x1","siteObjectId":"0x2"}"#,
        )
        .unwrap();
        assert!(c.missing_fields().is_empty());
        let back = serde_json::to_value(&c).unwrap();
        assert_eq!(back["siteObjectId"], "0x2");
        assert!(back.get("network").is_none());
    }
}
