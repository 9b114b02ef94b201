use std::collections::BTreeMap;
use std::sync::Arc;

use wsp_aggregator::AggregatorClient;
use wsp_crypto::ResourceFieldDeriver;
use wsp_ledger::{LedgerClient, SuiRpcClient};
use wsp_types::{FetchResult, ObjectId, ResourcePath, INDEX_PATH};

use crate::config::SiteConfig;
use crate::content_type;
use crate::error::{ResolutionError, ResolutionResult};
use crate::redirect::{Lookup, RedirectResolver};

/// `cache-control` value on every served resource.
pub const CACHE_CONTROL_VALUE: &str = "no-cache";

/// Response header naming the site object a resource was served from.
///
/// After redirects this is the object the record was found under, not the
/// configured root.
pub const SITE_OBJECT_ID_HEADER: &str = "x-walrus-site-object-id";

/// Record headers that describe the stored bytes and are not served.
const DIGEST_HEADERS: [&str; 2] = ["content-digest", "digest"];

/// Resolves request paths of one site to verified resource bytes.
pub struct SiteResolver {
    root: ObjectId,
    ledger: Arc<dyn LedgerClient>,
    deriver: ResourceFieldDeriver,
    aggregator: AggregatorClient,
    config: SiteConfig,
}

impl SiteResolver {
    /// Build a resolver over an existing ledger client.
    pub fn new(config: &SiteConfig, ledger: Arc<dyn LedgerClient>) -> ResolutionResult<Self> {
        let missing = config.missing_fields();
        // The RPC URL only matters to `from_config`.
        let missing: Vec<_> = missing.into_iter().filter(|f| *f != "rpcUrlList").collect();
        if !missing.is_empty() {
            return Err(ResolutionError::InvalidConfig(format!(
                "missing {}",
                missing.join(", ")
            )));
        }

        let root = ObjectId::from_hex(config.site_object_id.trim()).map_err(|e| {
            ResolutionError::InvalidConfig(format!("siteObjectId: {e}"))
        })?;
        let deriver = ResourceFieldDeriver::new(config.site_package.trim())
            .map_err(|e| ResolutionError::InvalidConfig(format!("sitePackage: {e}")))?;

        Ok(Self {
            root,
            ledger,
            deriver,
            aggregator: AggregatorClient::new(config.aggregator_url.trim()),
            config: config.clone(),
        })
    }

    /// Build a resolver talking JSON-RPC to the first configured RPC URL.
    pub fn from_config(config: &SiteConfig) -> ResolutionResult<Self> {
        let rpc_url = config
            .rpc_url()
            .ok_or_else(|| ResolutionError::InvalidConfig("missing rpcUrlList".into()))?;
        let ledger: Arc<dyn LedgerClient> = Arc::new(SuiRpcClient::new(rpc_url));
        Self::new(config, ledger)
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn root(&self) -> ObjectId {
        self.root
    }

    /// Resolve `raw_path` to verified bytes and the headers to serve them with.
    ///
    /// When nothing is found and the caller accepts HTML, `/index.html` is
    /// tried once from the root object.
    pub async fn resolve(&self, raw_path: &str, accepts_html: bool) -> ResolutionResult<FetchResult> {
        let path = ResourcePath::normalize(raw_path);
        match self.resolve_path(&path, accepts_html).await {
            Err(ResolutionError::NotFound { .. }) if accepts_html && !path.is_index() => {
                tracing::debug!(%path, fallback = INDEX_PATH, "not found, retrying with fallback");
                self.resolve_path(&ResourcePath::new(INDEX_PATH), accepts_html)
                    .await
            }
            other => other,
        }
    }

    async fn resolve_path(&self, path: &ResourcePath, accepts_html: bool) -> ResolutionResult<FetchResult> {
        let lookup = RedirectResolver::new(self.ledger.as_ref(), &self.deriver)
            .lookup(self.root, path)
            .await?;

        let (object_id, record) = match lookup {
            Lookup::Found { object_id, record } => (object_id, record),
            Lookup::NotFoundAtLeaf { object_id } => {
                tracing::debug!(%path, site = %object_id, "no resource record");
                return Err(not_found(path));
            }
        };

        let Some(body) = self.aggregator.fetch_resource(&record).await? else {
            tracing::debug!(%path, blob_id = %record.blob_id, "blob not on aggregator");
            return Err(not_found(path));
        };
        tracing::info!(%path, site = %object_id, bytes = body.len(), "resolved resource");

        let headers = serve_headers(&record.headers, path, object_id, accepts_html);
        Ok(FetchResult {
            object_id,
            path: record.path.clone(),
            headers,
            body,
        })
    }
}

fn not_found(path: &ResourcePath) -> ResolutionError {
    ResolutionError::NotFound {
        path: path.as_str().to_owned(),
    }
}

fn serve_headers(
    record_headers: &BTreeMap<String, String>,
    path: &ResourcePath,
    object_id: ObjectId,
    accepts_html: bool,
) -> BTreeMap<String, String> {
    let mut headers: BTreeMap<String, String> = record_headers
        .iter()
        .filter(|(k, _)| !DIGEST_HEADERS.iter().any(|d| k.eq_ignore_ascii_case(d)))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    if !headers.keys().any(|k| k.eq_ignore_ascii_case("content-type")) {
        headers.insert(
            "content-type".into(),
            content_type::infer(path, accepts_html).into(),
        );
    }
    headers.insert("cache-control".into(), CACHE_CONTROL_VALUE.into());
    headers.insert(SITE_OBJECT_ID_HEADER.into(), object_id.to_hex());
    headers
}
