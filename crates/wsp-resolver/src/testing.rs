//! In-memory site fixtures for resolver tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use wsp_codec::{ResourceCodec, ResourceEntry};
use wsp_crypto::{ContentHasher, ResourceFieldDeriver};
use wsp_ledger::{InMemoryLedger, LedgerObject, ObjectContent, REDIRECT_DISPLAY_KEY};
use wsp_types::{BlobId, ObjectId, ResourcePath, ResourceRecord};

use crate::config::SiteConfig;
use crate::resolver::SiteResolver;

/// Site package address used by fixtures.
pub const TEST_SITE_PACKAGE: &str = "0x2";

/// Builds sites, redirects and resource fields on an [`InMemoryLedger`].
pub struct SiteFixture {
    pub ledger: Arc<InMemoryLedger>,
    pub deriver: ResourceFieldDeriver,
    pub root: ObjectId,
}

impl SiteFixture {
    /// A fixture whose root site object already exists.
    pub fn new(root: ObjectId) -> Self {
        let fixture = Self {
            ledger: Arc::new(InMemoryLedger::new()),
            deriver: ResourceFieldDeriver::new(TEST_SITE_PACKAGE)
                .unwrap_or_else(|e| panic!("fixture package must parse: {e}")),
            root,
        };
        fixture.add_site(root);
        fixture
    }

    /// Site configuration pointing at this fixture's root and `aggregator_url`.
    pub fn config(&self, aggregator_url: impl Into<String>) -> SiteConfig {
        SiteConfig {
            network: None,
            rpc_url_list: vec!["http://ledger.invalid".into()],
            aggregator_url: aggregator_url.into(),
            site_package: TEST_SITE_PACKAGE.into(),
            site_object_id: self.root.to_hex(),
        }
    }

    /// Resolver over this fixture's ledger.
    pub fn resolver(&self, aggregator_url: impl Into<String>) -> SiteResolver {
        SiteResolver::new(&self.config(aggregator_url), self.ledger.clone())
            .unwrap_or_else(|e| panic!("fixture config must be valid: {e}"))
    }

    /// Insert a plain site object with no display.
    pub fn add_site(&self, site: ObjectId) {
        self.ledger
            .insert(LedgerObject::new(site).with_move_content("0x2::site::Site", Vec::new()));
    }

    /// Make `from` redirect to `to`.
    pub fn redirect(&self, from: ObjectId, to: ObjectId) {
        self.ledger.insert(
            LedgerObject::new(from)
                .with_display(REDIRECT_DISPLAY_KEY, to.to_hex())
                .with_move_content("0x2::site::Site", Vec::new()),
        );
    }

    /// A record whose hash matches `body`.
    ///
    /// The blob id is derived from path and body so distinct resources get
    /// distinct aggregator URLs.
    pub fn record(path: &str, body: &[u8]) -> ResourceRecord {
        let mut seed = path.as_bytes().to_vec();
        seed.extend_from_slice(body);
        ResourceRecord {
            path: path.to_owned(),
            headers: BTreeMap::new(),
            blob_id: BlobId::from_bytes(*ContentHasher::digest(&seed).as_bytes()),
            blob_hash: ContentHasher::digest(body),
            range: None,
        }
    }

    /// Store a resource for `body` under `site` and return its record.
    pub fn add_resource(&self, site: ObjectId, path: &str, body: &[u8]) -> ResourceRecord {
        let record = Self::record(path, body);
        self.add_record(site, path, record.clone());
        record
    }

    /// Store `record` as the field for `path` under `site`.
    pub fn add_record(&self, site: ObjectId, path: &str, record: ResourceRecord) {
        let path = ResourcePath::new(path);
        let field_id = self.deriver.field_id(&site, &path);
        let entry = ResourceEntry {
            id: field_id,
            name: path,
            value: record,
        };
        self.add_raw_field_at(field_id, ResourceCodec::encode_entry(&entry));
    }

    /// Store arbitrary bytes as the field for `path` under `site`.
    pub fn add_raw_field(&self, site: ObjectId, path: &str, bytes: Vec<u8>) {
        let field_id = self.deriver.field_id(&site, &ResourcePath::new(path));
        self.add_raw_field_at(field_id, bytes);
    }

    /// Store a non-Move object where the field for `path` would be.
    pub fn add_package_field(&self, site: ObjectId, path: &str) {
        let field_id = self.deriver.field_id(&site, &ResourcePath::new(path));
        let mut object = LedgerObject::new(field_id);
        object.content = Some(ObjectContent::Other);
        self.ledger.insert(object);
    }

    fn add_raw_field_at(&self, field_id: ObjectId, bytes: Vec<u8>) {
        let type_tag = format!(
            "0x2::dynamic_field::Field<{}, {TEST_SITE_PACKAGE}::site::Resource>",
            self.deriver.key_type()
        );
        self.ledger
            .insert(LedgerObject::new(field_id).with_move_content(type_tag, bytes));
    }
}
