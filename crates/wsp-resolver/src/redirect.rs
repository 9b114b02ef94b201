use std::collections::HashSet;

use wsp_codec::ResourceCodec;
use wsp_crypto::ResourceFieldDeriver;
use wsp_ledger::{LedgerClient, LedgerError, LedgerObject};
use wsp_types::{ObjectId, ResourcePath, ResourceRecord};

use crate::error::{ResolutionError, ResolutionResult};

/// Maximum number of redirect hops followed from the root site object.
pub const MAX_REDIRECT_DEPTH: usize = 3;

/// Outcome of looking a path up along a site's redirect chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// The site object `object_id` holds a record for the path.
    Found {
        object_id: ObjectId,
        record: ResourceRecord,
    },
    /// The chain ended at `object_id` without a usable record.
    NotFoundAtLeaf { object_id: ObjectId },
}

/// Follows `walrus site address` redirects and looks up the resource field.
///
/// Each hop is one batched ledger query for the site object and the
/// derived dynamic field id of the path under it.
pub struct RedirectResolver<'a> {
    ledger: &'a dyn LedgerClient,
    deriver: &'a ResourceFieldDeriver,
}

impl<'a> RedirectResolver<'a> {
    pub fn new(ledger: &'a dyn LedgerClient, deriver: &'a ResourceFieldDeriver) -> Self {
        Self { ledger, deriver }
    }

    pub async fn lookup(&self, root: ObjectId, path: &ResourcePath) -> ResolutionResult<Lookup> {
        let mut visited: HashSet<ObjectId> = HashSet::new();
        let mut current = root;
        let mut depth = 0usize;

        loop {
            if visited.contains(&current) {
                return Err(ResolutionError::RedirectLoop { object_id: current });
            }
            if depth >= MAX_REDIRECT_DEPTH {
                return Err(ResolutionError::TooManyRedirects {
                    limit: MAX_REDIRECT_DEPTH,
                });
            }
            visited.insert(current);

            let field_id = self.deriver.field_id(&current, path);
            let (site, field) = self.fetch_pair(current, field_id).await?;

            if let Some(target) = redirect_of(current, site.as_ref())? {
                tracing::debug!(from = %current, to = %target, depth, "following site redirect");
                current = target;
                depth += 1;
                continue;
            }

            let Some(bytes) = field.as_ref().and_then(LedgerObject::move_bcs) else {
                tracing::debug!(site = %current, %path, "no resource field");
                return Ok(Lookup::NotFoundAtLeaf { object_id: current });
            };

            let entry = match ResourceCodec::decode_entry(bytes) {
                Ok(entry) => entry,
                Err(err) if depth == 0 => {
                    tracing::warn!(site = %current, %path, error = %err, "undecodable resource field");
                    return Ok(Lookup::NotFoundAtLeaf { object_id: current });
                }
                Err(err) => return Err(err.into()),
            };

            if entry.value.blob_id.is_zero() {
                return Ok(Lookup::NotFoundAtLeaf { object_id: current });
            }
            return Ok(Lookup::Found {
                object_id: current,
                record: entry.value,
            });
        }
    }

    async fn fetch_pair(
        &self,
        site: ObjectId,
        field: ObjectId,
    ) -> ResolutionResult<(Option<LedgerObject>, Option<LedgerObject>)> {
        let mut objects = self.ledger.multi_get_objects(&[site, field]).await?.into_iter();
        match (objects.next(), objects.next(), objects.next()) {
            (Some(site), Some(field), None) => Ok((site, field)),
            _ => Err(LedgerError::InvalidResponse(
                "expected exactly two objects for site and field".into(),
            )
            .into()),
        }
    }
}

fn redirect_of(current: ObjectId, site: Option<&LedgerObject>) -> ResolutionResult<Option<ObjectId>> {
    let Some(site) = site else {
        return Ok(None);
    };
    site.redirect_target()
        .map_err(|e| ResolutionError::InvalidRedirect {
            object_id: current,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SiteFixture;

    fn id(b: u8) -> ObjectId {
        ObjectId::from_bytes([b; 32])
    }

    fn index() -> ResourcePath {
        ResourcePath::new("/index.html")
    }

    #[tokio::test]
    async fn finds_record_on_root() {
        let site = SiteFixture::new(id(1));
        let record = site.add_resource(id(1), "/index.html", b"hi");
        let resolver = RedirectResolver::new(site.ledger.as_ref(), &site.deriver);

        let lookup = resolver.lookup(id(1), &index()).await.unwrap();
        assert_eq!(lookup, Lookup::Found { object_id: id(1), record });
        assert_eq!(site.ledger.call_count(), 1);
        assert_eq!(
            site.ledger.requests()[0],
            vec![id(1), site.deriver.field_id(&id(1), &index())]
        );
    }

    #[tokio::test]
    async fn follows_chain_of_three_sites() {
        let site = SiteFixture::new(id(1));
        site.redirect(id(1), id(2));
        site.redirect(id(2), id(3));
        site.add_site(id(3));
        let record = site.add_resource(id(3), "/index.html", b"leaf");
        let resolver = RedirectResolver::new(site.ledger.as_ref(), &site.deriver);

        let lookup = resolver.lookup(id(1), &index()).await.unwrap();
        assert_eq!(lookup, Lookup::Found { object_id: id(3), record });
        assert_eq!(site.ledger.call_count(), 3);
        assert!(site.ledger.requests().iter().all(|batch| batch.len() == 2));
    }

    #[tokio::test]
    async fn four_site_chain_is_too_many() {
        let site = SiteFixture::new(id(1));
        site.redirect(id(1), id(2));
        site.redirect(id(2), id(3));
        site.redirect(id(3), id(4));
        site.add_site(id(4));
        site.add_resource(id(4), "/index.html", b"too deep");
        let resolver = RedirectResolver::new(site.ledger.as_ref(), &site.deriver);

        let err = resolver.lookup(id(1), &index()).await.unwrap_err();
        assert!(matches!(err, ResolutionError::TooManyRedirects { limit: 3 }));
        assert_eq!(site.ledger.call_count(), 3);
    }

    #[tokio::test]
    async fn loop_is_detected_without_further_calls() {
        let site = SiteFixture::new(id(1));
        site.redirect(id(1), id(2));
        site.redirect(id(2), id(1));
        let resolver = RedirectResolver::new(site.ledger.as_ref(), &site.deriver);

        let err = resolver.lookup(id(1), &index()).await.unwrap_err();
        assert!(matches!(err, ResolutionError::RedirectLoop { object_id } if object_id == id(1)));
        assert_eq!(site.ledger.call_count(), 2);
    }

    #[tokio::test]
    async fn self_redirect_is_a_loop() {
        let site = SiteFixture::new(id(1));
        site.redirect(id(1), id(1));
        let resolver = RedirectResolver::new(site.ledger.as_ref(), &site.deriver);

        let err = resolver.lookup(id(1), &index()).await.unwrap_err();
        assert!(matches!(err, ResolutionError::RedirectLoop { .. }));
        assert_eq!(site.ledger.call_count(), 1);
    }

    #[tokio::test]
    async fn missing_field_is_not_found_at_leaf() {
        let site = SiteFixture::new(id(1));
        let resolver = RedirectResolver::new(site.ledger.as_ref(), &site.deriver);
        let lookup = resolver.lookup(id(1), &ResourcePath::new("/missing.png")).await.unwrap();
        assert_eq!(lookup, Lookup::NotFoundAtLeaf { object_id: id(1) });
    }

    #[tokio::test]
    async fn non_move_field_is_not_found() {
        let site = SiteFixture::new(id(1));
        site.add_package_field(id(1), "/index.html");
        let resolver = RedirectResolver::new(site.ledger.as_ref(), &site.deriver);
        let lookup = resolver.lookup(id(1), &index()).await.unwrap();
        assert_eq!(lookup, Lookup::NotFoundAtLeaf { object_id: id(1) });
    }

    #[tokio::test]
    async fn zero_blob_id_is_not_found() {
        let site = SiteFixture::new(id(1));
        let mut record = SiteFixture::record("/index.html", b"x");
        record.blob_id = wsp_types::BlobId::from_bytes([0; 32]);
        site.add_record(id(1), "/index.html", record);
        let resolver = RedirectResolver::new(site.ledger.as_ref(), &site.deriver);
        let lookup = resolver.lookup(id(1), &index()).await.unwrap();
        assert_eq!(lookup, Lookup::NotFoundAtLeaf { object_id: id(1) });
    }

    #[tokio::test]
    async fn garbage_on_root_is_not_found() {
        let site = SiteFixture::new(id(1));
        site.add_raw_field(id(1), "/index.html", vec![1, 2, 3]);
        let resolver = RedirectResolver::new(site.ledger.as_ref(), &site.deriver);
        let lookup = resolver.lookup(id(1), &index()).await.unwrap();
        assert_eq!(lookup, Lookup::NotFoundAtLeaf { object_id: id(1) });
    }

    #[tokio::test]
    async fn garbage_after_redirect_is_decode_error() {
        let site = SiteFixture::new(id(1));
        site.redirect(id(1), id(2));
        site.add_site(id(2));
        site.add_raw_field(id(2), "/index.html", vec![1, 2, 3]);
        let resolver = RedirectResolver::new(site.ledger.as_ref(), &site.deriver);
        let err = resolver.lookup(id(1), &index()).await.unwrap_err();
        assert!(matches!(err, ResolutionError::Decode(_)));
    }

    #[tokio::test]
    async fn invalid_redirect_target_is_an_error() {
        let site = SiteFixture::new(id(1));
        site.ledger.insert(
            LedgerObject::new(id(1)).with_display(wsp_ledger::REDIRECT_DISPLAY_KEY, "not-an-id"),
        );
        let resolver = RedirectResolver::new(site.ledger.as_ref(), &site.deriver);
        let err = resolver.lookup(id(1), &index()).await.unwrap_err();
        assert!(matches!(err, ResolutionError::InvalidRedirect { .. }));
    }

    #[tokio::test]
    async fn record_path_may_differ_from_request() {
        let site = SiteFixture::new(id(1));
        let record = SiteFixture::record("/other.html", b"x");
        site.add_record(id(1), "/index.html", record.clone());
        let resolver = RedirectResolver::new(site.ledger.as_ref(), &site.deriver);
        let lookup = resolver.lookup(id(1), &index()).await.unwrap();
        assert_eq!(lookup, Lookup::Found { object_id: id(1), record });
    }
}
