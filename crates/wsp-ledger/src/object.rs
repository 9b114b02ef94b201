use std::collections::BTreeMap;

use wsp_types::{ObjectId, TypeError};

/// Display attribute a site object uses to point at another site object.
pub const REDIRECT_DISPLAY_KEY: &str = "walrus site address";

/// Raw content of a ledger object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObjectContent {
    /// A Move object with its fully-qualified type and BCS bytes.
    MoveObject { type_tag: String, bcs_bytes: Vec<u8> },
    /// A package or any other non-Move-object content.
    Other,
}

/// One object as returned by a ledger query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerObject {
    pub object_id: ObjectId,
    /// Display attributes; empty when the object has no display.
    pub display: BTreeMap<String, String>,
    pub content: Option<ObjectContent>,
}

impl LedgerObject {
    pub fn new(object_id: ObjectId) -> Self {
        Self {
            object_id,
            display: BTreeMap::new(),
            content: None,
        }
    }

    pub fn with_display(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.display.insert(key.into(), value.into());
        self
    }

    pub fn with_move_content(mut self, type_tag: impl Into<String>, bcs_bytes: Vec<u8>) -> Self {
        self.content = Some(ObjectContent::MoveObject {
            type_tag: type_tag.into(),
            bcs_bytes,
        });
        self
    }

    /// Site object this one redirects to, if its display says so.
    ///
    /// An empty attribute value counts as no redirect.
    pub fn redirect_target(&self) -> Result<Option<ObjectId>, TypeError> {
        match self.display.get(REDIRECT_DISPLAY_KEY).map(|v| v.trim()) {
            None | Some("") => Ok(None),
            Some(target) => ObjectId::from_hex(target).map(Some),
        }
    }

    /// BCS bytes when this is a Move object.
    pub fn move_bcs(&self) -> Option<&[u8]> {
        match &self.content {
            Some(ObjectContent::MoveObject { bcs_bytes, .. }) => Some(bcs_bytes),
            _ => None,
        }
    }
}
