use std::collections::BTreeMap;

use wsp_types::{BlobHash, BlobId, ByteRange, ObjectId, ResourcePath, ResourceRecord};

use crate::bcs::{BcsDecode, BcsEncode, BcsReader, BcsWriter};
use crate::error::DecodeResult;

/// A Sui dynamic field object: `Field<K, V> { id, name, value }`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DynamicFieldEntry<K, V> {
    /// UID of the field object itself.
    pub id: ObjectId,
    pub name: K,
    pub value: V,
}

/// The dynamic field type a site stores per resource.
pub type ResourceEntry = DynamicFieldEntry<ResourcePath, ResourceRecord>;

impl<K: BcsDecode, V: BcsDecode> BcsDecode for DynamicFieldEntry<K, V> {
    fn decode(reader: &mut BcsReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            id: ObjectId::decode(reader)?,
            name: K::decode(reader)?,
            value: V::decode(reader)?,
        })
    }
}

impl<K: BcsEncode, V: BcsEncode> BcsEncode for DynamicFieldEntry<K, V> {
    fn encode(&self, writer: &mut BcsWriter) {
        self.id.encode(writer);
        self.name.encode(writer);
        self.value.encode(writer);
    }
}

impl BcsDecode for ObjectId {
    fn decode(reader: &mut BcsReader<'_>) -> DecodeResult<Self> {
        Ok(ObjectId::from_bytes(reader.read_array()?))
    }
}

impl BcsEncode for ObjectId {
    fn encode(&self, writer: &mut BcsWriter) {
        writer.write_raw(self.as_bytes());
    }
}

// u256 values are 32 little-endian bytes; the types keep them in that order.
impl BcsDecode for BlobId {
    fn decode(reader: &mut BcsReader<'_>) -> DecodeResult<Self> {
        Ok(BlobId::from_bytes(reader.read_array()?))
    }
}

impl BcsEncode for BlobId {
    fn encode(&self, writer: &mut BcsWriter) {
        writer.write_raw(self.as_bytes());
    }
}

impl BcsDecode for BlobHash {
    fn decode(reader: &mut BcsReader<'_>) -> DecodeResult<Self> {
        Ok(BlobHash::from_bytes(reader.read_array()?))
    }
}

impl BcsEncode for BlobHash {
    fn encode(&self, writer: &mut BcsWriter) {
        writer.write_raw(self.as_bytes());
    }
}

/// `ResourcePath { path: String }`.
impl BcsDecode for ResourcePath {
    fn decode(reader: &mut BcsReader<'_>) -> DecodeResult<Self> {
        Ok(ResourcePath::new(reader.read_string()?))
    }
}

impl BcsEncode for ResourcePath {
    fn encode(&self, writer: &mut BcsWriter) {
        writer.write_string(self.as_str());
    }
}

/// `Range { start: Option<u64>, end: Option<u64> }`.
impl BcsDecode for ByteRange {
    fn decode(reader: &mut BcsReader<'_>) -> DecodeResult<Self> {
        Ok(ByteRange {
            start: Option::<u64>::decode(reader)?,
            end: Option::<u64>::decode(reader)?,
        })
    }
}

impl BcsEncode for ByteRange {
    fn encode(&self, writer: &mut BcsWriter) {
        self.start.encode(writer);
        self.end.encode(writer);
    }
}

/// `Resource { path, headers: VecMap<String, String>, blob_id: u256,
/// blob_hash: u256, range: Option<Range> }`.
impl BcsDecode for ResourceRecord {
    fn decode(reader: &mut BcsReader<'_>) -> DecodeResult<Self> {
        Ok(ResourceRecord {
            path: reader.read_string()?,
            headers: BTreeMap::<String, String>::decode(reader)?,
            blob_id: BlobId::decode(reader)?,
            blob_hash: BlobHash::decode(reader)?,
            range: Option::<ByteRange>::decode(reader)?,
        })
    }
}

impl BcsEncode for ResourceRecord {
    fn encode(&self, writer: &mut BcsWriter) {
        writer.write_string(&self.path);
        self.headers.encode(writer);
        self.blob_id.encode(writer);
        self.blob_hash.encode(writer);
        self.range.encode(writer);
    }
}

/// Entry points for the resource record layout.
pub struct ResourceCodec;

impl ResourceCodec {
    /// Decode the BCS content of a resource dynamic field object.
    pub fn decode_entry(data: &[u8]) -> DecodeResult<ResourceEntry> {
        ResourceEntry::from_bcs(data)
    }

    /// Encode a resource dynamic field object.
    pub fn encode_entry(entry: &ResourceEntry) -> Vec<u8> {
        entry.to_bcs()
    }
}
