use std::collections::BTreeMap;

use crate::error::{DecodeError, DecodeResult};

/// Cursor over a BCS-encoded buffer.
pub struct BcsReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BcsReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Take the next `n` bytes.
    pub fn take(&mut self, n: usize) -> DecodeResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(DecodeError::UnexpectedEof {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut arr = [0u8; N];
        arr.copy_from_slice(self.take(N)?);
        Ok(arr)
    }

    pub fn read_u64(&mut self) -> DecodeResult<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// ULEB128 length prefix. BCS caps lengths at `u32::MAX`.
    pub fn read_uleb128(&mut self) -> DecodeResult<usize> {
        let mut value: u64 = 0;
        for shift in (0..35).step_by(7) {
            let byte = self.read_u8()?;
            value |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                if value > u64::from(u32::MAX) {
                    return Err(DecodeError::InvalidLength);
                }
                return Ok(value as usize);
            }
        }
        Err(DecodeError::InvalidLength)
    }

    /// Length prefix checked against the bytes left, so a corrupt prefix
    /// cannot trigger a huge allocation.
    fn read_len(&mut self) -> DecodeResult<usize> {
        let len = self.read_uleb128()?;
        if len > self.remaining() {
            return Err(DecodeError::UnexpectedEof {
                needed: len,
                remaining: self.remaining(),
            });
        }
        Ok(len)
    }

    pub fn read_bytes(&mut self) -> DecodeResult<&'a [u8]> {
        let len = self.read_len()?;
        self.take(len)
    }

    pub fn read_string(&mut self) -> DecodeResult<String> {
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes.to_vec()).map_err(|e| DecodeError::InvalidUtf8(e.to_string()))
    }

    pub fn read_option<T, F>(&mut self, read: F) -> DecodeResult<Option<T>>
    where
        F: FnOnce(&mut Self) -> DecodeResult<T>,
    {
        match self.read_u8()? {
            0 => Ok(None),
            1 => read(self).map(Some),
            tag => Err(DecodeError::InvalidOptionTag(tag)),
        }
    }

    /// Fail unless the whole buffer has been consumed.
    pub fn finish(&self) -> DecodeResult<()> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(DecodeError::TrailingBytes(n)),
        }
    }
}

/// Growable BCS output buffer.
#[derive(Default)]
pub struct BcsWriter {
    buf: Vec<u8>,
}

impl BcsWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_uleb128(&mut self, mut v: usize) {
        loop {
            let byte = (v & 0x7f) as u8;
            v >>= 7;
            if v == 0 {
                self.buf.push(byte);
                return;
            }
            self.buf.push(byte | 0x80);
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.write_uleb128(bytes.len());
        self.write_raw(bytes);
    }

    pub fn write_string(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    pub fn write_option<T, F>(&mut self, value: Option<&T>, write: F)
    where
        F: FnOnce(&mut Self, &T),
    {
        match value {
            None => self.write_u8(0),
            Some(v) => {
                self.write_u8(1);
                write(self, v);
            }
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Types that can be read from BCS.
pub trait BcsDecode: Sized {
    fn decode(reader: &mut BcsReader<'_>) -> DecodeResult<Self>;

    /// Decode a complete buffer, rejecting trailing bytes.
    fn from_bcs(data: &[u8]) -> DecodeResult<Self> {
        let mut reader = BcsReader::new(data);
        let value = Self::decode(&mut reader)?;
        reader.finish()?;
        Ok(value)
    }
}

/// Types that can be written as BCS.
pub trait BcsEncode {
    fn encode(&self, writer: &mut BcsWriter);

    fn to_bcs(&self) -> Vec<u8> {
        let mut writer = BcsWriter::new();
        self.encode(&mut writer);
        writer.into_bytes()
    }
}

impl BcsDecode for u64 {
    fn decode(reader: &mut BcsReader<'_>) -> DecodeResult<Self> {
        reader.read_u64()
    }
}

impl BcsEncode for u64 {
    fn encode(&self, writer: &mut BcsWriter) {
        writer.write_u64(*self);
    }
}

impl BcsDecode for String {
    fn decode(reader: &mut BcsReader<'_>) -> DecodeResult<Self> {
        reader.read_string()
    }
}

impl BcsEncode for String {
    fn encode(&self, writer: &mut BcsWriter) {
        writer.write_string(self);
    }
}

impl BcsEncode for str {
    fn encode(&self, writer: &mut BcsWriter) {
        writer.write_string(self);
    }
}

impl<T: BcsDecode> BcsDecode for Option<T> {
    fn decode(reader: &mut BcsReader<'_>) -> DecodeResult<Self> {
        reader.read_option(T::decode)
    }
}

impl<T: BcsEncode> BcsEncode for Option<T> {
    fn encode(&self, writer: &mut BcsWriter) {
        writer.write_option(self.as_ref(), |w, v| v.encode(w));
    }
}

/// Maps are a sequence of key/value entries (Move `VecMap`).
impl<K: BcsDecode + Ord, V: BcsDecode> BcsDecode for BTreeMap<K, V> {
    fn decode(reader: &mut BcsReader<'_>) -> DecodeResult<Self> {
        let count = reader.read_uleb128()?;
        let mut map = BTreeMap::new();
        for _ in 0..count {
            let key = K::decode(reader)?;
            let value = V::decode(reader)?;
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<K: BcsEncode, V: BcsEncode> BcsEncode for BTreeMap<K, V> {
    fn encode(&self, writer: &mut BcsWriter) {
        writer.write_uleb128(self.len());
        for (k, v) in self {
            k.encode(writer);
            v.encode(writer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uleb128_known_values() {
        let cases: [(usize, &[u8]); 4] = [
            (0, &[0x00]),
            (127, &[0x7f]),
            (128, &[0x80, 0x01]),
            (16384, &[0x80, 0x80, 0x01]),
        ];
        for (value, bytes) in cases {
            let mut w = BcsWriter::new();
            w.write_uleb128(value);
            assert_eq!(w.into_bytes(), bytes);
            assert_eq!(BcsReader::new(bytes).read_uleb128().unwrap(), value);
        }
    }

    #[test]
    fn uleb128_rejects_overflow() {
        let bytes = [0xff, 0xff, 0xff, 0xff, 0x7f];
        assert_eq!(
            BcsReader::new(&bytes).read_uleb128(),
            Err(DecodeError::InvalidLength)
        );
        let unterminated = [0x80, 0x80, 0x80, 0x80, 0x80, 0x01];
        assert_eq!(
            BcsReader::new(&unterminated).read_uleb128(),
            Err(DecodeError::InvalidLength)
        );
    }

    #[test]
    fn string_layout() {
        assert_eq!("abc".to_string().to_bcs(), vec![3, b'a', b'b', b'c']);
        assert_eq!(String::from_bcs(&[3, b'a', b'b', b'c']).unwrap(), "abc");
    }

    #[test]
    fn string_length_beyond_buffer() {
        let err = String::from_bcs(&[10, b'a']).unwrap_err();
        assert_eq!(err, DecodeError::UnexpectedEof { needed: 10, remaining: 1 });
    }

    #[test]
    fn invalid_utf8() {
        assert!(matches!(
            String::from_bcs(&[2, 0xff, 0xfe]),
            Err(DecodeError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn option_tags() {
        assert_eq!(Option::<u64>::from_bcs(&[0]).unwrap(), None);
        let mut some = vec![1];
        some.extend_from_slice(&7u64.to_le_bytes());
        assert_eq!(Option::<u64>::from_bcs(&some).unwrap(), Some(7));
        assert_eq!(
            Option::<u64>::from_bcs(&[2]),
            Err(DecodeError::InvalidOptionTag(2))
        );
    }

    #[test]
    fn map_is_flat_pairs() {
        let mut map = BTreeMap::new();
        map.insert("k".to_string(), "v".to_string());
        assert_eq!(map.to_bcs(), vec![1, 1, b'k', 1, b'v']);
        assert_eq!(BTreeMap::<String, String>::from_bcs(&[1, 1, b'k', 1, b'v']).unwrap(), map);
    }

    #[test]
    fn trailing_bytes_rejected() {
        assert_eq!(u64::from_bcs(&[0; 9]), Err(DecodeError::TrailingBytes(1)));
    }
}
