use std::fmt;
use std::str::FromStr;

use wsp_codec::{BcsEncode, BcsWriter};
use wsp_types::ObjectId;

use crate::error::{DeriveError, DeriveResult};

/// Move type tag, as hashed into dynamic field ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeTag {
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    Address,
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
}

/// Fully-qualified Move struct type, e.g. `0x2::site::ResourcePath`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructTag {
    pub address: ObjectId,
    pub module: String,
    pub name: String,
    pub type_params: Vec<TypeTag>,
}

impl TypeTag {
    // BCS variant indices of the ledger's `TypeTag` enum.
    fn variant_index(&self) -> u8 {
        match self {
            Self::Bool => 0,
            Self::U8 => 1,
            Self::U64 => 2,
            Self::U128 => 3,
            Self::Address => 4,
            Self::Signer => 5,
            Self::Vector(_) => 6,
            Self::Struct(_) => 7,
            Self::U16 => 8,
            Self::U32 => 9,
            Self::U256 => 10,
        }
    }
}

impl BcsEncode for TypeTag {
    fn encode(&self, writer: &mut BcsWriter) {
        writer.write_u8(self.variant_index());
        match self {
            Self::Vector(inner) => inner.encode(writer),
            Self::Struct(tag) => tag.encode(writer),
            _ => {}
        }
    }
}

impl BcsEncode for StructTag {
    fn encode(&self, writer: &mut BcsWriter) {
        writer.write_raw(self.address.as_bytes());
        writer.write_string(&self.module);
        writer.write_string(&self.name);
        writer.write_uleb128(self.type_params.len());
        for param in &self.type_params {
            param.encode(writer);
        }
    }
}

impl FromStr for TypeTag {
    type Err = DeriveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser { input: s, pos: 0 };
        let tag = parser.parse_tag()?;
        parser.skip_ws();
        if parser.pos != s.len() {
            return Err(parser.error("unexpected trailing characters"));
        }
        Ok(tag)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::U8 => f.write_str("u8"),
            Self::U16 => f.write_str("u16"),
            Self::U32 => f.write_str("u32"),
            Self::U64 => f.write_str("u64"),
            Self::U128 => f.write_str("u128"),
            Self::U256 => f.write_str("u256"),
            Self::Address => f.write_str("address"),
            Self::Signer => f.write_str("signer"),
            Self::Vector(inner) => write!(f, "vector<{inner}>"),
            Self::Struct(tag) => {
                write!(f, "{}::{}::{}", tag.address, tag.module, tag.name)?;
                if !tag.type_params.is_empty() {
                    f.write_str("<")?;
                    for (i, p) in tag.type_params.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{p}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
        }
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, reason: &str) -> DeriveError {
        DeriveError::InvalidTypeTag {
            input: self.input.to_owned(),
            reason: format!("{reason} at offset {}", self.pos),
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.input.len() - trimmed.len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> DeriveResult<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(&format!("expected `{token}`")))
        }
    }

    fn ident(&mut self) -> DeriveResult<&'a str> {
        self.skip_ws();
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(self.error("expected identifier"));
        }
        self.pos += len;
        Ok(&rest[..len])
    }

    fn parse_tag(&mut self) -> DeriveResult<TypeTag> {
        let ident = self.ident()?;
        let tag = match ident {
            "bool" => TypeTag::Bool,
            "u8" => TypeTag::U8,
            "u16" => TypeTag::U16,
            "u32" => TypeTag::U32,
            "u64" => TypeTag::U64,
            "u128" => TypeTag::U128,
            "u256" => TypeTag::U256,
            "address" => TypeTag::Address,
            "signer" => TypeTag::Signer,
            "vector" => {
                self.expect("<")?;
                let inner = self.parse_tag()?;
                self.expect(">")?;
                TypeTag::Vector(Box::new(inner))
            }
            address => TypeTag::Struct(Box::new(self.parse_struct(address)?)),
        };
        Ok(tag)
    }

    fn parse_struct(&mut self, address: &str) -> DeriveResult<StructTag> {
        let address = ObjectId::from_hex(address)
            .map_err(|e| self.error(&format!("bad address: {e}")))?;
        self.expect("::")?;
        let module = self.ident()?.to_owned();
        self.expect("::")?;
        let name = self.ident()?.to_owned();
        let mut type_params = Vec::new();
        if self.eat("<") {
            loop {
                type_params.push(self.parse_tag()?);
                if self.eat(">") {
                    break;
                }
                self.expect(",")?;
            }
        }
        Ok(StructTag {
            address,
            module,
            name,
            type_params,
        })
    }
}
