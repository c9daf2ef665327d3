/*
 * Copyright (c) 2024 Andrew Brower.
 * This file is part of Blockbridge.
 *
 * Blockbridge is free software: you can redistribute it and/or
 * modify it under the terms of the GNU Affero General Public
 * License as published by the Free Software Foundation, either
 * version 3 of the License, or (at your option) any later version.
 *
 * Blockbridge is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU
 * Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public
 * License along with Blockbridge. If not, see
 * <https://www.gnu.org/licenses/>.
 */

//! Named binary tag codec used for block palettes and block state descriptors.
//!
//! Numeric fields are written in the byte order chosen by the caller, so the
//! same code reads the little-endian Bedrock palette resources and big-endian
//! Java data.

#[allow(unused_imports)]
pub mod datatypes {
    mod compound;
    mod impls;
    mod list;
    mod string;
    mod tag;

    pub use compound::*;
    pub use list::*;
    pub use string::*;
    pub use tag::*;
}

use byteorder::ByteOrder;
use datatypes::{Compound, NbtString, TagType};

pub use byteorder::{BigEndian, LittleEndian};

/// Compounds and lists nested deeper than this are rejected while decoding.
pub const MAX_DEPTH: usize = 512;

#[derive(thiserror::Error, Debug)]
pub enum ErrorKind {
    #[error("IO error")]
    Io(#[from] std::io::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub trait Read: Sized {
    fn read<O: ByteOrder>(r: &mut impl std::io::Read) -> Result<Self, ErrorKind>;
}

pub trait Write {
    fn write<O: ByteOrder>(&self, w: &mut impl std::io::Write) -> Result<(), ErrorKind>;
}

/// Reads a root compound along with its name.
pub fn read_named<O: ByteOrder>(
    r: &mut impl std::io::Read,
) -> Result<(String, Compound), ErrorKind> {
    let ty = TagType::read::<O>(r)?;
    if ty != TagType::Compound {
        return Err(ErrorKind::InvalidData(format!(
            "root tag must be a compound, got {ty:?}"
        )));
    }

    let NbtString(name) = NbtString::read::<O>(r)?;
    let compound = Compound::read::<O>(r)?;

    Ok((name, compound))
}

pub fn write_named<O: ByteOrder>(
    w: &mut impl std::io::Write,
    name: &str,
    compound: &Compound,
) -> Result<(), ErrorKind> {
    TagType::Compound.write::<O>(w)?;
    name.write::<O>(w)?;
    compound.write::<O>(w)
}

/// Decodes a whole buffer holding exactly one named root compound.
pub fn from_bytes<O: ByteOrder>(bytes: &[u8]) -> Result<(String, Compound), ErrorKind> {
    let mut r = bytes;
    let root = read_named::<O>(&mut r)?;

    if !r.is_empty() {
        return Err(ErrorKind::InvalidData(format!(
            "{} trailing bytes after root compound",
            r.len()
        )));
    }

    Ok(root)
}

pub fn to_bytes<O: ByteOrder>(name: &str, compound: &Compound) -> Result<Vec<u8>, ErrorKind> {
    let mut buf = Vec::new();
    write_named::<O>(&mut buf, name, compound)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::{List, Tag};

    fn sample() -> Compound {
        Compound::new()
            .with("name", "minecraft:stone")
            .with(
                "states",
                Compound::new()
                    .with("stone_type", "granite")
                    .with("upside_down_bit", true),
            )
            .with("version", 17959425)
    }

    #[test]
    fn little_endian_layout() {
        let compound = Compound::new().with("v", 1);
        let bytes = to_bytes::<LittleEndian>("", &compound).unwrap();

        assert_eq!(
            bytes,
            vec![
                0x0A, 0x00, 0x00, // root compound, empty name
                0x03, 0x01, 0x00, b'v', // int named "v"
                0x01, 0x00, 0x00, 0x00, // 1 (little-endian)
                0x00, // end
            ]
        );
    }

    #[test]
    fn big_endian_layout() {
        let compound = Compound::new().with("v", 1);
        let bytes = to_bytes::<BigEndian>("", &compound).unwrap();

        assert_eq!(
            bytes,
            vec![
                0x0A, 0x00, 0x00, 0x03, 0x00, 0x01, b'v', 0x00, 0x00, 0x00, 0x01, 0x00,
            ]
        );
    }

    #[test]
    fn decodes_what_it_encodes() {
        let compound = sample().with(
            "permutations",
            List::Compound(vec![Compound::new().with("condition", "q.block_state('on')")]),
        );

        let bytes = to_bytes::<LittleEndian>("palette", &compound).unwrap();
        let (name, decoded) = from_bytes::<LittleEndian>(&bytes).unwrap();

        assert_eq!(name, "palette");
        assert_eq!(decoded, compound);
        assert_eq!(to_bytes::<LittleEndian>("palette", &decoded).unwrap(), bytes);
    }

    #[test]
    fn byte_orders_are_not_interchangeable() {
        let bytes = to_bytes::<LittleEndian>("", &sample()).unwrap();
        assert!(from_bytes::<BigEndian>(&bytes).is_err());
    }

    #[test]
    fn empty_typed_list_keeps_element_type() {
        let compound = Compound::new().with("permutations", List::Compound(vec![]));
        let bytes = to_bytes::<LittleEndian>("", &compound).unwrap();

        // list tag, name, element type compound, length 0
        assert_eq!(
            &bytes[3..],
            &[
                0x09, 0x0C, 0x00, b'p', b'e', b'r', b'm', b'u', b't', b'a', b't', b'i', b'o',
                b'n', b's', 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00,
            ]
        );

        let (_, decoded) = from_bytes::<LittleEndian>(&bytes).unwrap();
        assert_eq!(
            decoded.get("permutations"),
            Some(&Tag::List(List::Compound(vec![])))
        );
    }

    #[test]
    fn rejects_non_compound_root() {
        let err = from_bytes::<LittleEndian>(&[0x08, 0x00, 0x00, 0x00, 0x00]).unwrap_err();
        assert!(matches!(err, ErrorKind::InvalidData(_)));
    }

    #[test]
    fn rejects_unknown_tag_type() {
        let err = from_bytes::<LittleEndian>(&[0x0A, 0x00, 0x00, 0x0D, 0x00, 0x00]).unwrap_err();
        assert!(matches!(err, ErrorKind::InvalidData(_)));
    }

    #[test]
    fn rejects_truncated_stream() {
        let bytes = to_bytes::<LittleEndian>("", &sample()).unwrap();
        let err = from_bytes::<LittleEndian>(&bytes[..bytes.len() - 4]).unwrap_err();
        assert!(matches!(err, ErrorKind::Io(_)));
    }

    #[test]
    fn rejects_negative_list_length() {
        let bytes = [
            0x0A, 0x00, 0x00, 0x09, 0x01, 0x00, b'l', 0x03, 0xFF, 0xFF, 0xFF, 0xFF, 0x00,
        ];
        let err = from_bytes::<LittleEndian>(&bytes).unwrap_err();
        assert!(matches!(err, ErrorKind::InvalidData(_)));
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut bytes = to_bytes::<LittleEndian>("", &sample()).unwrap();
        bytes.push(0x00);
        assert!(from_bytes::<LittleEndian>(&bytes).is_err());
    }

    #[test]
    fn rejects_excessive_nesting() {
        let mut bytes = vec![0x0A, 0x00, 0x00];
        for _ in 0..=MAX_DEPTH {
            bytes.extend_from_slice(&[0x0A, 0x00, 0x00]);
        }
        let err = from_bytes::<LittleEndian>(&bytes).unwrap_err();
        assert!(matches!(err, ErrorKind::InvalidData(_)));
    }

    #[test]
    fn matches_fastnbt_big_endian_output() {
        #[derive(serde::Serialize)]
        struct States {
            stone_type: String,
            upside_down_bit: bool,
        }

        #[derive(serde::Serialize)]
        struct Descriptor {
            name: String,
            states: States,
            version: i32,
        }

        let expected = fastnbt::to_bytes(&Descriptor {
            name: "minecraft:stone".into(),
            states: States {
                stone_type: "granite".into(),
                upside_down_bit: true,
            },
            version: 17959425,
        })
        .unwrap();

        assert_eq!(to_bytes::<BigEndian>("", &sample()).unwrap(), expected);
    }
}
