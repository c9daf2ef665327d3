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

use byteorder::ByteOrder;

use crate::{ErrorKind, Read, Write, MAX_DEPTH};

use super::{
    impls::{read_len, read_seq, write_len},
    Compound, NbtString, TagType,
};

/// A homogeneous list. The element type survives even when the list is empty,
/// so re-encoding a decoded list is byte-identical.
#[derive(Clone, Debug, PartialEq)]
pub enum List {
    /// An empty list whose element type is `End`.
    Empty,
    Byte(Vec<i8>),
    Short(Vec<i16>),
    Int(Vec<i32>),
    Long(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    ByteArray(Vec<Vec<i8>>),
    String(Vec<String>),
    List(Vec<List>),
    Compound(Vec<Compound>),
    IntArray(Vec<Vec<i32>>),
    LongArray(Vec<Vec<i64>>),
}

impl List {
    pub fn element_type(&self) -> TagType {
        match self {
            List::Empty => TagType::End,
            List::Byte(_) => TagType::Byte,
            List::Short(_) => TagType::Short,
            List::Int(_) => TagType::Int,
            List::Long(_) => TagType::Long,
            List::Float(_) => TagType::Float,
            List::Double(_) => TagType::Double,
            List::ByteArray(_) => TagType::ByteArray,
            List::String(_) => TagType::String,
            List::List(_) => TagType::List,
            List::Compound(_) => TagType::Compound,
            List::IntArray(_) => TagType::IntArray,
            List::LongArray(_) => TagType::LongArray,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            List::Empty => 0,
            List::Byte(v) => v.len(),
            List::Short(v) => v.len(),
            List::Int(v) => v.len(),
            List::Long(v) => v.len(),
            List::Float(v) => v.len(),
            List::Double(v) => v.len(),
            List::ByteArray(v) => v.len(),
            List::String(v) => v.len(),
            List::List(v) => v.len(),
            List::Compound(v) => v.len(),
            List::IntArray(v) => v.len(),
            List::LongArray(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_compounds(&self) -> Option<&[Compound]> {
        match self {
            List::Compound(v) => Some(v),
            List::Empty => Some(&[]),
            _ => None,
        }
    }

    pub(crate) fn read_payload<O: ByteOrder>(
        r: &mut impl std::io::Read,
        depth: usize,
    ) -> Result<Self, ErrorKind> {
        if depth > MAX_DEPTH {
            return Err(ErrorKind::InvalidData(format!(
                "list nested deeper than {MAX_DEPTH}"
            )));
        }

        let ty = TagType::read::<O>(r)?;
        let len = read_len::<O>(r)?;

        Ok(match ty {
            TagType::End if len == 0 => List::Empty,
            TagType::End => {
                return Err(ErrorKind::InvalidData(format!(
                    "list of end tags with length {len}"
                )));
            }
            TagType::Byte => List::Byte(read_seq::<O, _>(len, r)?),
            TagType::Short => List::Short(read_seq::<O, _>(len, r)?),
            TagType::Int => List::Int(read_seq::<O, _>(len, r)?),
            TagType::Long => List::Long(read_seq::<O, _>(len, r)?),
            TagType::Float => List::Float(read_seq::<O, _>(len, r)?),
            TagType::Double => List::Double(read_seq::<O, _>(len, r)?),
            TagType::ByteArray => List::ByteArray(read_seq::<O, _>(len, r)?),
            TagType::String => List::String(
                read_seq::<O, NbtString>(len, r)?
                    .into_iter()
                    .map(|s| s.0)
                    .collect(),
            ),
            TagType::IntArray => List::IntArray(read_seq::<O, _>(len, r)?),
            TagType::LongArray => List::LongArray(read_seq::<O, _>(len, r)?),
            TagType::List => {
                let mut o = Vec::with_capacity(len.min(1024));
                for _ in 0..len {
                    o.push(List::read_payload::<O>(r, depth + 1)?);
                }
                List::List(o)
            }
            TagType::Compound => {
                let mut o = Vec::with_capacity(len.min(1024));
                for _ in 0..len {
                    o.push(Compound::read_payload::<O>(r, depth + 1)?);
                }
                List::Compound(o)
            }
        })
    }

    pub(crate) fn write_payload<O: ByteOrder>(
        &self,
        w: &mut impl std::io::Write,
    ) -> Result<(), ErrorKind> {
        self.element_type().write::<O>(w)?;
        write_len::<O>(self.len(), w)?;

        match self {
            List::Empty => Ok(()),
            List::Byte(v) => v.as_slice().write::<O>(w),
            List::Short(v) => v.as_slice().write::<O>(w),
            List::Int(v) => v.as_slice().write::<O>(w),
            List::Long(v) => v.as_slice().write::<O>(w),
            List::Float(v) => v.as_slice().write::<O>(w),
            List::Double(v) => v.as_slice().write::<O>(w),
            List::ByteArray(v) => v.as_slice().write::<O>(w),
            List::String(v) => v.as_slice().write::<O>(w),
            List::IntArray(v) => v.as_slice().write::<O>(w),
            List::LongArray(v) => v.as_slice().write::<O>(w),
            List::List(v) => {
                for list in v {
                    list.write_payload::<O>(w)?;
                }
                Ok(())
            }
            List::Compound(v) => v.as_slice().write::<O>(w),
        }
    }
}
