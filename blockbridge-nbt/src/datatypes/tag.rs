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

use crate::{ErrorKind, Read, Write};

use super::{Compound, List, NbtString};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TagType {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

impl TryFrom<u8> for TagType {
    type Error = ErrorKind;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => TagType::End,
            1 => TagType::Byte,
            2 => TagType::Short,
            3 => TagType::Int,
            4 => TagType::Long,
            5 => TagType::Float,
            6 => TagType::Double,
            7 => TagType::ByteArray,
            8 => TagType::String,
            9 => TagType::List,
            10 => TagType::Compound,
            11 => TagType::IntArray,
            12 => TagType::LongArray,
            v => return Err(ErrorKind::InvalidData(format!("unknown tag type {v}"))),
        })
    }
}

impl Read for TagType {
    fn read<O: ByteOrder>(r: &mut impl std::io::Read) -> Result<Self, ErrorKind> {
        TagType::try_from(u8::read::<O>(r)?)
    }
}

impl Write for TagType {
    fn write<O: ByteOrder>(&self, w: &mut impl std::io::Write) -> Result<(), ErrorKind> {
        (*self as u8).write::<O>(w)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Tag {
    pub fn tag_type(&self) -> TagType {
        match self {
            Tag::Byte(_) => TagType::Byte,
            Tag::Short(_) => TagType::Short,
            Tag::Int(_) => TagType::Int,
            Tag::Long(_) => TagType::Long,
            Tag::Float(_) => TagType::Float,
            Tag::Double(_) => TagType::Double,
            Tag::ByteArray(_) => TagType::ByteArray,
            Tag::String(_) => TagType::String,
            Tag::List(_) => TagType::List,
            Tag::Compound(_) => TagType::Compound,
            Tag::IntArray(_) => TagType::IntArray,
            Tag::LongArray(_) => TagType::LongArray,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tag::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Tag::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Tag::List(l) => Some(l),
            _ => None,
        }
    }

    pub(crate) fn read_payload<O: ByteOrder>(
        ty: TagType,
        r: &mut impl std::io::Read,
        depth: usize,
    ) -> Result<Self, ErrorKind> {
        Ok(match ty {
            TagType::End => {
                return Err(ErrorKind::InvalidData(
                    "end tag has no payload".to_string(),
                ));
            }
            TagType::Byte => Tag::Byte(i8::read::<O>(r)?),
            TagType::Short => Tag::Short(i16::read::<O>(r)?),
            TagType::Int => Tag::Int(i32::read::<O>(r)?),
            TagType::Long => Tag::Long(i64::read::<O>(r)?),
            TagType::Float => Tag::Float(f32::read::<O>(r)?),
            TagType::Double => Tag::Double(f64::read::<O>(r)?),
            TagType::ByteArray => Tag::ByteArray(Vec::<i8>::read::<O>(r)?),
            TagType::String => Tag::String(NbtString::read::<O>(r)?.0),
            TagType::List => Tag::List(List::read_payload::<O>(r, depth + 1)?),
            TagType::Compound => Tag::Compound(Compound::read_payload::<O>(r, depth + 1)?),
            TagType::IntArray => Tag::IntArray(Vec::<i32>::read::<O>(r)?),
            TagType::LongArray => Tag::LongArray(Vec::<i64>::read::<O>(r)?),
        })
    }

    pub(crate) fn write_payload<O: ByteOrder>(
        &self,
        w: &mut impl std::io::Write,
    ) -> Result<(), ErrorKind> {
        match self {
            Tag::Byte(v) => v.write::<O>(w),
            Tag::Short(v) => v.write::<O>(w),
            Tag::Int(v) => v.write::<O>(w),
            Tag::Long(v) => v.write::<O>(w),
            Tag::Float(v) => v.write::<O>(w),
            Tag::Double(v) => v.write::<O>(w),
            Tag::ByteArray(v) => v.write::<O>(w),
            Tag::String(v) => v.write::<O>(w),
            Tag::List(v) => v.write_payload::<O>(w),
            Tag::Compound(v) => v.write::<O>(w),
            Tag::IntArray(v) => v.write::<O>(w),
            Tag::LongArray(v) => v.write::<O>(w),
        }
    }
}

macro_rules! tag_from {
    ($type: ty, $variant: ident) => {
        impl From<$type> for Tag {
            fn from(value: $type) -> Self {
                Tag::$variant(value)
            }
        }
    };
}

tag_from!(i8, Byte);
tag_from!(i16, Short);
tag_from!(i32, Int);
tag_from!(i64, Long);
tag_from!(f32, Float);
tag_from!(f64, Double);
tag_from!(String, String);
tag_from!(List, List);
tag_from!(Compound, Compound);

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Tag::String(value.to_owned())
    }
}

/// Booleans have no tag of their own and are stored as a byte.
impl From<bool> for Tag {
    fn from(value: bool) -> Self {
        Tag::Byte(value as i8)
    }
}
