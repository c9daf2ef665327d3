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
use indexmap::IndexMap;

use crate::{ErrorKind, Read, Write, MAX_DEPTH};

use super::{List, NbtString, Tag, TagType};

/// Named tags in insertion order. Encoding walks entries in that order, so two
/// compounds built the same way always serialize to the same bytes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Compound(IndexMap<String, Tag>);

impl Compound {
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Builder-style insert. Clone first to derive several variants from one base.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Tag>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Tag>) -> Option<Tag> {
        self.0.insert(key.into(), value.into())
    }

    /// Removes `key` while keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Tag> {
        self.0.shift_remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Tag::as_str)
    }

    pub fn get_int(&self, key: &str) -> Option<i32> {
        match self.get(key) {
            Some(Tag::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_compound(&self, key: &str) -> Option<&Compound> {
        self.get(key).and_then(Tag::as_compound)
    }

    pub fn get_list(&self, key: &str) -> Option<&List> {
        self.get(key).and_then(Tag::as_list)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn read_payload<O: ByteOrder>(
        r: &mut impl std::io::Read,
        depth: usize,
    ) -> Result<Self, ErrorKind> {
        if depth > MAX_DEPTH {
            return Err(ErrorKind::InvalidData(format!(
                "compound nested deeper than {MAX_DEPTH}"
            )));
        }

        let mut entries = IndexMap::new();

        loop {
            let ty = TagType::read::<O>(r)?;
            if ty == TagType::End {
                break;
            }

            let NbtString(name) = NbtString::read::<O>(r)?;
            let tag = Tag::read_payload::<O>(ty, r, depth)?;

            if entries.insert(name.clone(), tag).is_some() {
                return Err(ErrorKind::InvalidData(format!(
                    "duplicate key {name} in compound"
                )));
            }
        }

        Ok(Self(entries))
    }
}

impl Read for Compound {
    fn read<O: ByteOrder>(r: &mut impl std::io::Read) -> Result<Self, ErrorKind> {
        Self::read_payload::<O>(r, 0)
    }
}

impl Write for Compound {
    fn write<O: ByteOrder>(&self, w: &mut impl std::io::Write) -> Result<(), ErrorKind> {
        for (name, tag) in &self.0 {
            tag.tag_type().write::<O>(w)?;
            name.write::<O>(w)?;
            tag.write_payload::<O>(w)?;
        }

        TagType::End.write::<O>(w)
    }
}

impl FromIterator<(String, Tag)> for Compound {
    fn from_iter<T: IntoIterator<Item = (String, Tag)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Compound {
    type Item = (String, Tag);
    type IntoIter = indexmap::map::IntoIter<String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
