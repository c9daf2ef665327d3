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

use crate::{
    ErrorKind::{self, InvalidData},
    Read, Write,
};

/// A tag name or string payload: `u16` byte length followed by UTF-8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NbtString(pub String);

impl Read for NbtString {
    fn read<O: ByteOrder>(r: &mut impl std::io::Read) -> Result<Self, ErrorKind> {
        let len = u16::read::<O>(r)? as usize;

        let mut buf = vec![0; len];
        r.read_exact(&mut buf)?;
        let content =
            String::from_utf8(buf).map_err(|_| InvalidData("invalid utf8 string data".into()))?;

        Ok(NbtString(content))
    }
}

impl Write for NbtString {
    fn write<O: ByteOrder>(&self, w: &mut impl std::io::Write) -> Result<(), ErrorKind> {
        self.0.as_str().write::<O>(w)
    }
}

impl Write for str {
    fn write<O: ByteOrder>(&self, w: &mut impl std::io::Write) -> Result<(), ErrorKind> {
        let len = u16::try_from(self.len()).map_err(|_| {
            InvalidData(format!(
                "length of string {} exceeds bound {}",
                self.len(),
                u16::MAX
            ))
        })?;

        len.write::<O>(w)?;
        Ok(w.write_all(self.as_bytes())?)
    }
}

impl Write for String {
    fn write<O: ByteOrder>(&self, w: &mut impl std::io::Write) -> Result<(), ErrorKind> {
        self.as_str().write::<O>(w)
    }
}
