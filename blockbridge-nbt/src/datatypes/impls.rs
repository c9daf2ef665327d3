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

use byteorder::{ByteOrder, ReadBytesExt, WriteBytesExt};

use crate::{ErrorKind, Read, Write};

impl Read for i8 {
    fn read<O: ByteOrder>(r: &mut impl std::io::Read) -> Result<Self, ErrorKind> {
        Ok(r.read_i8()?)
    }
}

impl Write for i8 {
    fn write<O: ByteOrder>(&self, w: &mut impl std::io::Write) -> Result<(), ErrorKind> {
        Ok(w.write_i8(*self)?)
    }
}

impl Read for u8 {
    fn read<O: ByteOrder>(r: &mut impl std::io::Read) -> Result<Self, ErrorKind> {
        Ok(r.read_u8()?)
    }
}

impl Write for u8 {
    fn write<O: ByteOrder>(&self, w: &mut impl std::io::Write) -> Result<(), ErrorKind> {
        Ok(w.write_u8(*self)?)
    }
}

impl Read for i16 {
    fn read<O: ByteOrder>(r: &mut impl std::io::Read) -> Result<Self, ErrorKind> {
        Ok(r.read_i16::<O>()?)
    }
}

impl Write for i16 {
    fn write<O: ByteOrder>(&self, w: &mut impl std::io::Write) -> Result<(), ErrorKind> {
        Ok(w.write_i16::<O>(*self)?)
    }
}

impl Read for u16 {
    fn read<O: ByteOrder>(r: &mut impl std::io::Read) -> Result<Self, ErrorKind> {
        Ok(r.read_u16::<O>()?)
    }
}

impl Write for u16 {
    fn write<O: ByteOrder>(&self, w: &mut impl std::io::Write) -> Result<(), ErrorKind> {
        Ok(w.write_u16::<O>(*self)?)
    }
}

impl Read for i32 {
    fn read<O: ByteOrder>(r: &mut impl std::io::Read) -> Result<Self, ErrorKind> {
        Ok(r.read_i32::<O>()?)
    }
}

impl Write for i32 {
    fn write<O: ByteOrder>(&self, w: &mut impl std::io::Write) -> Result<(), ErrorKind> {
        Ok(w.write_i32::<O>(*self)?)
    }
}

impl Read for i64 {
    fn read<O: ByteOrder>(r: &mut impl std::io::Read) -> Result<Self, ErrorKind> {
        Ok(r.read_i64::<O>()?)
    }
}

impl Write for i64 {
    fn write<O: ByteOrder>(&self, w: &mut impl std::io::Write) -> Result<(), ErrorKind> {
        Ok(w.write_i64::<O>(*self)?)
    }
}

impl Read for f32 {
    fn read<O: ByteOrder>(r: &mut impl std::io::Read) -> Result<Self, ErrorKind> {
        Ok(r.read_f32::<O>()?)
    }
}

impl Write for f32 {
    fn write<O: ByteOrder>(&self, w: &mut impl std::io::Write) -> Result<(), ErrorKind> {
        Ok(w.write_f32::<O>(*self)?)
    }
}

impl Read for f64 {
    fn read<O: ByteOrder>(r: &mut impl std::io::Read) -> Result<Self, ErrorKind> {
        Ok(r.read_f64::<O>()?)
    }
}

impl Write for f64 {
    fn write<O: ByteOrder>(&self, w: &mut impl std::io::Write) -> Result<(), ErrorKind> {
        Ok(w.write_f64::<O>(*self)?)
    }
}

/// Reads the `i32` length prefix used by arrays and lists.
pub(crate) fn read_len<O: ByteOrder>(r: &mut impl std::io::Read) -> Result<usize, ErrorKind> {
    let len = i32::read::<O>(r)?;
    if len < 0 {
        return Err(ErrorKind::InvalidData(format!(
            "tried to decode sequence with negative length {len}"
        )));
    }

    Ok(len as usize)
}

pub(crate) fn write_len<O: ByteOrder>(
    len: usize,
    w: &mut impl std::io::Write,
) -> Result<(), ErrorKind> {
    let len = i32::try_from(len)
        .map_err(|_| ErrorKind::InvalidData(format!("sequence length {len} exceeds i32")))?;
    len.write::<O>(w)
}

/// Reads `len` elements without trusting `len` for the initial allocation.
pub(crate) fn read_seq<O: ByteOrder, T: Read>(
    len: usize,
    r: &mut impl std::io::Read,
) -> Result<Vec<T>, ErrorKind> {
    let mut o = Vec::with_capacity(len.min(1024));

    for _ in 0..len {
        o.push(T::read::<O>(r)?)
    }

    Ok(o)
}

impl<T> Write for [T]
where
    T: Write,
{
    fn write<O: ByteOrder>(&self, w: &mut impl std::io::Write) -> Result<(), ErrorKind> {
        for item in self {
            item.write::<O>(w)?;
        }

        Ok(())
    }
}

impl<T> Read for Vec<T>
where
    T: Read,
{
    fn read<O: ByteOrder>(r: &mut impl std::io::Read) -> Result<Self, ErrorKind> {
        let len = read_len::<O>(r)?;
        read_seq::<O, T>(len, r)
    }
}

impl<T> Write for Vec<T>
where
    T: Write,
{
    fn write<O: ByteOrder>(&self, w: &mut impl std::io::Write) -> Result<(), ErrorKind> {
        write_len::<O>(self.len(), w)?;
        self.as_slice().write::<O>(w)
    }
}
