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

use std::{collections::BTreeMap, fmt::Display};

use blockbridge_nbt::{
    datatypes::{Compound, Tag},
    ErrorKind, LittleEndian,
};
use serde::Deserialize;
use thiserror::Error;

/// Value of a single block state property.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    Bool(bool),
    Int(i32),
    String(String),
}

impl StateValue {
    pub fn to_tag(&self) -> Tag {
        match self {
            StateValue::Bool(v) => Tag::from(*v),
            StateValue::Int(v) => Tag::Int(*v),
            StateValue::String(v) => Tag::String(v.clone()),
        }
    }

    /// Bytes other than 0 and 1 have no boolean meaning and are rejected.
    pub fn from_tag(tag: &Tag) -> Option<Self> {
        match tag {
            Tag::Byte(0) => Some(StateValue::Bool(false)),
            Tag::Byte(1) => Some(StateValue::Bool(true)),
            Tag::Int(v) => Some(StateValue::Int(*v)),
            Tag::String(v) => Some(StateValue::String(v.clone())),
            _ => None,
        }
    }
}

impl From<bool> for StateValue {
    fn from(value: bool) -> Self {
        StateValue::Bool(value)
    }
}

impl From<i32> for StateValue {
    fn from(value: i32) -> Self {
        StateValue::Int(value)
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        StateValue::String(value.to_owned())
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        StateValue::String(value)
    }
}

impl Display for StateValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateValue::Bool(v) => write!(f, "{v}"),
            StateValue::Int(v) => write!(f, "{v}"),
            StateValue::String(v) => write!(f, "\"{v}\""),
        }
    }
}

/// Properties keyed by name. Kept sorted, which is also the order the target
/// protocol writes them in, so the encoded form is canonical.
pub type States = BTreeMap<String, StateValue>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("missing or mistyped field `{0}`")]
    MissingField(&'static str),
    #[error("unsupported value for state `{0}`")]
    UnsupportedState(String),
    #[error("unexpected field `{0}`")]
    UnexpectedField(String),
}

/// One entry of a Bedrock block palette: `{name, states, version}`.
///
/// Equality and hashing cover every field, and the compound form is
/// canonical, so two descriptors are equal exactly when they encode to the
/// same bytes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockStateDescriptor {
    name: String,
    version: i32,
    states: States,
}

impl BlockStateDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, version: i32, states: States) -> Self {
        Self {
            name: name.into(),
            version,
            states,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn states(&self) -> &States {
        &self.states
    }

    pub fn to_compound(&self) -> Compound {
        let states = self
            .states
            .iter()
            .map(|(k, v)| (k.clone(), v.to_tag()))
            .collect::<Compound>();

        Compound::new()
            .with("name", self.name.as_str())
            .with("states", states)
            .with("version", self.version)
    }

    /// Encodes as an unnamed little-endian root compound.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ErrorKind> {
        blockbridge_nbt::to_bytes::<LittleEndian>("", &self.to_compound())
    }

    /// Reads a palette entry, dropping any of `transient` fields. Every other
    /// field besides `name`, `states` and `version` is an error.
    pub fn from_compound(tag: &Compound, transient: &[&str]) -> Result<Self, DescriptorError> {
        let name = tag
            .get_str("name")
            .ok_or(DescriptorError::MissingField("name"))?;
        let version = tag
            .get_int("version")
            .ok_or(DescriptorError::MissingField("version"))?;
        let raw_states = tag
            .get_compound("states")
            .ok_or(DescriptorError::MissingField("states"))?;

        if let Some(unexpected) = tag
            .keys()
            .find(|k| !matches!(*k, "name" | "states" | "version") && !transient.contains(k))
        {
            return Err(DescriptorError::UnexpectedField(unexpected.to_owned()));
        }

        let mut states = States::new();
        for (key, value) in raw_states.iter() {
            let value = StateValue::from_tag(value)
                .ok_or_else(|| DescriptorError::UnsupportedState(key.to_owned()))?;
            states.insert(key.to_owned(), value);
        }

        Ok(Self::new(name, version, states))
    }
}

impl Display for BlockStateDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[", self.name)?;
        for (i, (k, v)) in self.states.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{k}={v}")?;
        }
        write!(f, "]@{}", self.version)
    }
}
