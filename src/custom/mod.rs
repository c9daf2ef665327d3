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

//! Non-vanilla blocks contributed by embedding code.
//!
//! A [`CustomBlockDefinition`] declares typed properties; every combination of
//! their values becomes one [`CustomBlockState`] and one palette entry.

pub mod expander;
pub mod registration;

use std::{
    hash::{Hash, Hasher},
    sync::Arc,
};

use indexmap::IndexMap;

use crate::{bedrock::descriptor::StateValue, error::RegistrationError};

pub use registration::{CustomBlockProvider, CustomBlockRegistrar, CustomBlocks};

pub const CUSTOM_NAMESPACE: &str = "blockbridge_custom";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyType {
    Boolean,
    Integer,
    String,
}

/// Allowed values of a property, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyValues {
    /// Always `[false, true]`.
    Boolean,
    Integer(Vec<i32>),
    String(Vec<String>),
}

impl PropertyValues {
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValues::Boolean => PropertyType::Boolean,
            PropertyValues::Integer(_) => PropertyType::Integer,
            PropertyValues::String(_) => PropertyType::String,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PropertyValues::Boolean => 2,
            PropertyValues::Integer(v) => v.len(),
            PropertyValues::String(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<StateValue> {
        match self {
            PropertyValues::Boolean => match index {
                0 => Some(StateValue::Bool(false)),
                1 => Some(StateValue::Bool(true)),
                _ => None,
            },
            PropertyValues::Integer(v) => v.get(index).copied().map(StateValue::Int),
            PropertyValues::String(v) => v.get(index).cloned().map(StateValue::String),
        }
    }

    pub fn contains(&self, value: &StateValue) -> bool {
        match (self, value) {
            (PropertyValues::Boolean, StateValue::Bool(_)) => true,
            (PropertyValues::Integer(v), StateValue::Int(i)) => v.contains(i),
            (PropertyValues::String(v), StateValue::String(s)) => v.contains(s),
            _ => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomBlockProperty {
    name: String,
    values: PropertyValues,
}

impl CustomBlockProperty {
    pub fn boolean(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: PropertyValues::Boolean,
        }
    }

    pub fn integer(name: impl Into<String>, values: Vec<i32>) -> Self {
        Self {
            name: name.into(),
            values: PropertyValues::Integer(values),
        }
    }

    pub fn string(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values: PropertyValues::String(values),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &PropertyValues {
        &self.values
    }
}

/// Axis-aligned box in model units, origin relative to the block centre.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoxComponent {
    pub origin_x: f32,
    pub origin_y: f32,
    pub origin_z: f32,
    pub size_x: f32,
    pub size_y: f32,
    pub size_z: f32,
}

impl BoxComponent {
    /// The full 16x16x16 block.
    pub const FULL: Self = Self {
        origin_x: -8.0,
        origin_y: 0.0,
        origin_z: -8.0,
        size_x: 16.0,
        size_y: 16.0,
        size_z: 16.0,
    };

    pub const EMPTY: Self = Self {
        origin_x: 0.0,
        origin_y: 0.0,
        origin_z: 0.0,
        size_x: 0.0,
        size_y: 0.0,
        size_z: 0.0,
    };

    pub fn is_empty(&self) -> bool {
        self.size_x == 0.0 && self.size_y == 0.0 && self.size_z == 0.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialInstance {
    pub texture: String,
    pub render_method: String,
    pub face_dimming: bool,
    pub ambient_occlusion: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Appearance and physics of a custom block or one of its permutations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CustomBlockComponents {
    pub selection_box: Option<BoxComponent>,
    pub collision_box: Option<BoxComponent>,
    pub geometry: Option<String>,
    /// Keyed by face (`*`, `up`, `north`, ...).
    pub material_instances: IndexMap<String, MaterialInstance>,
    pub destroy_time: Option<f32>,
    pub friction: Option<f32>,
    /// Java-style light level, 0 to 15.
    pub light_emission: Option<u8>,
    pub light_dampening: Option<u8>,
    pub rotation: Option<Rotation>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CustomBlockPermutation {
    /// Molang expression selecting the states these components apply to.
    pub condition: String,
    pub components: CustomBlockComponents,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CustomBlockDefinition {
    name: String,
    properties: IndexMap<String, CustomBlockProperty>,
    components: Option<CustomBlockComponents>,
    permutations: Vec<CustomBlockPermutation>,
    total_permutations: usize,
}

impl CustomBlockDefinition {
    pub fn builder(name: impl Into<String>) -> CustomBlockDefinitionBuilder {
        CustomBlockDefinitionBuilder {
            name: name.into(),
            properties: Vec::new(),
            components: None,
            permutations: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespaced identifier used in the Bedrock palette.
    pub fn identifier(&self) -> String {
        format!("{CUSTOM_NAMESPACE}:{}", self.name)
    }

    /// Properties in declaration order, which also fixes state order.
    pub fn properties(&self) -> impl Iterator<Item = &CustomBlockProperty> {
        self.properties.values()
    }

    pub fn property(&self, name: &str) -> Option<&CustomBlockProperty> {
        self.properties.get(name)
    }

    pub fn components(&self) -> Option<&CustomBlockComponents> {
        self.components.as_ref()
    }

    pub fn permutations(&self) -> &[CustomBlockPermutation] {
        &self.permutations
    }

    /// Number of concrete states, fixed when the definition is built.
    pub fn total_permutations(&self) -> usize {
        self.total_permutations
    }
}

#[derive(Debug)]
pub struct CustomBlockDefinitionBuilder {
    name: String,
    properties: Vec<CustomBlockProperty>,
    components: Option<CustomBlockComponents>,
    permutations: Vec<CustomBlockPermutation>,
}

impl CustomBlockDefinitionBuilder {
    #[must_use]
    pub fn property(mut self, property: CustomBlockProperty) -> Self {
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn components(mut self, components: CustomBlockComponents) -> Self {
        self.components = Some(components);
        self
    }

    #[must_use]
    pub fn permutation(
        mut self,
        condition: impl Into<String>,
        components: CustomBlockComponents,
    ) -> Self {
        self.permutations.push(CustomBlockPermutation {
            condition: condition.into(),
            components,
        });
        self
    }

    pub fn build(self) -> Result<CustomBlockDefinition, RegistrationError> {
        let mut properties = IndexMap::with_capacity(self.properties.len());

        for property in self.properties {
            if property.values.is_empty() {
                return Err(RegistrationError::EmptyProperty {
                    block: self.name,
                    property: property.name,
                });
            }

            if properties.contains_key(&property.name) {
                return Err(RegistrationError::DuplicateProperty {
                    block: self.name,
                    property: property.name,
                });
            }

            properties.insert(property.name.clone(), property);
        }

        // every state needs a u32 runtime ID
        let total_permutations = properties
            .values()
            .try_fold(1usize, |total, property| {
                total.checked_mul(property.values.len())
            })
            .filter(|total| u32::try_from(*total).is_ok());
        let Some(total_permutations) = total_permutations else {
            return Err(RegistrationError::TooManyPermutations { block: self.name });
        };

        Ok(CustomBlockDefinition {
            name: self.name,
            properties,
            components: self.components,
            permutations: self.permutations,
            total_permutations,
        })
    }
}

/// One concrete state of a custom block.
///
/// Two states are equal when they belong to the same block (names are unique
/// once registered) and assign the same values.
#[derive(Clone, Debug)]
pub struct CustomBlockState {
    block: Arc<CustomBlockDefinition>,
    properties: Vec<(String, StateValue)>,
}

impl CustomBlockState {
    pub fn builder(block: &Arc<CustomBlockDefinition>) -> CustomBlockStateBuilder {
        CustomBlockStateBuilder {
            block: block.clone(),
            values: Vec::new(),
        }
    }

    /// Assignment must follow the block's declaration order.
    pub(crate) fn new(
        block: Arc<CustomBlockDefinition>,
        properties: Vec<(String, StateValue)>,
    ) -> Self {
        Self { block, properties }
    }

    pub fn block(&self) -> &Arc<CustomBlockDefinition> {
        &self.block
    }

    pub fn name(&self) -> &str {
        self.block.name()
    }

    pub fn properties(&self) -> &[(String, StateValue)] {
        &self.properties
    }

    pub fn get(&self, property: &str) -> Option<&StateValue> {
        self.properties
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value)
    }
}

impl PartialEq for CustomBlockState {
    fn eq(&self, other: &Self) -> bool {
        self.block.name == other.block.name && self.properties == other.properties
    }
}

impl Eq for CustomBlockState {}

impl Hash for CustomBlockState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.block.name.hash(state);
        self.properties.hash(state);
    }
}

#[derive(Debug)]
pub struct CustomBlockStateBuilder {
    block: Arc<CustomBlockDefinition>,
    values: Vec<(String, StateValue)>,
}

impl CustomBlockStateBuilder {
    #[must_use]
    pub fn with(mut self, property: impl Into<String>, value: impl Into<StateValue>) -> Self {
        self.values.push((property.into(), value.into()));
        self
    }

    /// Unset properties take their first declared value.
    pub fn build(self) -> Result<CustomBlockState, RegistrationError> {
        for (property, value) in &self.values {
            let Some(declared) = self.block.property(property) else {
                return Err(RegistrationError::UnknownProperty {
                    block: self.block.name.clone(),
                    property: property.clone(),
                });
            };

            if !declared.values.contains(value) {
                return Err(RegistrationError::InvalidPropertyValue {
                    block: self.block.name.clone(),
                    property: property.clone(),
                    value: value.to_string(),
                });
            }
        }

        let properties = self
            .block
            .properties()
            .filter_map(|declared| {
                let value = self
                    .values
                    .iter()
                    .rev()
                    .find(|(name, _)| *name == declared.name)
                    .map(|(_, value)| value.clone())
                    .or_else(|| declared.values.get(0))?;
                Some((declared.name.clone(), value))
            })
            .collect();

        Ok(CustomBlockState::new(self.block, properties))
    }
}
