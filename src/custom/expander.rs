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

use std::sync::Arc;

use blockbridge_nbt::datatypes::{Compound, List, Tag};

use crate::bedrock::{
    descriptor::{BlockStateDescriptor, StateValue, States},
    version::BedrockVersion,
};

use super::{
    BoxComponent, CustomBlockComponents, CustomBlockDefinition, CustomBlockState, PropertyValues,
};

/// Property schema sent to the client so it can register a custom block.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockPropertyData {
    pub name: String,
    pub properties: Compound,
}

/// Assignment for permutation `index`, read as a mixed-radix number whose
/// first digit is the first declared property.
pub fn permutation(block: &CustomBlockDefinition, index: usize) -> Vec<(String, StateValue)> {
    let mut remaining = index;
    block
        .properties()
        .filter_map(|property| {
            let radix = property.values().len();
            let value = property.values().get(remaining % radix)?;
            remaining /= radix;
            Some((property.name().to_owned(), value))
        })
        .collect()
}

/// Every state of `block` in permutation order, paired with its palette entry.
pub fn expand_states(
    block: &Arc<CustomBlockDefinition>,
    state_version: i32,
) -> Vec<(BlockStateDescriptor, CustomBlockState)> {
    let identifier = block.identifier();

    (0..block.total_permutations())
        .map(|index| {
            let assignment = permutation(block, index);
            let states = assignment.iter().cloned().collect::<States>();
            (
                BlockStateDescriptor::new(identifier.as_str(), state_version, states),
                CustomBlockState::new(block.clone(), assignment),
            )
        })
        .collect()
}

pub fn block_property_data(
    block: &CustomBlockDefinition,
    version: &BedrockVersion,
) -> BlockPropertyData {
    let permutations = block
        .permutations()
        .iter()
        .map(|p| {
            Compound::new()
                .with("components", convert_components(Some(&p.components), version))
                .with("condition", p.condition.as_str())
        })
        .collect::<Vec<_>>();

    let properties = block
        .properties()
        .map(|property| {
            let values = match property.values() {
                PropertyValues::Boolean => List::Byte(vec![0, 1]),
                PropertyValues::Integer(v) => List::Int(v.clone()),
                PropertyValues::String(v) => List::String(v.clone()),
            };
            Compound::new()
                .with("name", property.name())
                .with("enum", values)
        })
        .collect::<Vec<_>>();

    BlockPropertyData {
        name: block.identifier(),
        properties: Compound::new()
            .with("components", convert_components(block.components(), version))
            .with("molangVersion", 0)
            .with("permutations", List::Compound(permutations))
            .with("properties", List::Compound(properties)),
    }
}

fn convert_components(
    components: Option<&CustomBlockComponents>,
    version: &BedrockVersion,
) -> Compound {
    let Some(components) = components else {
        return Compound::new();
    };

    let mut tag = Compound::new();

    if let Some(selection) = &components.selection_box {
        tag.insert("minecraft:aim_collision", convert_box(selection));
    }
    if let Some(collision) = &components.collision_box {
        tag.insert(version.collision_component(), convert_box(collision));
    }
    if let Some(geometry) = &components.geometry {
        tag.insert(
            "minecraft:geometry",
            Compound::new().with("value", geometry.as_str()),
        );
    }
    if !components.material_instances.is_empty() {
        let materials = components
            .material_instances
            .iter()
            .map(|(face, material)| {
                let instance = Compound::new()
                    .with("texture", material.texture.as_str())
                    .with("render_method", material.render_method.as_str())
                    .with("face_dimming", material.face_dimming)
                    .with("ambient_occlusion", material.ambient_occlusion);
                (face.clone(), Tag::from(instance))
            })
            .collect::<Compound>();

        tag.insert(
            "minecraft:material_instances",
            Compound::new()
                .with("mappings", Compound::new())
                .with("materials", materials),
        );
    }
    if let Some(destroy_time) = components.destroy_time {
        tag.insert(
            "minecraft:destroy_time",
            Compound::new().with("value", destroy_time),
        );
    }
    if let Some(friction) = components.friction {
        tag.insert("minecraft:friction", Compound::new().with("value", friction));
    }
    if let Some(emission) = components.light_emission {
        tag.insert(
            "minecraft:block_light_emission",
            Compound::new().with("value", f32::from(emission) / 15.0),
        );
    }
    if let Some(dampening) = components.light_dampening {
        tag.insert(
            "minecraft:block_light_filter",
            Compound::new().with("value", dampening as i8),
        );
    }
    if let Some(rotation) = &components.rotation {
        tag.insert(
            "minecraft:rotation",
            Compound::new()
                .with("x", rotation.x)
                .with("y", rotation.y)
                .with("z", rotation.z),
        );
    }

    tag
}

fn convert_box(component: &BoxComponent) -> Compound {
    Compound::new()
        .with("enabled", !component.is_empty())
        .with(
            "origin",
            List::Float(vec![component.origin_x, component.origin_y, component.origin_z]),
        )
        .with(
            "size",
            List::Float(vec![component.size_x, component.size_y, component.size_z]),
        )
}
