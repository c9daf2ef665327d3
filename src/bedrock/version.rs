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

use super::descriptor::{BlockStateDescriptor, States};

/// Corrections applied to a Bedrock block state before it is matched against a
/// palette, for protocols whose palette shape differs from the mapping data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteQuirk {
    None,
    /// 1.19.0 palettes dropped the axis of muddy mangrove roots.
    MuddyMangroveRootsAxis,
}

impl PaletteQuirk {
    /// Adjusts `states` in place, returning a replacement identifier if the
    /// block itself was renamed.
    pub fn apply(self, identifier: &str, states: &mut States) -> Option<String> {
        match self {
            PaletteQuirk::None => None,
            PaletteQuirk::MuddyMangroveRootsAxis => {
                if identifier == "minecraft:muddy_mangrove_roots" {
                    states.remove("pillar_axis");
                }
                None
            }
        }
    }

    pub fn descriptor(
        self,
        identifier: &str,
        version: i32,
        mut states: States,
    ) -> BlockStateDescriptor {
        match self.apply(identifier, &mut states) {
            Some(renamed) => BlockStateDescriptor::new(renamed, version, states),
            None => BlockStateDescriptor::new(identifier, version, states),
        }
    }
}

/// A Bedrock protocol version this proxy can serve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BedrockVersion {
    /// Suffix of the palette resource, shared by protocols with one palette.
    pub palette: &'static str,
    pub protocol: i32,
    pub quirk: PaletteQuirk,
    /// Palette entry fields that carry no identity and are dropped on load.
    pub transient_fields: &'static [&'static str],
}

/// First protocol that names the collision component `minecraft:collision_box`.
const COLLISION_BOX_PROTOCOL: i32 = 534;

impl BedrockVersion {
    pub fn collision_component(&self) -> &'static str {
        if self.protocol >= COLLISION_BOX_PROTOCOL {
            "minecraft:collision_box"
        } else {
            "minecraft:block_collision"
        }
    }

    pub fn find(protocol: i32) -> Option<&'static BedrockVersion> {
        SUPPORTED_VERSIONS.iter().find(|v| v.protocol == protocol)
    }
}

pub const SUPPORTED_VERSIONS: &[BedrockVersion] = &[
    BedrockVersion {
        palette: "1_19_0",
        protocol: 527,
        quirk: PaletteQuirk::MuddyMangroveRootsAxis,
        transient_fields: &[],
    },
    BedrockVersion {
        palette: "1_19_0",
        protocol: 534,
        quirk: PaletteQuirk::None,
        transient_fields: &[],
    },
    // Palette is unchanged from 1.19.0 apart from name hashes, but the custom
    // block format is not.
    BedrockVersion {
        palette: "1_19_20",
        protocol: 544,
        quirk: PaletteQuirk::None,
        transient_fields: &["name_hash"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bedrock::descriptor::StateValue;

    #[test]
    fn muddy_roots_lose_axis_only_on_527() {
        let mut states = States::new();
        states.insert("pillar_axis".into(), StateValue::from("y"));

        let v527 = BedrockVersion::find(527).unwrap();
        let v534 = BedrockVersion::find(534).unwrap();

        let patched = v527
            .quirk
            .descriptor("minecraft:muddy_mangrove_roots", 1, states.clone());
        assert!(patched.states().is_empty());

        let untouched = v534
            .quirk
            .descriptor("minecraft:muddy_mangrove_roots", 1, states.clone());
        assert_eq!(untouched.states(), &states);

        let other = v527.quirk.descriptor("minecraft:oak_log", 1, states.clone());
        assert_eq!(other.states(), &states);
    }

    #[test]
    fn collision_component_follows_protocol() {
        assert_eq!(
            BedrockVersion::find(527).unwrap().collision_component(),
            "minecraft:block_collision"
        );
        assert_eq!(
            BedrockVersion::find(534).unwrap().collision_component(),
            "minecraft:collision_box"
        );
        assert_eq!(
            BedrockVersion::find(544).unwrap().collision_component(),
            "minecraft:collision_box"
        );
    }

    #[test]
    fn unknown_protocol() {
        assert!(BedrockVersion::find(1).is_none());
    }
}
