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

use blockbridge::{BlockRegistries, DirectoryResources};
use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[macro_use]
extern crate tracing;

mod args;

fn main() -> Result<()> {
    color_eyre::install()?;

    // RUST_LOG=blockbridge=trace
    match cfg!(debug_assertions) {
        true => {
            let filter = EnvFilter::from_default_env();
            let fmt = tracing_subscriber::fmt::layer().pretty();
            tracing_subscriber::registry().with(filter).with(fmt).init();
        }
        false => tracing_subscriber::fmt::init(),
    }

    let args = args::Args::parse();
    let options = args.load_options();
    let resources = DirectoryResources::new(&args.resource_dir);

    let registries = BlockRegistries::load(&resources, &options, &[])?;

    info!(
        "Loaded {} Java block states from {}",
        registries.java().len(),
        args.resource_dir
    );

    for mapping in registries.mappings() {
        let sentinels = mapping.sentinels();
        info!(
            "Protocol {}: {} Bedrock states, state version {}, {} custom states, air {}, water {}",
            mapping.protocol(),
            mapping.palette().len(),
            mapping.block_state_version(),
            mapping.custom_block_state_ids().len(),
            sentinels.air,
            sentinels.water,
        );
    }

    Ok(())
}
