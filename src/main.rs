//! # Dungeon Ed Entry Point
//!
//! Dungeon Ed is a room-node graph authoring tool: it maintains the
//! directed graph of rooms and corridors that later drives procedural
//! dungeon layout generation. This binary runs a small headless authoring
//! session: load a room-type catalog (a JSON file path may be passed as
//! the first argument), script a few edits through the intent API, and
//! print the resulting scene as JSON for inspection.
//!
//! ## License
//! Licensed under the MIT License.

use std::error::Error;
use std::sync::Arc;

use log::{info, warn};
use parking_lot::RwLock;

use dungeon_ed::catalog::{CatalogError, RoomTypeCatalog, RoomTypeDescriptor};
use dungeon_ed::graph::RoomGraph;
use dungeon_ed::render::Scene;
use dungeon_ed::session::{EditSession, Intent};
use dungeon_ed::utils::geometry::Point2D;

/// The catalog used when no JSON file is supplied.
fn default_catalog() -> Result<RoomTypeCatalog, CatalogError> {
    let descriptor = |name: &str| RoomTypeDescriptor {
        name: name.to_string(),
        is_entrance: false,
        is_corridor: false,
        is_boss_room: false,
        is_none: false,
        displayable: true,
    };
    RoomTypeCatalog::new(vec![
        RoomTypeDescriptor {
            is_none: true,
            displayable: false,
            ..descriptor("None")
        },
        RoomTypeDescriptor {
            is_entrance: true,
            displayable: false,
            ..descriptor("Entrance")
        },
        RoomTypeDescriptor {
            is_corridor: true,
            displayable: false,
            ..descriptor("Corridor")
        },
        descriptor("Small Room"),
        RoomTypeDescriptor {
            is_boss_room: true,
            ..descriptor("Boss Room")
        },
    ])
}

fn load_catalog() -> Result<RoomTypeCatalog, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!("loading room type catalog from {path}");
            let json = std::fs::read_to_string(&path)?;
            Ok(RoomTypeCatalog::from_json(&json)?)
        }
        None => Ok(default_catalog()?),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    info!("dungeon_ed starting...");

    let catalog = Arc::new(load_catalog()?);
    let entrance = catalog.entrance_type();
    let corridor = catalog
        .find("Corridor")
        .ok_or("catalog has no corridor type for the demo")?;
    let room = catalog
        .find("Small Room")
        .ok_or("catalog has no room type for the demo")?;
    let boss = catalog
        .find("Boss Room")
        .ok_or("catalog has no boss type for the demo")?;

    let graph = Arc::new(RwLock::new(RoomGraph::new(catalog)));
    let mut session = EditSession::new(Arc::clone(&graph));

    // A small authoring pass: entrance → corridor → room → corridor → boss.
    let a = session
        .create_node(Point2D::new(0.0, 0.0), entrance)
        .ok_or("failed to create entrance node")?;
    let b = session
        .create_node(Point2D::new(220.0, 0.0), corridor)
        .ok_or("failed to create corridor node")?;
    let c = session
        .create_node(Point2D::new(440.0, 0.0), room)
        .ok_or("failed to create room node")?;
    let d = session
        .create_node(Point2D::new(440.0, 140.0), corridor)
        .ok_or("failed to create corridor node")?;
    let e = session
        .create_node(Point2D::new(660.0, 140.0), boss)
        .ok_or("failed to create boss node")?;

    for (from, to) in [(a, b), (b, c), (c, d), (d, e)] {
        session.apply(Intent::RequestLink { from, to });
    }

    // A link the validator must refuse: entrance straight into the room.
    session.apply(Intent::RequestLink { from: a, to: c });
    if let Some(reason) = session.last_error.take() {
        warn!("rejected edit: {reason}");
    }

    session.apply(Intent::Select { id: c });
    session.apply(Intent::Select { id: d });

    let scene = {
        let graph = graph.read();
        Scene::capture(&graph, &session)
    };
    println!("{}", serde_json::to_string_pretty(&scene)?);

    info!("dungeon_ed exiting.");
    Ok(())
}
