//! illuminated - flashlight cone lighting probe
//!
//! Runs the flashlight tracker headlessly over a TOML scene and prints the
//! resulting light bounds and slices.

mod config;
mod probe;

use anyhow::Result;
use clap::Parser;
use config::{SceneConfig, DEFAULT_SCENE_PATH};
use illuminated_client::{entity_block_light, FlashlightTracker, LightEvent};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless probe for flashlight cone lights", long_about = None)]
struct Args {
    /// Scene description (TOML)
    #[arg(short, long, default_value = DEFAULT_SCENE_PATH)]
    scene: PathBuf,

    /// Override the number of simulated ticks
    #[arg(long)]
    ticks: Option<u32>,

    /// Override the half-width of the printed light slice
    #[arg(long)]
    slice_radius: Option<i32>,

    /// Fail instead of falling back to the default scene
    #[arg(long)]
    strict: bool,

    /// Write the default scene to the scene path and exit
    #[arg(long)]
    init: bool,
}

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting illuminated v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    if args.init {
        SceneConfig::default().save_to_path(&args.scene)?;
        info!(path = %args.scene.display(), "wrote default scene");
        return Ok(());
    }

    let mut scene = if args.strict {
        SceneConfig::load_from_path_strict(&args.scene)?
    } else {
        SceneConfig::load_from_path(&args.scene)
    };
    if let Some(ticks) = args.ticks {
        scene.ticks = ticks;
    }
    if let Some(radius) = args.slice_radius {
        scene.slice_radius = radius.clamp(0, 32);
    }

    let tracker = run_scene(&mut scene);
    print_report(&tracker, &scene);
    Ok(())
}

/// Drive the tracker through every tick of the scene.
fn run_scene(scene: &mut SceneConfig) -> FlashlightTracker {
    let mut tracker = FlashlightTracker::new();
    let mut events: Vec<LightEvent> = Vec::new();

    for tick in 0..scene.ticks {
        for entity in &mut scene.entities {
            if entity.toggle_at_tick != Some(tick) {
                continue;
            }
            let Some(hands) = entity.hands.as_mut() else {
                continue;
            };
            let stack = match hands.main.as_mut() {
                Some(main) if main.is_flashlight() => Some(main),
                _ => hands.offhand.as_mut(),
            };
            if let Some(outcome) = stack.and_then(|stack| stack.use_flashlight()) {
                info!(
                    tick,
                    entity = entity.id,
                    item = %illuminated_core::id("flashlight"),
                    on = outcome.now_on,
                    sound = outcome.sound,
                    "flashlight toggled"
                );
            }
        }

        let snapshots: Vec<_> = scene.entities.iter().map(|entity| entity.snapshot()).collect();
        let summary = tracker.tick(&snapshots, &mut events);
        info!(
            tick,
            added = summary.added,
            removed = summary.removed,
            refreshed = summary.refreshed,
            active = summary.active,
            "tick complete"
        );
        for event in events.drain(..) {
            match event {
                LightEvent::Relit {
                    id,
                    previous,
                    current,
                } => {
                    let region = previous.union(&current);
                    debug!(
                        tick,
                        entity = id.0,
                        min = ?region.min.to_array(),
                        max = ?region.max.to_array(),
                        "relighting region"
                    );
                }
                event => debug!(tick, ?event, "light event"),
            }
        }

        for entity in &mut scene.entities {
            entity.pose = entity.step.apply(&entity.pose);
        }
    }

    tracker
}

fn print_report(tracker: &FlashlightTracker, scene: &SceneConfig) {
    println!(
        "{} tick(s), {} active light(s)",
        tracker.ticks(),
        tracker.len()
    );
    for entity in &scene.entities {
        println!(
            "entity {}: render block light {}",
            entity.id,
            entity_block_light(entity.hands.as_ref(), 0)
        );
    }
    for (id, light) in tracker.iter() {
        let bounds = light.bounding_box();
        let pose = light.pose();
        println!(
            "light {}: yaw {:.1} pitch {:.1} bounds {:?}..={:?} lit blocks {}",
            id.0,
            pose.yaw,
            pose.pitch,
            bounds.min.to_array(),
            bounds.max.to_array(),
            probe::lit_block_count(light)
        );
        print!("{}", probe::render_slice(light, scene.slice_radius));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use illuminated_client::EntityId;

    #[test]
    fn default_scene_keeps_one_light() {
        let mut scene = SceneConfig::default();
        let tracker = run_scene(&mut scene);
        assert_eq!(tracker.ticks(), 4);
        assert_eq!(tracker.len(), 1);
        let light = tracker.get(EntityId(1)).expect("light");
        // Yaw steps by 15 degrees after each tick; the frame follows the last tick.
        assert!((light.pose().yaw - 45.0).abs() < 1e-9);
    }

    #[test]
    fn toggle_switches_light_off() {
        let mut scene = SceneConfig::default();
        scene.entities[0].toggle_at_tick = Some(2);
        let tracker = run_scene(&mut scene);
        assert!(tracker.is_empty());
        let hands = scene.entities[0].hands.as_ref().expect("hands");
        assert!(!hands.is_holding_powered_flashlight());
    }

    #[test]
    fn args_accept_overrides() {
        let args = Args::parse_from(["illuminated", "--ticks", "9", "--slice-radius", "4"]);
        assert_eq!(args.scene, PathBuf::from(DEFAULT_SCENE_PATH));
        assert_eq!(args.ticks, Some(9));
        assert_eq!(args.slice_radius, Some(4));
        assert!(!args.strict);
        assert!(!args.init);
    }
}
