//! Ember Runtime
//!
//! Builds a world, spawns a scene of moving entities and steps it for a
//! fixed number of frames.
//!
//! Usage: `ember [settings.json]`

mod settings;
mod systems;

use anyhow::Result;
use ember_core::glam::Vec3;
use ember_core::time::FrameClock;
use ember_core::World;
use ember_metrics::{time_scope, FrameTimer, SystemProfiler};
use settings::Settings;
use std::path::PathBuf;
use systems::{DragSystem, MovementSystem, Position, Velocity};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("Ember v{}", ember_core::VERSION);

    let settings = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Settings::load(&path)?,
        None => {
            tracing::info!("No settings file given, using defaults");
            Settings::default()
        }
    };
    tracing::debug!(?settings, "settings loaded");

    let mut world = World::with_config(settings.world.clone());
    world.add_system(DragSystem {
        drag: settings.simulation.drag,
    });
    world.register_system::<MovementSystem>();

    let mut setup = SystemProfiler::new();
    let spawned = time_scope!(setup, "spawn_scene", {
        spawn_scene(&mut world, settings.simulation.scene_size)
    });
    spawned?;
    tracing::info!(
        entities = world.active_entities().len(),
        spawn_ms = setup.total("spawn_scene").as_secs_f64() * 1000.0,
        "Scene ready"
    );

    run(&mut world, &settings)?;

    for (name, count) in world.counters().iter() {
        tracing::info!(counter = name, count, "Counter");
    }
    tracing::info!("Shutdown complete");
    Ok(())
}

/// Spawn `count` entities fanned out on a circle, each moving outward.
fn spawn_scene(world: &mut World, count: usize) -> Result<()> {
    for i in 0..count {
        let angle = i as f32 / count.max(1) as f32 * std::f32::consts::TAU;
        let direction = Vec3::new(angle.cos(), angle.sin(), 0.0);
        let entity = world.spawn((Position(direction), Velocity(direction * 2.0)))?;
        world.add_entity(entity)?;
    }
    Ok(())
}

fn run(world: &mut World, settings: &Settings) -> Result<()> {
    let sim = &settings.simulation;
    let mut clock = FrameClock::new();
    let mut frames = FrameTimer::new(120);

    for frame in 1..=sim.frames {
        frames.begin();
        let delta = clock.tick();
        world.update(delta)?;
        frames.end();

        if sim.report_every > 0 && frame % sim.report_every == 0 {
            report(world, &frames, frame);
        }
    }

    tracing::info!(
        frames = clock.frame_count(),
        elapsed_ms = clock.elapsed().as_secs_f64() * 1000.0,
        "Simulation finished"
    );
    if let Some(entity) = world.first_active_with::<Position>() {
        let position = world.get::<Position>(entity)?.0;
        tracing::info!(%entity, ?position, "Final position");
    }
    Ok(())
}

/// Log frame stats and the system timings gathered since the last report.
fn report(world: &mut World, frames: &FrameTimer, frame: u64) {
    let (min_ms, max_ms) = frames.frame_time_range_ms();
    tracing::info!(
        frame,
        fps = frames.fps(),
        frame_ms = frames.frame_time_ms(),
        min_ms,
        max_ms,
        "Frame stats"
    );
    for (name, timing) in world.systems().profiler().iter() {
        tracing::info!(
            system = name,
            calls = timing.calls,
            avg_us = timing.average().as_secs_f64() * 1.0e6,
            last_us = timing.last.as_secs_f64() * 1.0e6,
            "System timing"
        );
    }
    world.systems_mut().profiler_mut().reset();
}
