//! Scrub
//!
//! Builds a scene with a background and one character, records a few
//! keyframes, then scrubs the timeline and logs where every part lands.
//!
//! Usage: `scrub [settings.json] [images dir]`
//! Run with `RUST_LOG=info` (or `debug`, `trace`) to see the output.

mod factory;

use std::cell::Cell;
use std::f64::consts::FRAC_PI_2;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use glam::IVec2;
use marionette::{PartRenderer, Scene, SceneEvent, SceneNode, SceneSettings};

/// Logs each part's placed transform instead of producing pixels.
#[derive(Default)]
struct LogRenderer {
    parts: usize,
}

impl PartRenderer for LogRenderer {
    fn draw_part(&mut self, node: &SceneNode) {
        self.parts += 1;
        log::info!(
            "  {:<12} at ({:>4}, {:>4}) rot {:>7.3}",
            node.name(),
            node.placed_position().x,
            node.placed_position().y,
            node.placed_rotation()
        );
    }
}

fn load_settings(path: Option<&str>) -> anyhow::Result<SceneSettings> {
    let Some(path) = path else {
        return Ok(SceneSettings::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let settings = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let settings = load_settings(args.get(1).map(String::as_str))?;
    let images = PathBuf::from(args.get(2).map_or("images", String::as_str));

    let mut scene = Scene::with_settings(settings)?;

    let redraws = Rc::new(Cell::new(0_u32));
    let counter = Rc::clone(&redraws);
    scene.add_observer(Box::new(move |event: &SceneEvent| {
        log::debug!("Scene event: {event:?}");
        counter.set(counter.get() + 1);
    }));

    let size = scene.size();
    scene.add_actor(factory::background(&images, size)?)?;

    let mut linda = factory::linda(&images)?;
    linda.set_position(IVec2::new(725, 500));
    let linda = scene.add_actor(linda)?;

    // ------------------------------------------------------------------
    // Record: rest pose at 0 s, wave at 2 s, walk right by 4 s
    // ------------------------------------------------------------------
    scene.set_animation_time(0.0);
    scene
        .actor_mut(linda)
        .context("Linda left the scene")?
        .set_keyframe();

    scene.set_animation_time(2.0);
    {
        let actor = scene.actor_mut(linda).context("Linda left the scene")?;
        let arm = actor.find_node("Left Arm").context("missing Left Arm")?;
        let head = actor.find_node("Head Top").context("missing Head Top")?;
        actor.node_mut(arm).context("missing Left Arm")?.set_rotation(-FRAC_PI_2);
        actor.node_mut(head).context("missing Head Top")?.set_rotation(0.2);
        actor.set_keyframe();
    }

    scene.set_animation_time(4.0);
    {
        let actor = scene.actor_mut(linda).context("Linda left the scene")?;
        let arm = actor.find_node("Left Arm").context("missing Left Arm")?;
        actor.node_mut(arm).context("missing Left Arm")?.set_rotation(0.0);
        actor.set_position(IVec2::new(925, 500));
        actor.set_keyframe();
    }

    // ------------------------------------------------------------------
    // Scrub
    // ------------------------------------------------------------------
    let duration = scene.timeline().duration().min(5.0);
    let mut renderer = LogRenderer::default();
    let mut time = 0.0;
    while time <= duration {
        scene.set_animation_time(time);
        log::info!(
            "t = {:.2}s (frame {})",
            scene.timeline().current_time(),
            scene.timeline().current_frame()
        );
        scene.draw(&mut renderer);

        let anchor = scene.actor(linda).map(marionette::Actor::position);
        if let Some(anchor) = anchor
            && let Some((_, node)) = scene.hit_test(anchor + IVec2::new(0, -300))
        {
            let name = scene
                .actor(linda)
                .and_then(|a| a.node(node))
                .map_or("?", SceneNode::name);
            log::info!("  pointer above the anchor hits '{name}'");
        }

        time += 0.5;
    }

    log::info!(
        "Drew {} parts across {} scene notifications",
        renderer.parts,
        redraws.get()
    );
    Ok(())
}
