//! Actor factories. Geometry is built once here; the engine never loads it
//! from disk.

use std::path::Path;

use glam::{IVec2, UVec2};
use marionette::{Actor, Part, Rgb, SceneNode};

const SKIN: Rgb = [208, 159, 116];
const BLACK: Rgb = [0, 0, 0];

fn limb(half_width: i32, length: i32) -> Vec<IVec2> {
    vec![
        IVec2::new(-half_width, -7),
        IVec2::new(-half_width, length),
        IVec2::new(half_width + 1, length),
        IVec2::new(half_width + 1, -7),
    ]
}

fn hand() -> Vec<IVec2> {
    vec![
        IVec2::new(-12, -2),
        IVec2::new(-12, 17),
        IVec2::new(11, 17),
        IVec2::new(11, -2),
    ]
}

/// Full-canvas backdrop. Never picked.
pub fn background(images: &Path, size: UVec2) -> anyhow::Result<Actor> {
    let mut actor = Actor::new("Background");
    actor.set_clickable(false);

    let image = actor.add_node(SceneNode::new("Background").with_part(Part::image(
        images.join("Background.jpg"),
        IVec2::ZERO,
        size,
    )));
    actor.set_root(image)?;
    actor.add_drawable(image)?;
    Ok(actor)
}

/// A character whose draw order (arms behind the coat, head on top) differs
/// from its tree order (everything hangs off the coat).
pub fn linda(images: &Path) -> anyhow::Result<Actor> {
    let mut actor = Actor::new("Linda");

    let coat = actor.add_node(
        SceneNode::new("Coat")
            .with_position(IVec2::new(0, -114))
            .with_part(Part::image(images.join("black_coat.png"), IVec2::new(44, 138), UVec2::new(88, 160))),
    );
    actor.set_root(coat)?;

    let left_leg = actor.add_node(
        SceneNode::new("Left Leg")
            .with_position(IVec2::new(27, 0))
            .with_part(Part::image(images.join("jeans_lleg.png"), IVec2::new(21, 9), UVec2::new(42, 120))),
    );
    let right_leg = actor.add_node(
        SceneNode::new("Right Leg")
            .with_position(IVec2::new(-27, 0))
            .with_part(Part::image(images.join("jeans_rleg.png"), IVec2::new(34, 9), UVec2::new(42, 120))),
    );
    let head_bottom = actor.add_node(
        SceneNode::new("Head Bottom")
            .with_position(IVec2::new(0, -130))
            .with_part(Part::image(images.join("headb3.png"), IVec2::new(44, 31), UVec2::new(88, 40))),
    );
    let head_top = actor.add_node(
        SceneNode::new("Head Top")
            .with_position(IVec2::new(0, -31))
            .with_part(Part::image(images.join("headt4.png"), IVec2::new(75, 112), UVec2::new(150, 130))),
    );
    let left_arm = actor.add_node(
        SceneNode::new("Left Arm")
            .with_position(IVec2::new(50, -130))
            .with_part(Part::polygon(limb(7, 96), BLACK)),
    );
    let right_arm = actor.add_node(
        SceneNode::new("Right Arm")
            .with_position(IVec2::new(-45, -130))
            .with_part(Part::polygon(limb(7, 96), BLACK)),
    );
    let left_hand = actor.add_node(
        SceneNode::new("Left Hand")
            .with_position(IVec2::new(0, 96))
            .with_part(Part::polygon(hand(), SKIN)),
    );
    let right_hand = actor.add_node(
        SceneNode::new("Right Hand")
            .with_position(IVec2::new(0, 96))
            .with_part(Part::polygon(hand(), SKIN)),
    );

    for child in [left_leg, right_leg, head_bottom, left_arm, right_arm] {
        actor.add_child(coat, child)?;
    }
    actor.add_child(head_bottom, head_top)?;
    actor.add_child(left_arm, left_hand)?;
    actor.add_child(right_arm, right_hand)?;

    for drawable in [
        left_arm, right_arm, right_hand, left_hand, right_leg, left_leg, coat, head_bottom, head_top,
    ] {
        actor.add_drawable(drawable)?;
    }
    Ok(actor)
}
