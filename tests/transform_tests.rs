//! Transform and Placement tests
//!
//! Tests for:
//! - Rotation helpers and their truncation
//! - Two-level placement composition
//! - Placement in tree order when draw order differs
//! - Dragging nodes under rotated parents
//! - Hit testing rotated polygons and images

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use glam::{DVec2, IVec2, UVec2};

use marionette::scene::transform::{rotate, rotate_point};
use marionette::{Actor, NodeKey, Part, SceneNode};

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn arm_outline() -> Part {
    Part::polygon(
        [
            IVec2::new(-7, -7),
            IVec2::new(-7, 96),
            IVec2::new(8, 96),
            IVec2::new(8, -7),
        ],
        [0, 0, 0],
    )
}

/// Body at the root with two children, drawn children-first.
fn torso(anchor: IVec2) -> (Actor, NodeKey, NodeKey, NodeKey) {
    let mut actor = Actor::new("Torso");
    actor.set_position(anchor);
    let body = actor.add_node(SceneNode::new("Body").with_position(IVec2::new(0, -114)));
    let arm = actor.add_node(
        SceneNode::new("Arm")
            .with_position(IVec2::new(50, -130))
            .with_part(arm_outline()),
    );
    let hand = actor.add_node(SceneNode::new("Hand").with_position(IVec2::new(0, 96)));
    actor.set_root(body).unwrap();
    actor.add_child(body, arm).unwrap();
    actor.add_child(arm, hand).unwrap();

    actor.add_drawable(hand).unwrap();
    actor.add_drawable(arm).unwrap();
    actor.add_drawable(body).unwrap();
    (actor, body, arm, hand)
}

// ============================================================================
// Rotation
// ============================================================================

#[test]
fn rotation_matches_convention() {
    let theta = 0.3_f64;
    let v = DVec2::new(2.0, 5.0);
    let r = rotate(v, theta);
    assert!(approx_eq(r.x, v.x * theta.cos() + v.y * theta.sin()));
    assert!(approx_eq(r.y, -v.x * theta.sin() + v.y * theta.cos()));
}

#[test]
fn half_turn_negates() {
    let r = rotate(DVec2::new(30.0, -40.0), PI);
    assert!(r.abs_diff_eq(DVec2::new(-30.0, 40.0), EPSILON));
}

#[test]
fn point_rotation_truncates_toward_zero() {
    // (10, 10) by 45 degrees = (14.14.., 0.0..)
    let p = rotate_point(IVec2::new(10, 10), FRAC_PI_4);
    assert_eq!(p, IVec2::new(14, 0));
}

// ============================================================================
// Placement
// ============================================================================

#[test]
fn two_level_composition() {
    let theta_r = 0.4;
    let theta_c = -0.15;
    let p_r = IVec2::new(12, -30);
    let p_c = IVec2::new(40, 25);
    let anchor = IVec2::new(300, 500);

    let mut actor = Actor::new("Pair");
    actor.set_position(anchor);
    let r = actor.add_node(SceneNode::new("R").with_position(p_r).with_rotation(theta_r));
    let c = actor.add_node(SceneNode::new("C").with_position(p_c).with_rotation(theta_c));
    actor.set_root(r).unwrap();
    actor.add_child(r, c).unwrap();
    actor.place();

    let root = actor.node(r).unwrap();
    let child = actor.node(c).unwrap();
    assert!(approx_eq(root.placed_rotation(), theta_r));
    assert!(approx_eq(child.placed_rotation(), theta_r + theta_c));
    assert_eq!(root.placed_position(), anchor + p_r);
    assert_eq!(
        child.placed_position(),
        anchor + rotate_point(p_r, 0.0) + rotate_point(p_c, theta_r)
    );
}

#[test]
fn placement_ignores_draw_order() {
    let (mut actor, body, arm, hand) = torso(IVec2::new(725, 500));
    actor.node_mut(arm).unwrap().set_rotation(FRAC_PI_2);

    let mut seen = Vec::new();
    actor.draw(&mut |node: &SceneNode| seen.push((node.name().to_string(), node.placed_position())));

    // Drawn hand first, yet placed after its ancestors
    assert_eq!(seen[0], ("Hand".to_string(), IVec2::new(871, 256)));
    assert_eq!(seen[1], ("Arm".to_string(), IVec2::new(775, 256)));
    assert_eq!(seen[2], ("Body".to_string(), IVec2::new(725, 386)));
    assert_eq!(actor.draw_order(), &[hand, arm, body]);
}

#[test]
fn placement_follows_anchor() {
    let (mut actor, body, _, _) = torso(IVec2::ZERO);
    actor.place();
    assert_eq!(actor.node(body).unwrap().placed_position(), IVec2::new(0, -114));

    actor.set_position(IVec2::new(10, 20));
    actor.place();
    assert_eq!(actor.node(body).unwrap().placed_position(), IVec2::new(10, -94));
}

// ============================================================================
// Move
// ============================================================================

#[test]
fn dragging_root_adds_screen_delta() {
    let (mut actor, body, _, _) = torso(IVec2::ZERO);
    actor.node_mut(body).unwrap().set_rotation(0.7);
    actor.place();

    actor.move_node(body, IVec2::new(5, 6)).unwrap();
    assert_eq!(actor.node(body).unwrap().position(), IVec2::new(5, -108));
}

#[test]
fn dragging_child_follows_pointer() {
    let (mut actor, body, arm, _) = torso(IVec2::new(500, 500));
    actor.node_mut(body).unwrap().set_rotation(FRAC_PI_2);
    actor.place();
    let before = actor.node(arm).unwrap().placed_position();

    actor.move_node(arm, IVec2::new(20, -10)).unwrap();
    actor.place();
    let after = actor.node(arm).unwrap().placed_position();

    // Parent is turned a quarter, but the arm still moves with the pointer
    assert_eq!(after - before, IVec2::new(20, -10));
    assert_eq!(actor.node(arm).unwrap().position(), IVec2::new(60, -110));
}

// ============================================================================
// Hit Testing
// ============================================================================

#[test]
fn rotated_polygon_hit() {
    let (mut actor, _, arm, _) = torso(IVec2::new(725, 500));
    actor.node_mut(arm).unwrap().set_rotation(FRAC_PI_2);
    actor.place();

    // Arm origin at (775, 256); turned a quarter, it extends along +x
    assert_eq!(actor.hit_test(IVec2::new(820, 256)), Some(arm));
    assert_eq!(actor.hit_test(IVec2::new(775, 300)), None);

    actor.node_mut(arm).unwrap().set_rotation(0.0);
    actor.place();
    let outline = actor.node(arm).unwrap().placed_outline();
    assert_eq!(outline.len(), 4);
    assert_eq!(outline[0], IVec2::new(768, 249));
    assert_eq!(outline[2], IVec2::new(783, 352));
}

#[test]
fn topmost_drawable_wins() {
    let mut actor = Actor::new("Stack");
    let bottom = actor.add_node(SceneNode::new("Bottom").with_part(arm_outline()));
    let top = actor.add_node(SceneNode::new("Top").with_part(arm_outline()));
    actor.set_root(bottom).unwrap();
    actor.add_child(bottom, top).unwrap();
    actor.add_drawable(bottom).unwrap();
    actor.add_drawable(top).unwrap();
    actor.place();

    assert_eq!(actor.hit_test(IVec2::new(0, 10)), Some(top));
}

#[test]
fn rotated_image_hit_and_head_points() {
    let mut actor = Actor::new("Linda");
    actor.set_position(IVec2::new(400, 400));
    let head = actor.add_node(SceneNode::new("Head Top").with_part(Part::image(
        "headt4.png",
        IVec2::new(75, 112),
        UVec2::new(150, 130),
    )));
    actor.set_root(head).unwrap();
    actor.add_drawable(head).unwrap();
    actor.node_mut(head).unwrap().set_rotation(PI);
    actor.place();

    let node = actor.node(head).unwrap();
    // Upside down, the eye center (above the image center) ends up below it
    assert_eq!(node.to_screen(IVec2::new(75, 85)), IVec2::new(400, 427));
    // Image top-left is drawn to the lower right of the anchor
    assert!(node.hit_test(IVec2::new(470, 505)));
    assert!(!node.hit_test(IVec2::new(330, 290)));
    assert_eq!(actor.hit_test(IVec2::new(400, 400)), Some(head));
}
