use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3, Vec4};
use marionette::core::math::matrix;
use marionette::{DrawSink, Figure, Matrix, Pose, Robot, SegmentId, TransformStack};

const EPS: f32 = 1e-5;

#[derive(Default)]
struct Recorder {
    calls: Vec<(SegmentId, Matrix)>,
}

impl DrawSink for Recorder {
    fn draw_segment(&mut self, id: SegmentId, world: &Matrix) {
        self.calls.push((id, *world));
    }
}

fn pose_at(pivot_offset: Vec3, joint_offset: Vec3) -> Pose {
    Pose {
        pivot_offset,
        joint_offset,
        ..Pose::default()
    }
}

fn draw(figure: &Figure) -> Recorder {
    let mut stack = TransformStack::new();
    let mut recorder = Recorder::default();
    figure.draw(&mut stack, &mut recorder);
    assert_eq!(stack.depth(), 1);
    recorder
}

#[test]
fn test_two_level_translation_accumulates() {
    let mut figure = Figure::new();
    let root = figure.add_root(
        "root",
        pose_at(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.5, 0.0, 0.0)),
    );
    let child = figure.add_child(
        root,
        "child",
        pose_at(Vec3::new(0.0, 4.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
    );

    let recorder = draw(&figure);
    assert_eq!(recorder.calls.len(), 2);
    assert_eq!(recorder.calls[0].0, root);
    assert_eq!(recorder.calls[1].0, child);

    // Without rotation the joint offsets cancel and only pivots add up.
    let expected_root = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
    let expected_child = Mat4::from_translation(Vec3::new(1.0, 6.0, 3.0));
    assert!(recorder.calls[0].1.abs_diff_eq(expected_root, EPS));
    assert!(recorder.calls[1].1.abs_diff_eq(expected_child, EPS));
}

#[test]
fn test_draw_preserves_stack_depth() {
    let robot = Robot::build();
    let mut stack = TransformStack::new();
    stack.push_matrix();
    stack.push_matrix();
    stack.translate_xyz(0.0, 1.0, 0.0);
    let top = *stack.top_matrix();

    let mut recorder = Recorder::default();
    robot.figure.draw(&mut stack, &mut recorder);

    assert_eq!(stack.depth(), 3);
    assert_eq!(*stack.top_matrix(), top);
    assert_eq!(recorder.calls.len(), 10);
}

#[test]
fn test_leaf_and_empty_figures() {
    let empty = Figure::new();
    assert!(draw(&empty).calls.is_empty());

    let mut single = Figure::new();
    single.add_root("only", Pose::default());
    let recorder = draw(&single);
    assert_eq!(recorder.calls.len(), 1);
    assert_eq!(recorder.calls[0].1, Mat4::IDENTITY);
}

#[test]
fn test_local_scale_does_not_reach_children() {
    let mut figure = Figure::new();
    let root = figure.add_root(
        "root",
        Pose {
            local_scale: Vec3::splat(2.0),
            ..Pose::default()
        },
    );
    figure.add_child(root, "child", pose_at(Vec3::new(0.0, 1.0, 0.0), Vec3::ZERO));

    let recorder = draw(&figure);
    let (_, root_world) = recorder.calls[0];
    let (_, child_world) = recorder.calls[1];

    assert!(root_world.x_axis.abs_diff_eq(Vec4::new(2.0, 0.0, 0.0, 0.0), EPS));
    assert!(child_world.w_axis.abs_diff_eq(Vec4::new(0.0, 1.0, 0.0, 1.0), EPS));
    assert!((child_world.x_axis.truncate().length() - 1.0).abs() < EPS);
}

#[test]
fn test_rotation_pivots_about_joint() {
    let mut figure = Figure::new();
    let root = figure.add_root(
        "elbow",
        Pose {
            joint_offset: Vec3::new(0.0, 1.0, 0.0),
            joint_rotation: Vec3::new(0.0, 0.0, FRAC_PI_2),
            ..Pose::default()
        },
    );

    let recorder = draw(&figure);
    let world = recorder.calls[0].1;

    // The joint itself stays put; the segment origin swings around it.
    let joint = world * Vec4::new(0.0, 1.0, 0.0, 1.0);
    assert!(joint.abs_diff_eq(Vec4::new(0.0, 1.0, 0.0, 1.0), EPS), "{joint}");
    assert!(world.w_axis.abs_diff_eq(Vec4::new(1.0, 1.0, 0.0, 1.0), EPS));
    assert!(world.abs_diff_eq(figure.world_matrix(root), EPS));
}

#[test]
fn test_rotation_axes_apply_x_then_y_then_z() {
    let angles = Vec3::new(0.3, -0.7, 1.2);
    let mut figure = Figure::new();
    figure.add_root(
        "spin",
        Pose {
            joint_rotation: angles,
            ..Pose::default()
        },
    );

    let world = draw(&figure).calls[0].1;
    let expected = matrix::rotation_x(angles.x)
        * matrix::rotation_y(angles.y)
        * matrix::rotation_z(angles.z);
    assert!(world.abs_diff_eq(expected, EPS));
}

#[test]
fn test_children_inherit_parent_rotation() {
    let mut figure = Figure::new();
    let root = figure.add_root(
        "shoulder",
        Pose {
            joint_rotation: Vec3::new(0.0, 0.0, FRAC_PI_2),
            ..Pose::default()
        },
    );
    let child = figure.add_child(root, "hand", pose_at(Vec3::new(2.0, 0.0, 0.0), Vec3::ZERO));

    let recorder = draw(&figure);
    let hand = recorder.calls[1].1;
    assert!(hand.w_axis.abs_diff_eq(Vec4::new(0.0, 2.0, 0.0, 1.0), EPS));
    assert!(hand.abs_diff_eq(figure.world_matrix(child), EPS));
}

#[test]
fn test_robot_draw_order_is_preorder() {
    let robot = Robot::build();
    let recorder = draw(&robot.figure);

    let names: Vec<&str> = recorder
        .calls
        .iter()
        .map(|(id, _)| robot.figure.segment(*id).name.as_str())
        .collect();
    assert_eq!(
        names,
        [
            "torso",
            "head",
            "upper left arm",
            "lower left arm",
            "upper right arm",
            "lower right arm",
            "upper left leg",
            "lower left leg",
            "upper right leg",
            "lower right leg",
        ]
    );

    let ids: Vec<SegmentId> = recorder.calls.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, robot.figure.preorder());
}

#[test]
fn test_robot_rest_pose_positions() {
    let robot = Robot::build();
    let recorder = draw(&robot.figure);
    let world_of = |id: SegmentId| {
        recorder
            .calls
            .iter()
            .find(|(drawn, _)| *drawn == id)
            .map(|(_, m)| *m)
            .unwrap()
    };

    let head = world_of(robot.head);
    let lower_left_arm = world_of(robot.left_arm.lower);
    let lower_right_leg = world_of(robot.right_leg.lower);

    assert!(head.w_axis.abs_diff_eq(Vec4::new(0.0, 2.5, 0.0, 1.0), EPS));
    assert!(lower_left_arm.w_axis.abs_diff_eq(Vec4::new(4.0, 1.5, 0.0, 1.0), EPS));
    assert!(lower_right_leg.w_axis.abs_diff_eq(Vec4::new(-0.5, -8.0, 0.0, 1.0), EPS));

    // Own scale only: the torso's 2.2 height doesn't stretch the head.
    assert!(head.y_axis.abs_diff_eq(Vec4::new(0.0, 0.5, 0.0, 0.0), EPS));
}

#[test]
fn test_world_matrix_matches_traversal_for_posed_robot() {
    let mut robot = Robot::build();
    robot.set_rotation(robot.torso, Vec3::new(0.2, 0.4, -0.1));
    robot.set_rotation(robot.left_arm.upper, Vec3::new(0.0, 1.0, 0.3));
    robot.set_rotation(robot.left_arm.lower, Vec3::new(0.5, 0.0, 0.0));
    robot.set_rotation(robot.right_leg.upper, Vec3::new(-1.2, 0.0, 0.0));

    let recorder = draw(&robot.figure);
    for (id, world) in &recorder.calls {
        assert!(world.abs_diff_eq(robot.figure.world_matrix(*id), 1e-4));
    }
}

#[test]
fn test_figure_queries() {
    let robot = Robot::build();
    let figure = &robot.figure;

    assert_eq!(figure.len(), 10);
    assert_eq!(figure.root(), Some(robot.torso));
    assert_eq!(figure.segment(robot.torso).parent(), None);
    assert_eq!(figure.segment(robot.left_leg.lower).parent(), Some(robot.left_leg.upper));
    assert_eq!(
        figure.segment(robot.torso).children(),
        [
            robot.head,
            robot.left_arm.upper,
            robot.right_arm.upper,
            robot.left_leg.upper,
            robot.right_leg.upper,
        ]
    );
    assert_eq!(figure.find("lower right arm"), Some(robot.right_arm.lower));
    assert_eq!(figure.find("tail"), None);
}

#[test]
#[should_panic(expected = "overflow")]
fn test_runaway_depth_trips_stack_limit() {
    let mut figure = Figure::new();
    let mut parent = figure.add_root("link 0", Pose::default());
    for i in 1..120 {
        parent = figure.add_child(parent, format!("link {i}"), Pose::default());
    }

    let mut stack = TransformStack::new();
    figure.draw(&mut stack, &mut Recorder::default());
}

#[test]
fn test_height_and_draw_depth() {
    let empty = Figure::new();
    assert_eq!(empty.height(), 0);
    assert_eq!(empty.draw_depth(), 0);

    let robot = Robot::build();
    assert_eq!(robot.figure.height(), 3);
    assert_eq!(robot.figure.draw_depth(), 4);

    // The deepest draw fits a stack of exactly 1 + draw_depth frames.
    let mut stack = TransformStack::with_depth_limit(1 + robot.figure.draw_depth());
    let mut recorder = Recorder::default();
    robot.figure.draw(&mut stack, &mut recorder);
    assert_eq!(recorder.calls.len(), 10);
    assert_eq!(stack.depth(), 1);
}

#[test]
fn test_add_child_with_foreign_parent_leaves_figure_unchanged() {
    let mut other = Figure::new();
    let root = other.add_root("root", Pose::default());
    let foreign = other.add_child(root, "elsewhere", Pose::default());

    let mut figure = Figure::new();
    figure.add_root("only", Pose::default());

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        figure.add_child(foreign, "orphan", Pose::default())
    }));
    assert!(result.is_err());
    assert_eq!(figure.len(), 1);
    assert_eq!(figure.find("orphan"), None);
}
