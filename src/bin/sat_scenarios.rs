use std::f32::consts::FRAC_PI_4;

use glam::Vec2;
use sat2d::{
    Capsule, Circle, ConvexPolygon, PairTable, Rectangle, SatError, Segment, Shape, Transform2,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

struct Scenario {
    name: &'static str,
    shape_a: Shape,
    transform_a: Transform2,
    shape_b: Shape,
    transform_b: Transform2,
}

fn square() -> Shape {
    Rectangle {
        half_extents: Vec2::splat(0.5),
    }
    .into()
}

fn unit_circle() -> Shape {
    Circle { radius: 1.0 }.into()
}

fn at(x: f32, y: f32) -> Transform2 {
    Transform2::from_translation(Vec2::new(x, y))
}

fn scenarios() -> Vec<Scenario> {
    let segment: Shape = Segment::new(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0)).into();
    let capsule: Shape = Capsule {
        radius: 0.25,
        height: 1.0,
    }
    .into();
    let triangle: Option<Shape> =
        ConvexPolygon::new([Vec2::new(-0.5, 0.0), Vec2::new(0.5, 0.0), Vec2::Y]).map(Shape::from);

    let mut out = vec![
        Scenario {
            name: "squares apart",
            shape_a: square(),
            transform_a: Transform2::IDENTITY,
            shape_b: square(),
            transform_b: at(1.5, 0.0),
        },
        Scenario {
            name: "squares overlapping",
            shape_a: square(),
            transform_a: Transform2::IDENTITY,
            shape_b: square(),
            transform_b: at(0.5, 0.0),
        },
        Scenario {
            name: "circles overlapping",
            shape_a: unit_circle(),
            transform_a: Transform2::IDENTITY,
            shape_b: unit_circle(),
            transform_b: at(1.5, 0.0),
        },
        Scenario {
            name: "circles apart",
            shape_a: unit_circle(),
            transform_a: Transform2::IDENTITY,
            shape_b: unit_circle(),
            transform_b: at(3.0, 0.0),
        },
        Scenario {
            name: "identical segments",
            shape_a: segment.clone(),
            transform_a: Transform2::IDENTITY,
            shape_b: segment,
            transform_b: Transform2::IDENTITY,
        },
        Scenario {
            name: "capsule on rotated square",
            shape_a: capsule,
            transform_a: at(0.0, 0.9),
            shape_b: square(),
            transform_b: Transform2::from_angle_translation(FRAC_PI_4, Vec2::ZERO),
        },
    ];

    if let Some(triangle) = triangle {
        out.push(Scenario {
            name: "triangle resting on square",
            shape_a: triangle,
            transform_a: at(0.0, 0.4),
            shape_b: square(),
            transform_b: Transform2::IDENTITY,
        });
    }

    out
}

fn run(scenario: &Scenario) -> Result<(), SatError> {
    let manifold = sat2d::contact(
        &scenario.shape_a,
        &scenario.transform_a,
        &scenario.shape_b,
        &scenario.transform_b,
    )?;

    match manifold {
        Some(manifold) => {
            info!(
                scenario = scenario.name,
                normal = %manifold.normal,
                depth = manifold.depth,
                "collision"
            );

            for pair in &manifold.points {
                info!(on_a = %pair.on_a, on_b = %pair.on_b, "  contact");
            }
        }
        None => info!(scenario = scenario.name, "no collision"),
    }

    Ok(())
}

/// Moves a circle toward a square and back, reusing one pair record throughout.
fn run_coherent(frames: usize) -> Result<(), SatError> {
    let mut table = PairTable::<u32>::new();
    let circle: Shape = Circle { radius: 0.5 }.into();
    let square = square();

    for frame in 0..frames {
        let t = frame as f32 / frames as f32;
        let x = 3.0 - 4.0 * (1.0 - (2.0 * t - 1.0).abs());
        let transform_circle = at(x, 0.25);

        let record = table.get_or_insert(0, 1);
        let collided =
            record.collide(&circle, &transform_circle, &square, &Transform2::IDENTITY)?;

        info!(
            frame,
            x,
            collided,
            cached_axis = ?record.separating_axis(),
            "coherent query"
        );
    }

    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    for scenario in scenarios() {
        if let Err(e) = run(&scenario) {
            warn!(scenario = scenario.name, "{e}");
        }
    }

    if let Err(e) = run_coherent(16) {
        warn!("{e}");
    }
}
