//! The neighborhood
//!
//! Coordinates are world units with +Y up. The lawn runs along Z between
//! the two houses; sidewalks frame it and the playground sits at its south
//! end.

use cgmath::Vector3;

use super::{
    placement::{repeat_count, Axis, GridPlacement},
    MaterialSpec, SceneLayout, Shape, SkyboxSpec, Transform,
};

const CURB_COLOR: u32 = 0x2c393f;
const HOUSE_COLOR: u32 = 0xffffff;
const HOUSE_SHININESS: f32 = 100.0;
const PILLAR_COLOR: u32 = 0xfefce2;
const BORDEAUX: u32 = 0x5a2323;
const LAMP_COLOR: u32 = 0x9c9b95;
const BALL_COLOR: u32 = 0xad0000;

/// The east house mirrors the west one about this line.
const LAWN_CENTER_X: f32 = 20.0;
const SIDEWALK_TILE: f32 = 40.0;
/// Models are turned by this many radians about Y.
const MODEL_TURN: f32 = -300.0;

pub const BALL_LABEL: &str = "ball";

pub const GRASS_MODEL: &str = "models/grass/dense-grass.obj";
pub const BENCH_MODEL: &str = "models/bench/wood-bench-2.obj";
pub const CHICKEN_MODEL: &str = "models/chicken/minecraft-chicken.obj";

pub fn neighborhood() -> SceneLayout {
    let mut layout = SceneLayout::new();
    lawn(&mut layout);
    playground(&mut layout);
    sidewalks(&mut layout);
    house(&mut layout, "west", |x| x);
    house(&mut layout, "east", |x| 2.0 * LAWN_CENTER_X - x);
    pillars(&mut layout);
    lampposts(&mut layout);
    ball(&mut layout);
    grass(&mut layout);
    benches(&mut layout);
    animals(&mut layout);
    layout.skybox(SkyboxSpec::from_directory("skybox", "jpg"));
    layout
}

fn lawn(layout: &mut SceneLayout) {
    layout
        .template(
            "lawn",
            Shape::Plane {
                width: 120.0,
                depth: 280.0,
            },
            MaterialSpec::lambert(0xffffff).textured("grass.jpg", [8.0, 4.0]),
        )
        .place("lawn", Transform::at(20.0, 0.0, 80.0));

    // (x, y, z, length, runs along Z)
    let borders = [
        (-40.0, 0.0, 20.0, 160.0, true),
        (80.0, 0.0, 80.0, 280.0, true),
        (-40.0, 0.0, 200.0, 40.0, true),
        (20.0, 0.0, -60.0, 120.0, false),
        (20.0, 0.0, 220.0, 120.0, false),
        (120.0, 0.0, 40.0, 440.0, true),
        (-80.0, 0.0, 40.0, 440.0, true),
    ];
    for (x, y, z, length, along_z) in borders {
        curb(layout, "border", x, y, z, [1.0, 1.0, length], along_z);
    }
}

fn playground(layout: &mut SceneLayout) {
    let curbs = [
        (-40.0, 0.0, 140.0, 80.0, true),
        (40.0, 0.0, 140.0, 80.0, true),
        (0.0, 0.0, 100.0, 84.0, false),
        (0.0, 0.0, 180.0, 84.0, false),
    ];
    for (x, y, z, length, along_z) in curbs {
        curb(layout, "curb", x, y, z, [4.0, 2.0, length], along_z);
    }

    layout
        .template(
            "playground",
            Shape::Plane {
                width: 76.0,
                depth: 76.0,
            },
            MaterialSpec::phong(0xffffff, 30.0).textured("woodchips.jpg", [4.0, 4.0]),
        )
        .place("playground", Transform::at(0.0, 0.5, 140.0));
}

/// Unlit box of cross-section `[w, h]` and `length`, along Z or along X.
fn curb(
    layout: &mut SceneLayout,
    kind: &str,
    x: f32,
    y: f32,
    z: f32,
    [w, h, length]: [f32; 3],
    along_z: bool,
) {
    let (name, shape) = if along_z {
        (
            format!("{}-z{}", kind, length),
            Shape::Box {
                width: w,
                height: h,
                depth: length,
            },
        )
    } else {
        (
            format!("{}-x{}", kind, length),
            Shape::Box {
                width: length,
                height: h,
                depth: w,
            },
        )
    };

    if !layout.templates.iter().any(|template| template.name == name) {
        layout.template(&name, shape, MaterialSpec::basic(CURB_COLOR));
    }
    layout.place(&name, Transform::at(x, y, z));
}

fn sidewalks(layout: &mut SceneLayout) {
    layout.template(
        "sidewalk",
        Shape::Plane {
            width: SIDEWALK_TILE,
            depth: SIDEWALK_TILE,
        },
        MaterialSpec::basic(0xffffff).textured("sidewalks.jpg", [1.0, 1.0]),
    );

    // (x, y, z, width, length) of each strip, filled with tiles.
    let strips = [
        (-60.0, 0.0, -40.0, 40.0, 280.0),
        (100.0, 0.0, -40.0, 40.0, 280.0),
        (-60.0, 0.0, -160.0, 200.0, 120.0),
        (-60.0, 0.0, 240.0, 200.0, 40.0),
    ];
    for (x, y, z, width, length) in strips {
        let grid = GridPlacement::along(
            Vector3::new(x, y, z),
            Axis::X,
            SIDEWALK_TILE,
            repeat_count(0.0, width, SIDEWALK_TILE),
        )
        .then(
            Axis::Z,
            SIDEWALK_TILE,
            repeat_count(0.0, length, SIDEWALK_TILE),
        );
        layout.place_grid("sidewalk", &grid, Transform::default());
    }
}

/// Bush, two floors with a balcony between them, and gable walls on top.
///
/// `x` maps the west house's x coordinates to this house's side.
fn house(layout: &mut SceneLayout, side: &str, x: impl Fn(f32) -> f32) {
    let name = |part: &str| format!("{}-house-{}", side, part);
    let white = || MaterialSpec::phong(HOUSE_COLOR, HOUSE_SHININESS);

    let boxes = [
        ("bush", [8.0, 12.0, 45.0], [-84.0, 0.0, 30.0]),
        ("ground-floor", [80.0, 36.0, 60.0], [-140.0, 18.0, 0.0]),
        ("balcony", [100.0, 6.0, 60.0], [-130.0, 39.0, 0.0]),
        ("upper-floor", [70.0, 24.0, 60.0], [-145.0, 54.0, 0.0]),
    ];
    for (part, [width, height, depth], [px, py, pz]) in boxes {
        let material = if part == "bush" {
            MaterialSpec::basic(0xffffff).textured("bush.jpg", [2.0, 2.0])
        } else {
            white()
        };
        layout
            .template(&name(part), Shape::Box { width, height, depth }, material)
            .place(&name(part), Transform::at(x(px), py, pz));
    }

    // Gables close the roof over the front and back walls of the upper floor.
    let gable_width = 70.0;
    let roof_base = 54.0 + 24.0 / 2.0;
    let west_edge = -145.0 - gable_width / 2.0;
    let gable_x = x(west_edge).min(x(west_edge + gable_width));
    layout.template(
        &name("gable"),
        Shape::Triangle {
            a: [0.0, 0.0, 0.0],
            b: [gable_width, 0.0, 0.0],
            c: [gable_width / 2.0, 25.0, 0.0],
        },
        white(),
    );
    for z in [-30.0, 30.0] {
        layout.place(&name("gable"), Transform::at(gable_x, roof_base, z));
    }
}

fn pillars(layout: &mut SceneLayout) {
    layout.template(
        "pillar",
        Shape::Cylinder {
            radius_top: 1.0,
            radius_bottom: 1.0,
            height: 46.0,
        },
        MaterialSpec::basic(PILLAR_COLOR),
    );

    // Every other 15-unit slot from -60 to 75, doubled: z = -120, -90, ..., 120.
    let count = repeat_count(-60.0, 75.0, 15.0);
    for x in [-85.0, 125.0] {
        let row = GridPlacement::along(Vector3::new(x, 23.0, -120.0), Axis::Z, 30.0, count);
        layout.place_grid("pillar", &row, Transform::default());
    }
}

fn lampposts(layout: &mut SceneLayout) {
    let cylinder = |radius_top, radius_bottom, height| Shape::Cylinder {
        radius_top,
        radius_bottom,
        height,
    };
    let bordeaux = MaterialSpec::basic(BORDEAUX);
    let lamp = MaterialSpec::basic(LAMP_COLOR);
    layout
        .template("lamp-pole", cylinder(1.0, 1.0, 50.0), bordeaux.clone())
        .template("lamp", cylinder(2.0, 1.0, 5.0), lamp)
        .template("lamp-shade", cylinder(1.0, 5.0, 1.0), bordeaux);

    for (x, y, z) in [(-45.0, 25.0, -60.0), (85.0, 25.0, 20.0), (-45.0, 25.0, 100.0)] {
        layout
            .place("lamp-pole", Transform::at(x, y, z))
            .place("lamp", Transform::at(x, 50.0, z))
            .place("lamp-shade", Transform::at(x, 53.0, z));
    }
}

fn ball(layout: &mut SceneLayout) {
    layout
        .template(
            "ball",
            Shape::Sphere { radius: 3.0 },
            MaterialSpec::phong(BALL_COLOR, 100.0),
        )
        .place_labelled("ball", BALL_LABEL, Transform::at(0.0, 3.0, 120.0))
        .oscillate(BALL_LABEL, Axis::X, 0.5, -20.0, 20.0);
}

fn grass(layout: &mut SceneLayout) {
    let tuft = Transform::default().with_scale_xyz(0.1, 0.3, 0.1);
    let y = -10.0;

    let fields = [
        // Lawn, z outer and x inner.
        GridPlacement::along(
            Vector3::new(-20.0, y, -40.0),
            Axis::Z,
            40.0,
            repeat_count(-40.0, 120.0, 40.0),
        )
        .then(Axis::X, 40.0, repeat_count(-20.0, 80.0, 40.0)),
        // East of the playground.
        GridPlacement::along(
            Vector3::new(60.0, y, 120.0),
            Axis::Z,
            40.0,
            repeat_count(120.0, 170.0, 40.0),
        ),
        // North edge.
        GridPlacement::along(
            Vector3::new(-20.0, y, 200.0),
            Axis::X,
            40.0,
            repeat_count(-20.0, 80.0, 40.0),
        ),
    ];

    let instances = fields
        .iter()
        .flat_map(|field| field.positions())
        .map(|position| tuft.moved_to(position))
        .collect();
    layout.model("grass", GRASS_MODEL, instances);
}

fn benches(layout: &mut SceneLayout) {
    let bench = Transform::default().with_scale(0.08);
    let turned = bench.with_rotation_y(MODEL_TURN);
    layout.model(
        "bench",
        BENCH_MODEL,
        vec![
            turned.moved_to(Vector3::new(45.0, 0.0, 160.0)),
            turned.moved_to(Vector3::new(45.0, 0.0, 120.0)),
            turned.moved_to(Vector3::new(68.0, 0.0, 20.0)),
            bench.moved_to(Vector3::new(20.0, 0.0, 185.0)),
        ],
    );
}

/// A big chicken in the playground and two chicks by the west lawn border.
fn animals(layout: &mut SceneLayout) {
    let chick = Transform::default().with_scale(2.0).with_rotation_y(MODEL_TURN);
    layout.model(
        "chicken",
        CHICKEN_MODEL,
        vec![
            Transform::at(0.0, 0.0, 140.0)
                .with_scale(5.0)
                .with_rotation_y(MODEL_TURN),
            chick.moved_to(Vector3::new(-34.0, 0.0, 40.0)),
            chick.moved_to(Vector3::new(-30.0, 0.0, 48.0)),
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighborhood_validates() {
        assert_eq!(neighborhood().validate(), Ok(()));
    }

    #[test]
    fn test_sidewalk_blocks() {
        let layout = neighborhood();
        assert_eq!(layout.count("sidewalk"), 7 + 7 + 15 + 5);

        let first = &layout
            .placements
            .iter()
            .find(|p| p.template == "sidewalk")
            .unwrap()
            .transform;
        assert_eq!(first.translation, Vector3::new(-60.0, 0.0, -40.0));
    }

    #[test]
    fn test_pillar_rows() {
        let layout = neighborhood();
        assert_eq!(layout.count("pillar"), 18);

        let zs: Vec<f32> = layout
            .placements
            .iter()
            .filter(|p| p.template == "pillar")
            .map(|p| p.transform.translation)
            .filter(|t| t.x == -85.0)
            .map(|t| t.z)
            .collect();
        let expected: Vec<f32> = (-4..=4).map(|i| i as f32 * 30.0).collect();
        assert_eq!(zs, expected);
    }

    #[test]
    fn test_lamppost_parts() {
        let layout = neighborhood();
        let parts = layout.count("lamp-pole") + layout.count("lamp") + layout.count("lamp-shade");
        assert_eq!(parts, 9);
    }

    #[test]
    fn test_curbs_share_templates_by_size() {
        let layout = neighborhood();
        assert_eq!(layout.count("border-z440"), 2);
        assert_eq!(layout.count("border-x120"), 2);
        assert_eq!(layout.count("curb-z80"), 2);
        assert_eq!(layout.count("curb-x84"), 2);
    }

    #[test]
    fn test_houses_mirror_about_lawn_center() {
        let layout = neighborhood();
        let x_of = |template: &str| {
            layout
                .placements
                .iter()
                .find(|p| p.template == template)
                .map(|p| p.transform.translation.x)
                .unwrap()
        };
        assert_eq!(x_of("west-house-ground-floor"), -140.0);
        assert_eq!(x_of("east-house-ground-floor"), 180.0);
        assert_eq!(x_of("east-house-bush"), 124.0);
        assert_eq!(x_of("west-house-gable"), -180.0);
        assert_eq!(x_of("east-house-gable"), 150.0);
        assert_eq!(layout.count("east-house-gable"), 2);
    }

    #[test]
    fn test_ball_oscillates_on_x() {
        let layout = neighborhood();
        let ball = layout
            .placements
            .iter()
            .find(|p| p.label.as_deref() == Some(BALL_LABEL))
            .unwrap();
        assert_eq!(ball.transform.translation, Vector3::new(0.0, 3.0, 120.0));

        let oscillation = &layout.oscillations[0];
        assert_eq!(oscillation.axis, Axis::X);
        assert_eq!(oscillation.lower, -20.0);
        assert_eq!(oscillation.upper, 20.0);
        assert_eq!(oscillation.delta, 0.5);
    }

    #[test]
    fn test_model_instances() {
        let layout = neighborhood();
        let instances = |name: &str| {
            layout
                .models
                .iter()
                .find(|m| m.name == name)
                .map(|m| m.instances.clone())
                .unwrap()
        };

        let grass = instances("grass");
        assert_eq!(grass.len(), 12 + 2 + 3);
        assert_eq!(grass[0].translation, Vector3::new(-20.0, -10.0, -40.0));
        assert_eq!(grass[1].translation, Vector3::new(20.0, -10.0, -40.0));
        assert_eq!(grass[12].translation, Vector3::new(60.0, -10.0, 120.0));
        assert_eq!(grass[16].translation, Vector3::new(60.0, -10.0, 200.0));
        assert_eq!(grass[0].scale, Vector3::new(0.1, 0.3, 0.1));

        let benches = instances("bench");
        assert_eq!(benches.len(), 4);
        assert_eq!(benches[3].rotation.y, 0.0);
        assert_eq!(benches[0].rotation.y, -300.0);

        assert_eq!(instances("chicken").len(), 3);
    }

    #[test]
    fn test_textures() {
        assert_eq!(
            neighborhood().texture_paths(),
            vec!["grass.jpg", "woodchips.jpg", "sidewalks.jpg", "bush.jpg"]
        );
    }
}
