//! # Primitive Shape Generation
//!
//! All shapes are Y-up, centered on the origin, and wound counter-clockwise
//! when seen from outside, matching the pipeline's back-face culling.

use super::{cross, normalize_or_up, GeometryData};
use std::f32::consts::PI;

/// Generate a `width × height × depth` box centered at the origin
///
/// Each face has its own four vertices with outward normals and UVs from 0 to 1.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();
    let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);

    #[rustfmt::skip]
    let positions = [
        // Front face
        [-hx, -hy,  hz], [ hx, -hy,  hz], [ hx,  hy,  hz], [-hx,  hy,  hz],
        // Back face
        [-hx, -hy, -hz], [-hx,  hy, -hz], [ hx,  hy, -hz], [ hx, -hy, -hz],
        // Left face
        [-hx, -hy, -hz], [-hx, -hy,  hz], [-hx,  hy,  hz], [-hx,  hy, -hz],
        // Right face
        [ hx, -hy,  hz], [ hx, -hy, -hz], [ hx,  hy, -hz], [ hx,  hy,  hz],
        // Top face
        [-hx,  hy,  hz], [ hx,  hy,  hz], [ hx,  hy, -hz], [-hx,  hy, -hz],
        // Bottom face
        [-hx, -hy, -hz], [ hx, -hy, -hz], [ hx, -hy,  hz], [-hx, -hy,  hz],
    ];

    #[rustfmt::skip]
    let tex_coords = [
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [1.0, 1.0], [1.0, 0.0], [0.0, 0.0], [0.0, 1.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
    ];

    let face_normals = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    for face in 0..6 {
        let base = (face * 4) as u32;
        for corner in 0..4 {
            let i = face * 4 + corner;
            data.push_vertex(positions[i], face_normals[face], tex_coords[i]);
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a UV sphere of the given radius
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `longitude_segments` - Number of vertical segments (at least 3)
/// * `latitude_segments` - Number of horizontal segments (at least 2)
pub fn generate_sphere(
    radius: f32,
    longitude_segments: u32,
    latitude_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 at the north pole
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let normal = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            data.push_vertex(
                [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                normal,
                [long as f32 / long_segs as f32, lat as f32 / lat_segs as f32],
            );
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, first + 1, second]);
            data.indices.extend_from_slice(&[second, first + 1, second + 1]);
        }
    }

    data
}

/// Generate a flat `width × depth` rectangle in the XZ plane facing +Y
///
/// Equivalent to a vertical plane laid down with a -90° turn about X, which is
/// how lawns and sidewalks are authored.
pub fn generate_plane(
    width: f32,
    depth: f32,
    width_segments: u32,
    depth_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let d_segs = depth_segments.max(1);

    for row in 0..=d_segs {
        let v = row as f32 / d_segs as f32;
        let z = (v - 0.5) * depth;

        for column in 0..=w_segs {
            let u = column as f32 / w_segs as f32;
            let x = (u - 0.5) * width;
            data.push_vertex([x, 0.0, z], [0.0, 1.0, 0.0], [u, v]);
        }
    }

    for row in 0..d_segs {
        for column in 0..w_segs {
            let i = row * (w_segs + 1) + column;
            let next_row = i + w_segs + 1;

            data.indices.extend_from_slice(&[i, next_row, i + 1]);
            data.indices.extend_from_slice(&[next_row, next_row + 1, i + 1]);
        }
    }

    data
}

/// Generate a Y-axis cylinder, or a truncated cone when the radii differ
///
/// # Arguments
/// * `radius_top` - Radius of the top cap (0 for a cone tip)
/// * `radius_bottom` - Radius of the bottom cap
/// * `height` - Extent along Y, centered on the origin
/// * `segments` - Number of radial segments (at least 3)
pub fn generate_cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half_height = height * 0.5;
    // Side normals tilt outwards when the shape narrows towards the top.
    let slope = if height.abs() > f32::EPSILON {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };

    for i in 0..=segs {
        let u = i as f32 / segs as f32;
        let (sin_a, cos_a) = (u * 2.0 * PI).sin_cos();
        let normal = normalize_or_up([cos_a, slope, sin_a]);

        data.push_vertex(
            [radius_bottom * cos_a, -half_height, radius_bottom * sin_a],
            normal,
            [u, 1.0],
        );
        data.push_vertex(
            [radius_top * cos_a, half_height, radius_top * sin_a],
            normal,
            [u, 0.0],
        );
    }

    for i in 0..segs {
        let bottom = i * 2;
        let top = bottom + 1;
        let bottom_next = bottom + 2;
        let top_next = bottom + 3;

        data.indices.extend_from_slice(&[bottom, top, bottom_next]);
        data.indices.extend_from_slice(&[top, top_next, bottom_next]);
    }

    if radius_top > 0.0 {
        push_cap(&mut data, radius_top, half_height, segs, true);
    }
    if radius_bottom > 0.0 {
        push_cap(&mut data, radius_bottom, -half_height, segs, false);
    }

    data
}

fn push_cap(data: &mut GeometryData, radius: f32, y: f32, segs: u32, facing_up: bool) {
    let normal = if facing_up { [0.0, 1.0, 0.0] } else { [0.0, -1.0, 0.0] };
    let center = data.push_vertex([0.0, y, 0.0], normal, [0.5, 0.5]);

    let ring_start = data.vertices.len() as u32;
    for i in 0..=segs {
        let (sin_a, cos_a) = (i as f32 / segs as f32 * 2.0 * PI).sin_cos();
        data.push_vertex(
            [radius * cos_a, y, radius * sin_a],
            normal,
            [0.5 + 0.5 * cos_a, 0.5 + 0.5 * sin_a],
        );
    }

    for i in 0..segs {
        let current = ring_start + i;
        let next = current + 1;
        if facing_up {
            data.indices.extend_from_slice(&[center, next, current]);
        } else {
            data.indices.extend_from_slice(&[center, current, next]);
        }
    }
}

/// Generate a single triangle visible from both sides
///
/// The front face keeps the given winding; a second, reversed copy with the
/// opposite normal is emitted so culling never hides it.
pub fn generate_triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> GeometryData {
    let mut data = GeometryData::new();

    let edge1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let edge2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let normal = normalize_or_up(cross(edge1, edge2));
    let back = [-normal[0], -normal[1], -normal[2]];

    // Planar UVs from the triangle's bounding box in its dominant plane.
    let uv = triangle_uvs([a, b, c]);

    let front_a = data.push_vertex(a, normal, uv[0]);
    let front_b = data.push_vertex(b, normal, uv[1]);
    let front_c = data.push_vertex(c, normal, uv[2]);
    data.indices.extend_from_slice(&[front_a, front_b, front_c]);

    let back_a = data.push_vertex(a, back, uv[0]);
    let back_b = data.push_vertex(b, back, uv[1]);
    let back_c = data.push_vertex(c, back, uv[2]);
    data.indices.extend_from_slice(&[back_a, back_c, back_b]);

    data
}

fn triangle_uvs(points: [[f32; 3]; 3]) -> [[f32; 2]; 3] {
    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    for point in &points {
        for axis in 0..3 {
            min[axis] = min[axis].min(point[axis]);
            max[axis] = max[axis].max(point[axis]);
        }
    }
    let extent = [max[0] - min[0], max[1] - min[1], max[2] - min[2]];

    // Project onto the two axes with the largest extent.
    let mut axes = [0usize, 1, 2];
    axes.sort_by(|&l, &r| extent[r].total_cmp(&extent[l]));
    let (u_axis, v_axis) = (axes[0], axes[1]);

    points.map(|point| {
        let u = if extent[u_axis] > 0.0 {
            (point[u_axis] - min[u_axis]) / extent[u_axis]
        } else {
            0.0
        };
        let v = if extent[v_axis] > 0.0 {
            1.0 - (point[v_axis] - min[v_axis]) / extent[v_axis]
        } else {
            0.0
        };
        [u, v]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every triangle's geometric normal agrees with its stored vertex normal.
    fn assert_outward_winding(data: &GeometryData) {
        for triangle in data.indices.chunks_exact(3) {
            let [a, b, c] = [
                data.vertices[triangle[0] as usize],
                data.vertices[triangle[1] as usize],
                data.vertices[triangle[2] as usize],
            ];
            let face = cross(
                [b[0] - a[0], b[1] - a[1], b[2] - a[2]],
                [c[0] - a[0], c[1] - a[1], c[2] - a[2]],
            );
            let stored = data.normals[triangle[0] as usize];
            let alignment = face[0] * stored[0] + face[1] * stored[1] + face[2] * stored[2];
            assert!(alignment >= 0.0, "triangle {:?} winds inwards", triangle);
        }
    }

    #[test]
    fn test_box_generation() {
        let cube = generate_box(1.0, 1.0, 1.0);
        assert_eq!(cube.vertex_count(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.triangle_count(), 12);
        assert_outward_winding(&cube);
    }

    #[test]
    fn test_box_dimensions() {
        let curb = generate_box(4.0, 2.0, 80.0);
        let max_z = curb.vertices.iter().map(|v| v[2]).fold(f32::MIN, f32::max);
        let min_y = curb.vertices.iter().map(|v| v[1]).fold(f32::MAX, f32::min);
        assert_eq!(max_z, 40.0);
        assert_eq!(min_y, -1.0);
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(3.0, 8, 6);
        assert_eq!(sphere.vertex_count(), 9 * 7);
        assert_eq!(sphere.triangle_count(), 8 * 6 * 2);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        assert_eq!(sphere.vertices.len(), sphere.tex_coords.len());
        for v in &sphere.vertices {
            let r = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((r - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_sphere_winds_outwards() {
        // Skip the degenerate pole triangles by checking only the equator band.
        let sphere = generate_sphere(1.0, 16, 8);
        let band = GeometryData {
            indices: sphere.indices[16 * 6 * 3..16 * 6 * 5].to_vec(),
            ..sphere.clone()
        };
        assert_outward_winding(&band);
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertices.len(), 9); // 3x3 grid
        assert_eq!(plane.indices.len(), 24); // 4 quads * 2 triangles * 3 indices
        assert!(plane.vertices.iter().all(|v| v[1] == 0.0));
        assert_outward_winding(&plane);
    }

    #[test]
    fn test_plane_extent() {
        let lawn = generate_plane(120.0, 280.0, 1, 1);
        let xs: Vec<f32> = lawn.vertices.iter().map(|v| v[0]).collect();
        let zs: Vec<f32> = lawn.vertices.iter().map(|v| v[2]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 60.0);
        assert_eq!(zs.iter().cloned().fold(f32::MAX, f32::min), -140.0);
    }

    #[test]
    fn test_cylinder_generation() {
        let pillar = generate_cylinder(1.0, 1.0, 46.0, 32);
        // side ring pairs + two caps (center + ring each)
        assert_eq!(pillar.vertex_count(), 33 * 2 + 2 * (1 + 33));
        assert_eq!(pillar.triangle_count(), 32 * 2 + 32 * 2);
        let max_y = pillar.vertices.iter().map(|v| v[1]).fold(f32::MIN, f32::max);
        assert_eq!(max_y, 23.0);
        assert_outward_winding(&pillar);
    }

    #[test]
    fn test_cone_skips_degenerate_cap() {
        let cone = generate_cylinder(0.0, 5.0, 1.0, 8);
        assert_eq!(cone.vertex_count(), 9 * 2 + (1 + 9));
        assert_outward_winding(&cone);
    }

    #[test]
    fn test_lampshade_normals_lean_up() {
        // Wider at the bottom, so the sides face partly upwards.
        let shade = generate_cylinder(1.0, 5.0, 1.0, 16);
        assert!(shade.normals[0][1] > 0.0);
    }

    #[test]
    fn test_triangle_is_double_sided() {
        let gable = generate_triangle([0.0, 0.0, 0.0], [70.0, 0.0, 0.0], [35.0, 25.0, 0.0]);
        assert_eq!(gable.triangle_count(), 2);
        assert_eq!(gable.normals[0], [0.0, 0.0, 1.0]);
        assert_eq!(gable.normals[3], [0.0, 0.0, -1.0]);
        assert_outward_winding(&gable);
    }

    #[test]
    fn test_triangle_uvs_span_unit_square() {
        let gable = generate_triangle([0.0, 0.0, 0.0], [70.0, 0.0, 0.0], [35.0, 25.0, 0.0]);
        assert_eq!(gable.tex_coords[0], [0.0, 1.0]);
        assert_eq!(gable.tex_coords[1], [1.0, 1.0]);
        assert_eq!(gable.tex_coords[2], [0.5, 0.0]);
    }
}
