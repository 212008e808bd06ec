//! Mesh fixtures shared by the integration tests.
#![allow(dead_code)]

use std::f32::consts::PI;

use nalgebra::{Point2, Point3, Vector3};
use stripbake::{MeshSource, Strip, Triangle, TriangleId, TriangleSoup, Vertex, Winding};

pub fn soup_vertex(soup: &mut TriangleSoup, x: f32, y: f32, z: f32) -> u32 {
    soup.push_vertex(
        Point3::new(x, y, z),
        Vector3::z(),
        Vector3::x(),
        Point2::new(x, y),
    )
}

pub fn triangles(soup: &TriangleSoup) -> Vec<Triangle> {
    soup.triangles().expect("fixture meshes are well formed")
}

/// The unit square, split along its diagonal from vertex 0 to vertex 2.
///
/// ```text
/// 3 --- 2
/// |   / |
/// | /   |
/// 0 --- 1
/// ```
pub fn quad() -> TriangleSoup {
    let mut soup = TriangleSoup::new();
    for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
        soup_vertex(&mut soup, x, y, 0.0);
    }
    soup.push_face([0, 1, 2]);
    soup.push_face([0, 2, 3]);
    soup
}

/// `n` triangles around vertex 0, spread over a half disc; the first and last are not adjacent.
pub fn open_fan(n: usize) -> TriangleSoup {
    let mut soup = TriangleSoup::new();
    soup_vertex(&mut soup, 0.0, 0.0, 0.0);
    for i in 0..=n {
        let angle = i as f32 * PI / n as f32;
        soup_vertex(&mut soup, angle.cos(), angle.sin(), 0.0);
    }
    for i in 0..n as u32 {
        soup.push_face([0, i + 1, i + 2]);
    }
    soup
}

/// Three triangles around an apex, each adjacent to both others; a tetrahedron without its base.
pub fn closed_fan() -> TriangleSoup {
    let mut soup = TriangleSoup::new();
    soup_vertex(&mut soup, 0.0, 0.0, 1.0);
    for i in 0..3 {
        let angle = i as f32 * 2.0 * PI / 3.0;
        soup_vertex(&mut soup, angle.cos(), angle.sin(), 0.0);
    }
    soup.push_face([0, 1, 2]);
    soup.push_face([0, 2, 3]);
    soup.push_face([0, 3, 1]);
    soup
}

/// A `w` by `h` grid of unit cells, each split into two triangles.
///
/// Vertex `(i, j)` has index `j * (w + 1) + i`; cell `(i, j)` yields triangles `2 * (j * w + i)` and
/// `2 * (j * w + i) + 1`.
pub fn grid(w: u32, h: u32) -> TriangleSoup {
    let mut soup = TriangleSoup::new();
    for j in 0..=h {
        for i in 0..=w {
            soup_vertex(&mut soup, i as f32, j as f32, 0.0);
        }
    }
    let index = |i: u32, j: u32| j * (w + 1) + i;
    for j in 0..h {
        for i in 0..w {
            let [a, b, c, d] = [
                index(i, j),
                index(i + 1, j),
                index(i + 1, j + 1),
                index(i, j + 1),
            ];
            soup.push_face([a, b, c]);
            soup.push_face([a, c, d]);
        }
    }
    soup
}

pub fn ids(ids: &[u32]) -> Vec<TriangleId> {
    ids.iter().copied().map(TriangleId).collect()
}

pub fn indices(strip: &Strip) -> Vec<u32> {
    strip.vertices().iter().map(|v| v.index).collect()
}

/// Whether each triangle of `strip` has the vertices of the triangle it claims to be, and the
/// windings alternate starting from `target`.
pub fn strip_is_valid(strip: &Strip, triangles: &[Triangle], target: Winding) -> bool {
    let mut expected = target;
    for (id, window) in strip.windows() {
        let tri = &triangles[id.index()];
        if !window.iter().all(|v| tri.contains(v)) || Winding::of(window, tri.normal()) != expected {
            return false;
        }
        expected = expected.reversed();
    }
    strip.len() == strip.triangle_count() + 2
}

/// A strip of `len` vertices that covers made-up triangles; enough to test packing.
pub fn dummy_strip(len: usize) -> Strip {
    let vertices = (0..len as u32)
        .map(|i| {
            Vertex::new(
                i,
                Point3::new(i as f32, 0.0, 0.0),
                Vector3::z(),
                Vector3::x(),
                Point2::origin(),
            )
        })
        .collect();
    let triangles = (0..len as u32 - 2).map(TriangleId).collect();
    Strip::new(vertices, triangles)
}
