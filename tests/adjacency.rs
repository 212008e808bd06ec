mod common;

use common::*;
use nalgebra::{Point2, Point3, Vector3};
use stripbake::{Adjacency, EdgeKey, Error, Triangle, TriangleId, Vertex};

#[test]
fn quad_links_across_the_diagonal() {
    let soup = quad();
    let adjacency = Adjacency::build(triangles(&soup)).unwrap();

    assert_eq!(adjacency.len(), 2);
    assert_eq!(adjacency.open_edges(), 4);

    let neighbors: Vec<_> = adjacency.neighbors(TriangleId(0)).collect();
    assert_eq!(neighbors.len(), 1);
    let (edge, other) = neighbors[0];
    assert_eq!(other, TriangleId(1));
    let edge_indices: Vec<u32> = edge.vertices().iter().map(|v| v.index).collect();
    assert_eq!(edge_indices, [0, 2]);

    assert_eq!(
        adjacency.neighbor_across(TriangleId(1), &edge),
        Some(TriangleId(0))
    );
}

#[test]
fn edge_keys_are_unordered() {
    let soup = quad();
    let tris = triangles(&soup);
    let [a, b, ..] = *tris[0].vertices();
    assert_eq!(EdgeKey::new(a, b), EdgeKey::new(b, a));
}

#[test]
fn open_fan_is_a_path() {
    let adjacency = Adjacency::build(triangles(&open_fan(4))).unwrap();
    let degree = |i| adjacency.neighbors(TriangleId(i)).count();
    assert_eq!([degree(0), degree(1), degree(2), degree(3)], [1, 2, 2, 1]);
    // 3 spokes are shared, 2 spokes and 4 rim edges are not
    assert_eq!(adjacency.open_edges(), 6);
}

#[test]
fn closed_fan_is_fully_connected() {
    let adjacency = Adjacency::build(triangles(&closed_fan())).unwrap();
    for i in 0..3 {
        let mut neighbors: Vec<_> = adjacency.neighbors(TriangleId(i)).map(|(_, n)| n).collect();
        neighbors.sort();
        let expected: Vec<_> = (0..3).filter(|&j| j != i).map(TriangleId).collect();
        assert_eq!(neighbors, expected);
    }
}

#[test]
fn direction_usage_counts_every_corner() {
    let adjacency = Adjacency::build(triangles(&grid(2, 2))).unwrap();
    let usage = adjacency.direction_usage();
    // every vertex of the fixture shares one normal and one tangent
    assert_eq!(usage.len(), 2);
    assert_eq!(usage.total(), 8 * 3 * 2);
    assert_eq!(usage.count(&Vector3::z()), 8 * 3);
    assert_eq!(usage.count(&Vector3::x()), 8 * 3);
    assert_eq!(usage.count(&Vector3::y()), 0);
}

#[test]
fn distinct_attributes_make_distinct_vertices() {
    // two triangles with coincident positions but different uvs along their shared edge
    let mut soup = quad();
    soup.uvs[2] = Point2::new(0.5, 0.5);
    soup.positions.push(soup.positions[2]);
    soup.normals.push(Vector3::z());
    soup.tangents.push(Vector3::x());
    soup.uvs.push(Point2::new(1.0, 1.0));
    soup.faces[1] = [0, 4, 3];

    let adjacency = Adjacency::build(triangles(&soup)).unwrap();
    assert_eq!(adjacency.neighbors(TriangleId(0)).count(), 0);
    assert_eq!(adjacency.open_edges(), 6);
}

#[test]
fn non_manifold_edge() {
    let mut soup = quad();
    let below = soup_vertex(&mut soup, 1.0, -1.0, 0.0);
    soup.push_face([0, below, 2]);
    match Adjacency::build(triangles(&soup)) {
        Err(Error::NonManifoldEdge { triangles, .. }) => {
            assert_eq!(triangles, [TriangleId(0), TriangleId(1), TriangleId(2)])
        }
        res => panic!("expected a non-manifold edge, got {res:?}"),
    }
}

#[test]
fn degenerate_triangle() {
    let mut soup = quad();
    let midpoint = soup_vertex(&mut soup, 0.5, 0.0, 0.0);
    soup.push_face([0, midpoint, 1]);
    assert!(matches!(
        Adjacency::build(triangles(&soup)),
        Err(Error::DegenerateTriangle(TriangleId(2)))
    ));
}

#[test]
fn triangle_ids_must_be_dense() {
    let v = |i: u32, x: f32, y: f32| {
        Vertex::new(
            i,
            Point3::new(x, y, 0.0),
            Vector3::z(),
            Vector3::x(),
            Point2::new(x, y),
        )
    };
    let tri = Triangle::from_corners(TriangleId(5), [v(0, 0.0, 0.0), v(1, 1.0, 0.0), v(2, 0.0, 1.0)]);
    assert!(matches!(
        Adjacency::build(vec![tri]),
        Err(Error::NonDenseTriangleId { slot: 0, id: TriangleId(5) })
    ));
}

#[test]
fn signed_zero_attributes_are_the_same_vertex() {
    let soup = quad();
    let mut tris = triangles(&soup);
    let second = &tris[1];
    let mut corners = *second.vertices();
    for v in corners.iter_mut().filter(|v| v.index == 0) {
        v.position.x = -0.0;
        v.tangent.z = -0.0;
    }
    let second = Triangle::new(second.id(), corners, *second.normal());
    tris[1] = second;
    assert_eq!(tris[0].vertices()[0], corners[0]);

    let adjacency = Adjacency::build(tris).unwrap();
    assert_eq!(adjacency.neighbors(TriangleId(0)).count(), 1);
    assert_eq!(adjacency.open_edges(), 4);
    // +0 and -0 count as one direction
    assert_eq!(adjacency.direction_usage().len(), 2);
}
