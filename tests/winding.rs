mod common;

use common::*;
use stripbake::{
    Adjacency, ChainDirection, Error, TriangleId, Winding, WindingResolver,
};

#[test]
fn winding_of_a_face() {
    let soup = quad();
    let tris = triangles(&soup);
    let [a, b, c] = tris[0].vertices();
    let normal = tris[0].normal();
    assert_eq!(Winding::of([a, b, c], normal), Winding::CounterClockwise);
    assert_eq!(Winding::of([a, c, b], normal), Winding::Clockwise);
    assert_eq!(Winding::of([a, b, c], &-normal), Winding::Clockwise);
    assert_eq!(Winding::Clockwise.reversed(), Winding::CounterClockwise);
    assert_eq!(Winding::default(), Winding::Clockwise);
}

#[test]
fn single_triangle() {
    let adjacency = Adjacency::build(triangles(&quad())).unwrap();
    let cw = WindingResolver::new(&adjacency, Winding::Clockwise).order_single(TriangleId(0));
    assert_eq!(indices(&cw), [0, 2, 1]);
    let ccw =
        WindingResolver::new(&adjacency, Winding::CounterClockwise).order_single(TriangleId(0));
    assert_eq!(indices(&ccw), [0, 1, 2]);
}

#[test]
fn pair_puts_shared_edge_in_the_middle() {
    let tris = triangles(&quad());
    let adjacency = Adjacency::build(tris.clone()).unwrap();
    for (target, expected) in [
        (Winding::Clockwise, [1, 0, 2, 3]),
        (Winding::CounterClockwise, [1, 2, 0, 3]),
    ] {
        let strip = WindingResolver::new(&adjacency, target)
            .order_pair(TriangleId(0), TriangleId(1))
            .unwrap();
        assert_eq!(indices(&strip), expected);
        assert_eq!(strip.triangles(), ids(&[0, 1]));
        assert!(strip_is_valid(&strip, &tris, target));
    }
}

#[test]
fn pair_needs_a_shared_edge() {
    let adjacency = Adjacency::build(triangles(&open_fan(3))).unwrap();
    let resolver = WindingResolver::new(&adjacency, Winding::Clockwise);
    assert!(matches!(
        resolver.order_pair(TriangleId(0), TriangleId(2)),
        Err(Error::NotAdjacent(TriangleId(0), TriangleId(2)))
    ));
}

#[test]
fn chain_through_a_fan() {
    let tris = triangles(&open_fan(3));
    let adjacency = Adjacency::build(tris.clone()).unwrap();
    for target in [Winding::Clockwise, Winding::CounterClockwise] {
        let resolver = WindingResolver::new(&adjacency, target);
        let strip = resolver.order_chain(&ids(&[0, 1, 2])).unwrap();
        assert_eq!(strip.len(), 5);
        assert_eq!(indices(&strip)[2], 0, "the fan center is shared by all three");
        assert!(strip_is_valid(&strip, &tris, target));
    }

    // ccw fans wind the right way from their first triangle, cw ones from their last
    let resolver = WindingResolver::new(&adjacency, Winding::Clockwise);
    assert_eq!(indices(&resolver.order_chain(&ids(&[0, 1, 2])).unwrap()), [4, 3, 0, 2, 1]);
    assert_eq!(
        resolver.chain_direction(&ids(&[0, 1, 2])).unwrap(),
        Some(ChainDirection::Reversed)
    );
    let resolver = WindingResolver::new(&adjacency, Winding::CounterClockwise);
    assert_eq!(indices(&resolver.order_chain(&ids(&[0, 1, 2])).unwrap()), [1, 2, 0, 3, 4]);
    assert_eq!(
        resolver.chain_direction(&ids(&[0, 1, 2])).unwrap(),
        Some(ChainDirection::Forward)
    );
}

#[test]
fn chain_too_short() {
    let adjacency = Adjacency::build(triangles(&quad())).unwrap();
    let resolver = WindingResolver::new(&adjacency, Winding::Clockwise);
    assert!(matches!(
        resolver.order_chain(&ids(&[0, 1])),
        Err(Error::ChainTooShort(2))
    ));
}

#[test]
fn closed_fan_is_not_a_strip() {
    let adjacency = Adjacency::build(triangles(&closed_fan())).unwrap();
    let resolver = WindingResolver::new(&adjacency, Winding::Clockwise);
    assert!(matches!(
        resolver.order_chain(&ids(&[0, 1, 2])),
        Err(Error::UnresolvableChainStart(_))
    ));
}

#[test]
fn even_chains_resolve_from_both_ends_or_neither() {
    // strip 3 0 4 1 5 2 along a row of two cells
    let tris = triangles(&grid(2, 1));
    let adjacency = Adjacency::build(tris.clone()).unwrap();
    let chain = ids(&[1, 0, 3, 2]);

    let cw = WindingResolver::new(&adjacency, Winding::Clockwise);
    assert_eq!(cw.chain_direction(&chain).unwrap(), None);
    assert!(matches!(
        cw.order_chain(&chain),
        Err(Error::UnresolvableChainStart(_))
    ));

    let ccw = WindingResolver::new(&adjacency, Winding::CounterClockwise);
    assert_eq!(ccw.chain_direction(&chain).unwrap(), Some(ChainDirection::Forward));
    let strip = ccw.order_chain(&chain).unwrap();
    assert_eq!(indices(&strip), [3, 0, 4, 1, 5, 2]);
    assert!(strip_is_valid(&strip, &tris, Winding::CounterClockwise));
}
