use std::collections::HashSet;

use tilegrid_wasm::GridGeometry;

#[test]
fn columns_and_rows_round_up() {
    let g = GridGeometry::new(800, 600, 4.0, 6.0);
    assert_eq!(g.pitch(), 10.0);
    assert_eq!((g.columns, g.rows), (80, 60));

    let g = GridGeometry::new(801, 591, 4.0, 6.0);
    assert_eq!((g.columns, g.rows), (81, 60));
}

#[test]
fn empty_canvas_has_no_tiles() {
    let g = GridGeometry::new(0, 0, 4.0, 6.0);
    assert_eq!(g.tile_count(), 0);
    assert!(!g.contains(0, 0));
    assert_eq!(g.index(0, 0), None);
}

#[test]
fn tiles_start_inside_the_canvas() {
    for &(w, h, size, gap) in &[(800, 600, 4.0, 6.0), (333, 97, 3.0, 2.5), (1, 1, 4.0, 6.0), (1920, 1080, 7.0, 0.0)] {
        let g = GridGeometry::new(w, h, size, gap);
        assert_eq!(g.columns, (f64::from(w) / g.pitch()).ceil() as u32);
        assert_eq!(g.rows, (f64::from(h) / g.pitch()).ceil() as u32);
        for y in 0..g.rows {
            for x in 0..g.columns {
                let (cx, cy) = g.center(x, y);
                let (left, top) = (cx - size / 2.0, cy - size / 2.0);
                assert!(left >= 0.0 && left < f64::from(w), "x={x} left={left} w={w}");
                assert!(top >= 0.0 && top < f64::from(h), "y={y} top={top} h={h}");
            }
        }
    }
}

#[test]
fn tile_centers_and_indices_are_unique() {
    let g = GridGeometry::new(95, 47, 4.0, 6.0);
    let mut centers = HashSet::new();
    let mut indices = HashSet::new();
    for y in 0..g.rows {
        for x in 0..g.columns {
            let (cx, cy) = g.center(x, y);
            assert!(centers.insert((cx.to_bits(), cy.to_bits())));
            assert!(indices.insert(g.index(x as i32, y as i32).unwrap()));
        }
    }
    assert_eq!(indices.len(), g.tile_count());
    assert_eq!(g.center(2, 3), (22.0, 32.0));
    assert_eq!(g.index(-1, 0), None);
    assert_eq!(g.index(g.columns as i32, 0), None);
}
