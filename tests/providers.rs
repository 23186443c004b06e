use std::rc::Rc;

use tilegrid_wasm::providers::{
    FlickerProvider, SnakeProvider, StaticProvider, TetrisProvider, TETRIS_COLUMNS, TETRIS_ROWS,
};
use tilegrid_wasm::{GridGeometry, TextMask, VisibilityProvider};

fn geometry() -> GridGeometry {
    GridGeometry::new(100, 100, 4.0, 6.0)
}

/// 3x2 mask at (2, 1) with the middle column off.
fn mask() -> Rc<TextMask> {
    Rc::new(TextMask::new(3, 2, vec![true, false, true, true, false, true], 2, 1).unwrap())
}

#[test]
fn snake_keeps_length_and_moves_along_direction() {
    let mut snake = SnakeProvider::default();
    snake.initialize(&geometry(), None);
    assert_eq!(snake.head(), (5, 5));
    assert_eq!(snake.len(), 1);

    for n in 1..=7 {
        snake.advance(0.016);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), (5 + n, 5));
    }
    assert!(snake.is_visible(12, 5));
    assert!(!snake.is_visible(5, 5));
    assert_eq!(snake.opacity(12, 5), 1.0);
    assert_eq!(snake.opacity(11, 5), 0.0);
}

#[test]
fn snake_follows_new_direction_and_resets_on_initialize() {
    let mut snake = SnakeProvider::new((0, 0), (0, 1));
    snake.advance(0.1);
    snake.set_direction((-1, 0));
    snake.advance(0.1);
    assert_eq!(snake.head(), (-1, 1));
    assert_eq!(snake.segments().collect::<Vec<_>>(), vec![(-1, 1)]);

    snake.initialize(&geometry(), None);
    assert_eq!(snake.head(), (0, 0));
    assert_eq!(snake.direction(), (0, 1));
}

#[test]
fn snake_state_is_per_instance() {
    let mut a = SnakeProvider::default();
    let b = SnakeProvider::default();
    a.advance(0.1);
    assert_eq!(a.head(), (6, 5));
    assert_eq!(b.head(), (5, 5));
}

#[test]
fn tetris_outside_board_is_never_visible() {
    let mut tetris = TetrisProvider::new();
    tetris.initialize(&geometry(), None);
    for y in 0..TETRIS_ROWS {
        for x in 0..TETRIS_COLUMNS {
            assert!(tetris.set_cell(x, y, true));
        }
    }
    assert!(tetris.is_visible(0, 0));
    assert!(tetris.is_visible(9, 19));
    for &(x, y) in &[(10, 0), (0, 20), (-1, 0), (0, -1), (10, 20), (i32::MAX, 3)] {
        assert!(!tetris.is_visible(x, y), "({x}, {y})");
    }
    assert!(!tetris.set_cell(10, 0, true));
}

#[test]
fn tetris_board_starts_empty_and_advance_does_nothing() {
    let mut tetris = TetrisProvider::new();
    tetris.set_cell(3, 4, true);
    tetris.initialize(&geometry(), None);
    assert!(!tetris.is_visible(3, 4));

    tetris.set_cell(3, 4, true);
    tetris.advance(1.0);
    assert!(tetris.is_visible(3, 4));
    assert!(tetris.cell(3, 4));
    assert!(!tetris.is_visible(4, 4));
}

#[test]
fn static_provider_draws_mask_at_tile_opacity() {
    let mut provider = StaticProvider::new(0.6);
    provider.initialize(&geometry(), Some(mask()));
    assert_eq!(provider.opacity(2, 1), 0.6);
    assert_eq!(provider.opacity(3, 1), 0.0);
    assert_eq!(provider.opacity(4, 2), 0.6);
    assert_eq!(provider.opacity(5, 1), 0.0);

    provider.initialize(&geometry(), None);
    assert!(!provider.is_visible(2, 1));
}

#[test]
fn flicker_is_confined_to_the_mask() {
    let mut flicker = FlickerProvider::new(0.3, 1.0, 11);
    flicker.initialize(&geometry(), Some(mask()));
    let field = flicker.field().unwrap();

    assert!(flicker.is_visible(2, 1));
    assert!(!flicker.is_visible(3, 1));
    assert!(!flicker.is_visible(0, 0));
    assert_eq!(flicker.opacity(2, 1), f64::from(field.get(2, 1).unwrap()));
    assert_eq!(flicker.opacity(3, 1), 0.0);
    assert_eq!(flicker.opacity(0, 0), 0.0);
}

#[test]
fn flicker_without_mask_uses_raw_field() {
    let mut flicker = FlickerProvider::new(0.3, 1.0, 12);
    flicker.initialize(&geometry(), None);
    let field = flicker.field().unwrap().clone();
    for y in 0..10 {
        for x in 0..10 {
            assert!(flicker.is_visible(x, y));
            assert_eq!(flicker.opacity(x, y), f64::from(field.get(x, y).unwrap()));
        }
    }
    assert!(!flicker.is_visible(10, 0));
}

#[test]
fn flicker_reshape_replaces_the_field() {
    let mut flicker = FlickerProvider::new(0.3, 1.0, 13);
    flicker.initialize(&geometry(), None);
    assert_eq!(flicker.field().unwrap().len(), 100);

    let bigger = GridGeometry::new(200, 50, 4.0, 6.0);
    flicker.reshape(&bigger, Some(mask()));
    let field = flicker.field().unwrap();
    assert!(field.matches(&bigger));
    assert_eq!(field.len(), 20 * 5);
    assert!(!flicker.is_visible(0, 0));
}

#[test]
fn flicker_advance_changes_field_with_saturated_chance() {
    let mut flicker = FlickerProvider::new(1e9, 1.0, 14);
    flicker.initialize(&geometry(), None);
    let before = flicker.field().unwrap().values().to_vec();
    flicker.advance(1.0);
    assert_ne!(flicker.field().unwrap().values(), &before[..]);
}
