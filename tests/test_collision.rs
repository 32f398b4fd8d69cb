use std::path::Path;

use cookies_for_cletus::assets::{Image, Sprite};
use cookies_for_cletus::capabilities::Body;
use cookies_for_cletus::collision::{collide, Mask};

use proptest::prelude::*;

fn sprite(art: &str) -> Sprite {
    Sprite::new(Image::parse(Path::new("test"), art).unwrap())
}

fn body(x: i32, y: i32, art: &str) -> Body {
    Body::new(x, y, sprite(art))
}

/// Sprite text from a grid of booleans.
fn art(width: usize, cells: &[bool]) -> String {
    cells
        .chunks(width)
        .map(|row| row.iter().map(|&on| if on { '#' } else { '.' }).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Mask ──────────────────────────────────────────────────────────────────────

#[test]
fn mask_marks_opaque_pixels_only() {
    let image = Image::parse(Path::new("test"), "#.\n.#").unwrap();
    let mask = Mask::from_image(&image);
    assert!(mask.get(0, 0));
    assert!(!mask.get(1, 0));
    assert!(!mask.get(0, 1));
    assert!(mask.get(1, 1));
    assert_eq!(mask.count(), 2);
}

#[test]
fn mask_out_of_bounds_is_clear() {
    let mut mask = Mask::new(3, 3);
    mask.set(-1, 0);
    mask.set(3, 3);
    assert_eq!(mask.count(), 0);
    assert!(!mask.get(-1, 0));
    assert!(!mask.get(0, 5));
}

#[test]
fn mask_spanning_several_words() {
    let mut mask = Mask::new(100, 3);
    mask.set(99, 2);
    mask.set(63, 0);
    mask.set(64, 0);
    assert!(mask.get(99, 2));
    assert!(mask.get(63, 0));
    assert!(mask.get(64, 0));
    assert_eq!(mask.count(), 3);
}

#[test]
fn overlap_uses_offset() {
    let a = Mask::from_image(&Image::parse(Path::new("a"), "#...").unwrap());
    let b = Mask::from_image(&Image::parse(Path::new("b"), "#").unwrap());
    assert!(a.overlap(&b, (0, 0)));
    assert!(!a.overlap(&b, (1, 0)));
    assert!(!a.overlap(&b, (0, 1)));
    assert!(!a.overlap(&b, (-1, 0)));
}

// ── collide ───────────────────────────────────────────────────────────────────

#[test]
fn identical_solid_bodies_collide() {
    let a = body(10, 10, "##\n##");
    let b = body(10, 10, "##\n##");
    assert!(collide(&a, &b));
}

#[test]
fn bounding_boxes_overlap_but_pixels_do_not() {
    // Diagonal halves of a 3x3 box that never share a pixel
    let a = body(0, 0, "#..\n##.\n###");
    let b = body(0, 0, ".##\n..#\n...");
    assert!(!collide(&a, &b));
    assert!(!collide(&b, &a));
}

#[test]
fn touching_edges_do_not_collide() {
    let a = body(0, 0, "##\n##");
    let b = body(2, 0, "##\n##");
    assert!(!collide(&a, &b));

    let c = body(1, 1, "##\n##");
    assert!(collide(&a, &c));
}

#[test]
fn negative_offsets_are_handled() {
    let a = body(5, 5, "###\n###\n###");
    let b = body(3, 3, "###\n###\n###");
    assert!(collide(&a, &b));
    let far = body(-10, -10, "###");
    assert!(!collide(&a, &far));
}

#[test]
fn rebinding_a_sprite_swaps_its_mask() {
    let mut a = body(0, 0, "#.\n..");
    let b = body(0, 0, ".#\n..");
    assert!(!collide(&a, &b));
    a.set_sprite(sprite("##\n.."));
    assert!(collide(&a, &b));
}

// ── symmetry ──────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn collide_is_symmetric(
        a_cells in prop::collection::vec(any::<bool>(), 6 * 5),
        b_cells in prop::collection::vec(any::<bool>(), 4 * 7),
        ax in -8i32..8,
        ay in -8i32..8,
        bx in -8i32..8,
        by in -8i32..8,
    ) {
        let a_art = art(6, &a_cells);
        let b_art = art(4, &b_cells);
        // Sprites with no opaque pixel are rejected at load
        prop_assume!(a_cells.iter().any(|&c| c) && b_cells.iter().any(|&c| c));

        let a = body(ax, ay, &a_art);
        let b = body(bx, by, &b_art);
        prop_assert_eq!(collide(&a, &b), collide(&b, &a));
    }

    #[test]
    fn overlap_matches_brute_force(
        a_cells in prop::collection::vec(any::<bool>(), 5 * 5),
        b_cells in prop::collection::vec(any::<bool>(), 5 * 5),
        dx in -6i32..6,
        dy in -6i32..6,
    ) {
        prop_assume!(a_cells.iter().any(|&c| c) && b_cells.iter().any(|&c| c));
        let a = Mask::from_image(&Image::parse(Path::new("a"), &art(5, &a_cells)).unwrap());
        let b = Mask::from_image(&Image::parse(Path::new("b"), &art(5, &b_cells)).unwrap());

        let mut expected = false;
        for y in 0..5 {
            for x in 0..5 {
                if a_cells[y * 5 + x] && b.get(x as i32 - dx, y as i32 - dy) {
                    expected = true;
                }
            }
        }
        prop_assert_eq!(a.overlap(&b, (dx, dy)), expected);
    }
}
