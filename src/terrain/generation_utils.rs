// src/terrain/generation_utils.rs

/// Material blend weight for a relative height `h` in [0, 1].
///
/// Below `first` the ground material shows (0.0), between the thresholds
/// (inclusive) the two blend (0.5), above `second` the top material (1.0).
pub fn blend_weight(h: f64, first: f64, second: f64) -> f32 {
    if h < first {
        0.0
    } else if h <= second {
        0.5
    } else {
        1.0
    }
}

/// Row-major vertex index in a grid with `columns + 1` vertices per row.
#[inline]
pub fn grid_index(row: u32, column: u32, columns: u32) -> u32 {
    row * (columns + 1) + column
}

/// Triangle count for a grid of `rows` x `columns` quads: two per quad.
pub fn triangle_count(rows: u32, columns: u32) -> usize {
    2 * rows as usize * columns as usize
}

/// Builds the index buffer for a `rows` x `columns` quad grid.
///
/// Triangles are emitted while walking the lower row of each quad strip:
///
/// ```text
///     j = 0,   1,   2,   3  ...
/// i-1:    +----+----+----+- ...
///         |   /|   /|   /|
///         |  / |  / |  / |
///         | /  | /  | /  |
/// i:      +----+----+----+- ...
/// ```
///
/// Column 0 contributes the upper-left triangle of the first quad; every later
/// column closes the previous quad and, unless it is the last column, opens
/// the next one. Winding must stay exactly like this so faces along chunk
/// edges keep pointing the same way.
pub fn build_triangle_indices(rows: u32, columns: u32) -> Vec<u32> {
    let mut indices = Vec::with_capacity(triangle_count(rows, columns) * 3);

    for i in 1..=rows {
        for j in 0..=columns {
            let above = grid_index(i - 1, j, columns);
            let here = grid_index(i, j, columns);

            if j == 0 {
                indices.extend_from_slice(&[above, here, above + 1]);
            } else {
                indices.extend_from_slice(&[above, here - 1, here]);

                if j < columns {
                    indices.extend_from_slice(&[above, here, above + 1]);
                }
            }
        }
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_weight_thresholds_are_inclusive_in_the_middle() {
        assert_eq!(blend_weight(0.1, 0.3, 0.6), 0.0);
        assert_eq!(blend_weight(0.3, 0.3, 0.6), 0.5);
        assert_eq!(blend_weight(0.45, 0.3, 0.6), 0.5);
        assert_eq!(blend_weight(0.6, 0.3, 0.6), 0.5);
        assert_eq!(blend_weight(0.61, 0.3, 0.6), 1.0);
    }

    #[test]
    fn equal_thresholds_leave_a_single_blend_value() {
        assert_eq!(blend_weight(0.49, 0.5, 0.5), 0.0);
        assert_eq!(blend_weight(0.5, 0.5, 0.5), 0.5);
        assert_eq!(blend_weight(0.51, 0.5, 0.5), 1.0);
    }

    #[test]
    fn single_row_two_columns_matches_hand_derived_sequence() {
        // Vertices 0 1 2 on top, 3 4 5 below
        assert_eq!(
            build_triangle_indices(1, 2),
            vec![0, 3, 1, 1, 3, 4, 1, 4, 2, 2, 4, 5]
        );
    }

    #[test]
    fn single_quad_gets_two_triangles() {
        assert_eq!(build_triangle_indices(1, 1), vec![0, 2, 1, 1, 2, 3]);
    }

    #[test]
    fn two_by_two_grid_sequence() {
        // 0 1 2 / 3 4 5 / 6 7 8
        let expected = vec![
            0, 3, 1, 1, 3, 4, 1, 4, 2, 2, 4, 5, //
            3, 6, 4, 4, 6, 7, 4, 7, 5, 5, 7, 8,
        ];
        assert_eq!(build_triangle_indices(2, 2), expected);
    }

    #[test]
    fn index_count_is_six_per_quad() {
        for (rows, columns) in [(1, 1), (1, 5), (3, 2), (7, 4), (10, 10)] {
            let indices = build_triangle_indices(rows, columns);
            assert_eq!(indices.len(), 6 * rows as usize * columns as usize);
            assert_eq!(indices.len() / 3, triangle_count(rows, columns));
            let max = (rows + 1) * (columns + 1);
            assert!(indices.iter().all(|&i| i < max));
        }
    }

    #[test]
    fn every_quad_is_covered_exactly_once() {
        let rows = 3;
        let columns = 4;
        let indices = build_triangle_indices(rows, columns);
        let mut covered = vec![0u32; (rows * columns) as usize];

        for tri in indices.chunks(3) {
            // Each triangle spans one quad; its top-left vertex identifies it
            let min_row = tri.iter().map(|&v| v / (columns + 1)).min().unwrap();
            let min_col = tri.iter().map(|&v| v % (columns + 1)).min().unwrap();
            covered[(min_row * columns + min_col) as usize] += 1;
        }

        assert!(covered.iter().all(|&n| n == 2));
    }
}
