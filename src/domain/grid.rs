use crate::domain::entities::cell::CellTriple;

/// Renders coordinate-unique sparse triples as a dense row-major grid.
///
/// Rows with no entries between populated rows come out as zero-length rows;
/// column gaps inside a populated row come out as empty-string placeholders
/// up to that row's last populated column. Rows are never padded to a common
/// width. An empty input yields an empty grid.
pub fn triples_to_grid(triples: &[CellTriple]) -> Vec<Vec<String>> {
    if triples.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&CellTriple> = triples.iter().collect();
    sorted.sort();

    let mut grid = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut previous_row = 0;
    for triple in sorted {
        if triple.row != previous_row {
            grid.push(std::mem::take(&mut current));
            for _ in previous_row + 1..triple.row {
                grid.push(Vec::new());
            }
            previous_row = triple.row;
        }
        while current.len() < triple.col {
            current.push(String::new());
        }
        current.push(triple.value.clone());
    }
    grid.push(current);
    grid
}

/// Inverse of [`triples_to_grid`] on its range: emits (row, col, value) for
/// every non-empty cell, row-major. Trailing structure that carried no
/// non-empty value (empty rows, placeholder runs) is deliberately dropped,
/// so `triples_to_grid(grid_to_triples(g))` need not reproduce `g`.
pub fn grid_to_triples(grid: &[Vec<String>]) -> Vec<CellTriple> {
    grid.iter()
        .enumerate()
        .flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, value)| !value.is_empty())
                .map(move |(col, value)| CellTriple::new(row, col, value.clone()))
        })
        .collect()
}
