use crate::container::Bin;

const MAX_WIDTH: f64 = 80.0;
const MAX_HEIGHT: f64 = 40.0;

/// Top-down view of a bin: length runs left to right, breadth top to bottom.
/// Items stacked along the height axis are drawn over each other.
pub fn render_bin(bin: &Bin) -> String {
    let dims = bin.dimensions();
    let scale = f64::min(MAX_WIDTH / dims.length, MAX_HEIGHT / dims.breadth);
    let grid_w = (dims.length * scale).round() as usize;
    let grid_h = (dims.breadth * scale).round() as usize;

    if grid_w == 0 || grid_h == 0 {
        return String::new();
    }

    let mut grid = vec![vec![' '; grid_w + 1]; grid_h + 1];

    draw_rect(&mut grid, 0, 0, grid_w, grid_h);

    for item in bin.fitted_items() {
        let pos = item.position();
        let dim = item.dimension();
        let sx = (pos.x * scale).round() as usize;
        let sy = (pos.z * scale).round() as usize;
        let sw = (dim.length * scale).round() as usize;
        let sh = (dim.breadth * scale).round() as usize;

        if sw == 0 || sh == 0 {
            continue;
        }

        draw_rect(&mut grid, sx, sy, sw, sh);

        let label: Vec<char> = item.id().chars().collect();
        if sw > 2 && sh > 1 {
            let cx = sx + sw / 2;
            let cy = sy + sh / 2;
            let start_x = cx.saturating_sub(label.len() / 2);

            for (i, &ch) in label.iter().enumerate() {
                let x = start_x + i;
                if x > sx && x < sx + sw && cy > sy && cy < sy + sh {
                    grid[cy][x] = ch;
                }
            }
        }
    }

    let mut result = String::new();
    for row in &grid {
        let line: String = row.iter().collect();
        result.push_str(line.trim_end());
        result.push('\n');
    }
    result
}

fn mark(cell: &mut char, edge: char) {
    *cell = match *cell {
        '+' => '+',
        '-' | '|' if *cell != edge => '+',
        _ => edge,
    };
}

fn draw_rect(grid: &mut [Vec<char>], x: usize, y: usize, w: usize, h: usize) {
    let rows = grid.len();
    let cols = match grid.first() {
        Some(row) => row.len(),
        None => return,
    };

    for i in x..=x + w {
        if i >= cols {
            break;
        }
        for j in [y, y + h] {
            if j < rows {
                mark(&mut grid[j][i], '-');
            }
        }
    }

    for j in y..=y + h {
        if j >= rows {
            break;
        }
        for i in [x, x + w] {
            if i < cols {
                mark(&mut grid[j][i], '|');
            }
        }
    }

    for cx in [x, x + w] {
        for cy in [y, y + h] {
            if cy < rows && cx < cols {
                grid[cy][cx] = '+';
            }
        }
    }
}
