//! Test data generators for synthetic vector fields.
//!
//! All grids are returned as `Vec<f64>` in row-major order (row 0 first),
//! matching the layout the conversion engine reads.

/// Evenly spaced 1-D axis: `start, start + step, ...`.
pub fn create_axis(len: usize, start: f64, step: f64) -> Vec<f64> {
    (0..len).map(|i| start + i as f64 * step).collect()
}

/// Longitude axis in the `[0, 360)` convention covering the whole globe.
///
/// # Example
///
/// ```
/// use test_utils::create_lon_axis_360;
///
/// let lon = create_lon_axis_360(4);
/// assert_eq!(lon, vec![0.0, 90.0, 180.0, 270.0]);
/// ```
pub fn create_lon_axis_360(len: usize) -> Vec<f64> {
    create_axis(len, 0.0, 360.0 / len.max(1) as f64)
}

/// Expands 1-D latitude/longitude axes into 2-D (lat, lon) grids.
pub fn meshgrid(lat: &[f64], lon: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut lat_grid = Vec::with_capacity(lat.len() * lon.len());
    let mut lon_grid = Vec::with_capacity(lat.len() * lon.len());
    for &y in lat {
        for &x in lon {
            lat_grid.push(y);
            lon_grid.push(x);
        }
    }
    (lat_grid, lon_grid)
}

/// Creates a U-component grid (west-east component).
///
/// U varies by row, simulating a trade-wind pattern from -20 to +20.
pub fn create_u_grid(rows: usize, cols: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        let lat_factor = (row as f64 / rows as f64 - 0.5) * 2.0;
        data.extend(std::iter::repeat(lat_factor * 20.0).take(cols));
    }
    data
}

/// Creates a V-component grid (south-north component).
///
/// V varies by column from -15 to +15.
pub fn create_v_grid(rows: usize, cols: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(rows * cols);
    for _row in 0..rows {
        for col in 0..cols {
            let lon_factor = (col as f64 / cols as f64 - 0.5) * 2.0;
            data.push(lon_factor * 15.0);
        }
    }
    data
}

/// Creates a deterministic compass-direction grid in `[0, 360)` degrees.
pub fn create_direction_grid(rows: usize, cols: usize, seed: u32) -> Vec<f64> {
    let mut data = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            data.push((simple_hash(col as u32, row as u32, seed) % 3600) as f64 / 10.0);
        }
    }
    data
}

/// Creates a speed grid: calm in the centre, up to 2.0 at the corners.
pub fn create_speed_grid(rows: usize, cols: usize) -> Vec<f64> {
    let center_x = cols as f64 / 2.0;
    let center_y = rows as f64 / 2.0;
    let max_dist = center_x.hypot(center_y).max(f64::EPSILON);

    let mut data = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let dist = (col as f64 - center_x).hypot(row as f64 - center_y);
            data.push(dist / max_dist * 2.0);
        }
    }
    data
}

/// Creates a zero-filled grid with NaN at the given (row, col) positions.
pub fn create_grid_with_nans(rows: usize, cols: usize, nan_positions: &[(usize, usize)]) -> Vec<f64> {
    let mut data = vec![0.0; rows * cols];
    for &(row, col) in nan_positions {
        if row < rows && col < cols {
            data[row * cols + col] = f64::NAN;
        }
    }
    data
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}
