/// Create a meshgrid of source coordinates from a per-pixel mapping.
///
/// # Arguments
///
/// * `cols` - The number of columns indicating the width of the grid
/// * `rows` - The number of rows indicating the height of the grid
/// * `f` - Maps a destination `(x, y)` to a source `(u, v)` coordinate.
///
/// # Returns
///
/// Two row-major buffers of `rows * cols` elements with the u and v coordinates.
pub fn meshgrid_from_fn<E>(
    cols: usize,
    rows: usize,
    f: impl Fn(usize, usize) -> Result<(f32, f32), E>,
) -> Result<(Vec<f32>, Vec<f32>), E> {
    let mut map_x = Vec::with_capacity(rows * cols);
    let mut map_y = Vec::with_capacity(rows * cols);

    for y in 0..rows {
        for x in 0..cols {
            let (u, v) = f(x, y)?;
            map_x.push(u);
            map_y.push(v);
        }
    }

    Ok((map_x, map_y))
}
