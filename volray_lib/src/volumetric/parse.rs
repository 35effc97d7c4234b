//! Dimension tags in raw volume file names.
//!
//! Raw files carry no header. Public datasets commonly encode the shape in the
//! file name instead, e.g. `skull_256x256x256_uint8.raw`.

use nalgebra::{vector, Vector3};
use nom::{
    bytes::complete::tag,
    character::complete::{char, digit1},
    combinator::map_res,
    sequence::tuple,
    IResult,
};

fn dimension(s: &str) -> IResult<&str, usize> {
    map_res(digit1, |d: &str| d.parse::<usize>())(s)
}

/// `<X>x<Y>x<Z>_uint8`
fn dims_tag(s: &str) -> IResult<&str, Vector3<usize>> {
    let (rest, (x, _, y, _, z, _)) = tuple((
        dimension,
        char('x'),
        dimension,
        char('x'),
        dimension,
        tag("_uint8"),
    ))(s)?;
    Ok((rest, vector![x, y, z]))
}

/// Find `_<X>x<Y>x<Z>_uint8` in a file name.
///
/// Returns `None` if there is no tag or a dimension is zero.
pub fn dims_from_file_name(name: &str) -> Option<Vector3<usize>> {
    name.match_indices('_')
        .filter_map(|(i, _)| dims_tag(&name[i + 1..]).ok())
        .map(|(_, dims)| dims)
        .find(|dims| dims.iter().all(|&d| d > 0))
}

/// Side of a cube holding exactly `len` voxels
pub fn cube_side(len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let side = (len as f64).cbrt().round() as usize;
    // Guard rounding of the float root
    (side.saturating_sub(1)..=side + 1).find(|&d| d.checked_pow(3) == Some(len))
}
