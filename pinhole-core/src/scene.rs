/// Scene description loading and the number parsers shared by the formats
use std::fs;
use std::path::Path;

use log::info;
use nom::{
    character::complete::{space0, space1},
    combinator::all_consuming,
    number::complete::float,
    sequence::{delimited, preceded, tuple},
    IResult,
};

use crate::error::{Error, Result};
use crate::geometry::Mesh;
use crate::math::Vec3f;
use crate::{obj, vertex_list};

/// Three whitespace separated floats
pub(crate) fn vec3(input: &str) -> IResult<&str, Vec3f> {
    let (input, (x, y, z)) = tuple((
        preceded(space0, float),
        preceded(space1, float),
        preceded(space1, float),
    ))(input)?;
    Ok((input, Vec3f::new(x, y, z)))
}

/// A line that holds exactly three floats
pub(crate) fn vec3_line(line: &str) -> Option<Vec3f> {
    all_consuming(delimited(space0, vec3, space0))(line)
        .ok()
        .map(|(_, v)| v)
}

pub(crate) fn starts_with_number(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .map_or(false, |token| token.parse::<f32>().is_ok())
}

/// Load a scene file, picking the parser from the extension: `.obj` files are
/// read as Wavefront OBJ, anything else as a vertex list.
///
/// `object` selects one named object from an OBJ file.
pub fn load_scene<P: AsRef<Path>>(path: P, object: Option<&str>) -> Result<Mesh> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;

    let is_obj = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("obj"));

    let mesh = if is_obj {
        obj::parse_obj(&text, object)?
    } else {
        if let Some(name) = object {
            return Err(Error::InvalidMesh(format!(
                "object selection ({name}) needs an OBJ file"
            )));
        }
        vertex_list::parse_vertex_list(&text)?
    };

    info!(
        "loaded {} vertices and {} triangles from {}",
        mesh.vertices.len(),
        mesh.triangle_count(),
        path.display()
    );
    Ok(mesh)
}
