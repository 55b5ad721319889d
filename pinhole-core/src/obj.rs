/// Wavefront OBJ subset: named objects, vertex positions and polygon faces
use log::debug;
use nom::{
    character::complete::{char, digit0, digit1, space0, space1},
    combinator::{all_consuming, map_res, opt, recognize},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded},
    IResult,
};

use crate::error::{Error, Result};
use crate::geometry::Mesh;
use crate::math::Vec3f;
use crate::scene::vec3;

/// `7`, `-2`, `7/1/3`, `7//3`: only the position index is kept
fn face_index(input: &str) -> IResult<&str, i64> {
    let (rest, index) = map_res(recognize(pair(opt(char('-')), digit1)), str::parse::<i64>)(input)?;
    let (rest, _) = many0(preceded(char('/'), digit0))(rest)?;
    Ok((rest, index))
}

fn face(input: &str) -> IResult<&str, Vec<i64>> {
    all_consuming(delimited(space0, separated_list1(space1, face_index), space0))(input)
}

fn vertex(input: &str) -> IResult<&str, Vec3f> {
    // an optional w component is accepted and dropped
    let (rest, v) = vec3(input)?;
    let (rest, _) = all_consuming(pair(
        opt(pair(space1, nom::number::complete::float)),
        space0,
    ))(rest)?;
    Ok((rest, v))
}

/// Resolve a 1-based or negative (relative) OBJ index to a 0-based one
fn resolve(index: i64, vertex_count: usize, line_no: usize) -> Result<usize> {
    let resolved = match index {
        i if i > 0 => i - 1,
        i if i < 0 => vertex_count as i64 + i,
        _ => return Err(Error::parse(line_no, "face index 0 is not valid")),
    };
    usize::try_from(resolved)
        .map_err(|_| Error::parse(line_no, format!("face index {index} points before the first vertex")))
}

#[derive(Default)]
struct Selection {
    active: bool,
    found: bool,
    /// first file vertex belonging to the selected object
    base: usize,
}

/// Parse OBJ text into a mesh.
///
/// With `object` set, only the vertices and faces of the first object with
/// that name are kept and its face indices are rebased onto its own vertices.
/// Faces with more than three corners are fan triangulated.
pub fn parse_obj(input: &str, object: Option<&str>) -> Result<Mesh> {
    let mut file_vertices = 0usize;
    let mut mesh = Mesh::new();
    let mut selection = Selection {
        active: object.is_none(),
        found: object.is_none(),
        ..Default::default()
    };

    for (number, raw) in input.lines().enumerate() {
        let line_no = number + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (keyword, rest) = line.split_once(|c: char| c.is_whitespace()).unwrap_or((line, ""));

        match keyword {
            "o" => {
                if let Some(target) = object {
                    if selection.active {
                        // the selected object ended
                        break;
                    }
                    if rest.trim() == target {
                        selection.active = true;
                        selection.found = true;
                        selection.base = file_vertices;
                    }
                }
            }
            "v" => {
                let (_, v) = vertex(rest)
                    .map_err(|_| Error::parse(line_no, format!("expected `v x y z`, found `{line}`")))?;
                file_vertices += 1;
                if selection.active {
                    mesh.vertices.push(v);
                }
            }
            "f" if selection.active => {
                let (_, corners) = face(rest)
                    .map_err(|_| Error::parse(line_no, format!("expected face indices, found `{line}`")))?;
                if corners.len() < 3 {
                    return Err(Error::parse(line_no, "face needs at least three vertices"));
                }
                let mut resolved = Vec::with_capacity(corners.len());
                for index in corners {
                    let file_index = resolve(index, file_vertices, line_no)?;
                    let local = file_index.checked_sub(selection.base).ok_or(Error::IndexOutOfRange {
                        index: file_index,
                        len: mesh.vertices.len(),
                    })?;
                    resolved.push(local);
                }
                for i in 1..resolved.len() - 1 {
                    mesh.indices
                        .extend_from_slice(&[resolved[0], resolved[i], resolved[i + 1]]);
                }
            }
            _ => debug!("line {line_no}: ignoring `{keyword}`"),
        }
    }

    if !selection.found {
        return Err(Error::InvalidMesh(format!(
            "object `{}` not found",
            object.unwrap_or_default()
        )));
    }

    mesh.validate()?;
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCKS: &str = "\
# two blocks
mtllib blocks.mtl
o Left
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
o Right
v 2 0 0
v 3 0 0
v 3 1 0 1.0
vn 0 0 1
f 5//1 6//1 7//1
";

    #[test]
    fn test_whole_file() {
        let mesh = parse_obj(BLOCKS, None).unwrap();
        assert_eq!(mesh.vertices.len(), 7);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_select_object_rebases_indices() {
        let mesh = parse_obj(BLOCKS, Some("Right")).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.vertices[0], Vec3f::new(2.0, 0.0, 0.0));
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_select_first_object_stops_at_next() {
        let mesh = parse_obj(BLOCKS, Some("Left")).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_missing_object() {
        assert!(matches!(
            parse_obj(BLOCKS, Some("Middle")),
            Err(Error::InvalidMesh(_))
        ));
    }

    #[test]
    fn test_negative_indices() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let mesh = parse_obj(text, None).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_texture_slash_forms() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/1/1 2/2/2 3/3/3\n";
        let mesh = parse_obj(text, None).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_junk_after_face_index() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1x 2q 3!\n";
        assert!(matches!(
            parse_obj(text, None),
            Err(Error::Parse { line: 4, .. })
        ));
    }

    #[test]
    fn test_bad_vertex_line() {
        let text = "v 0 0\n";
        assert!(matches!(
            parse_obj(text, None),
            Err(Error::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_zero_index() {
        let text = "v 0 0 0\nf 0 1 1\n";
        assert!(matches!(
            parse_obj(text, None),
            Err(Error::Parse { line: 2, .. })
        ));
    }
}
