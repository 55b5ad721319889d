/// Parser for the vertex list text exported from Blender
///
/// ```text
/// Array of vertices:
/// 1.0 1.0 1.0
/// 1.0 1.0 -1.0
/// ...
/// Array of connected vertices:
/// 0 1 2 2 1 3 ...
/// ```
///
/// Every vertex block starts a new object. The single line following a
/// connection header lists triangle indices relative to the most recent
/// vertex block.
use log::debug;
use nom::{
    character::complete::{digit1, space0, space1},
    combinator::{all_consuming, map_res},
    multi::separated_list0,
    sequence::delimited,
    IResult,
};

use crate::error::{Error, Result};
use crate::geometry::Mesh;
use crate::scene::{starts_with_number, vec3_line};

const VERTEX_HEADER: &str = "Array of vertices:";
const CONNECTION_HEADER: &str = "Array of connected vertices:";

fn index_list(input: &str) -> IResult<&str, Vec<usize>> {
    all_consuming(delimited(
        space0,
        separated_list0(space1, map_res(digit1, str::parse::<usize>)),
        space0,
    ))(input)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Vertices,
    Connections,
}

/// Check one object against its own vertices and merge it into the scene
fn finish_object(scene: &mut Mesh, object: Mesh) -> Result<()> {
    object.validate()?;
    scene.append(object)
}

pub fn parse_vertex_list(input: &str) -> Result<Mesh> {
    let mut scene = Mesh::new();
    // object being read, indices still relative to its own vertices
    let mut current: Option<Mesh> = None;
    let mut state = State::Idle;

    for (number, raw) in input.lines().enumerate() {
        let line_no = number + 1;
        let line = raw.trim();

        if line == VERTEX_HEADER {
            if let Some(done) = current.replace(Mesh::new()) {
                finish_object(&mut scene, done)?;
            }
            state = State::Vertices;
            continue;
        }
        if line == CONNECTION_HEADER {
            if current.is_none() {
                return Err(Error::parse(line_no, "connections listed before any vertices"));
            }
            state = State::Connections;
            continue;
        }
        if line.is_empty() {
            continue;
        }

        let Some(object) = current.as_mut() else {
            debug!("line {line_no}: skipping `{line}`");
            continue;
        };

        match state {
            State::Vertices => match vec3_line(line) {
                Some(v) => object.vertices.push(v),
                None if starts_with_number(line) => {
                    return Err(Error::parse(line_no, format!("expected `x y z`, found `{line}`")));
                }
                None => {
                    debug!("line {line_no}: end of vertex block at `{line}`");
                    state = State::Idle;
                }
            },
            State::Connections => {
                let (_, indices) = index_list(line).map_err(|_| {
                    Error::parse(line_no, format!("expected vertex indices, found `{line}`"))
                })?;
                object.indices.extend(indices);
                state = State::Idle;
            }
            State::Idle => debug!("line {line_no}: skipping `{line}`"),
        }
    }

    if let Some(done) = current {
        finish_object(&mut scene, done)?;
    }
    Ok(scene)
}
