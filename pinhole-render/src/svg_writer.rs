/// SVG line drawings of projected wireframes
use std::path::Path;

use pinhole_core::{Edge, ImageSize, Visibility, Wireframe};
use serde::Deserialize;
use svg::node::element::Line;
use svg::Document;

/// Stroke for each visibility class
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EdgeStyle {
    pub inside: [u8; 3],
    pub outside: [u8; 3],
    pub stroke_width: f32,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            inside: [0, 0, 0],
            outside: [255, 0, 0],
            stroke_width: 1.0,
        }
    }
}

impl EdgeStyle {
    pub fn stroke(&self, visibility: Visibility) -> String {
        let [r, g, b] = match visibility {
            Visibility::Inside => self.inside,
            Visibility::Outside => self.outside,
        };
        format!("stroke:rgb({r},{g},{b});stroke-width:{}", self.stroke_width)
    }
}

fn line(edge: &Edge, style: &EdgeStyle) -> Line {
    Line::new()
        .set("x1", edge.from.x)
        .set("y1", edge.from.y)
        .set("x2", edge.to.x)
        .set("y2", edge.to.y)
        .set("style", style.stroke(edge.visibility))
}

pub fn wireframe_document(wireframe: &Wireframe, image: ImageSize, style: &EdgeStyle) -> Document {
    wireframe.edges.iter().fold(
        Document::new()
            .set("version", "1.1")
            .set("xmlns:xlink", "http://www.w3.org/1999/xlink")
            .set("width", image.width)
            .set("height", image.height),
        |document, edge| document.add(line(edge, style)),
    )
}

pub fn save_wireframe<P: AsRef<Path>>(
    path: P,
    wireframe: &Wireframe,
    image: ImageSize,
    style: &EdgeStyle,
) -> std::io::Result<()> {
    svg::save(path, &wireframe_document(wireframe, image, style))
}
