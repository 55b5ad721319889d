/// Wireframe rendering front end for the pinhole camera pipeline
use std::io::{self, stdout, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use log::{info, warn};
use pinhole_core::{render_mesh, Mesh, Projector, Wireframe};
use thiserror::Error;

pub mod config;
pub mod renderer;
pub mod svg_writer;

pub use config::{Shot, ShotConfig, ShotFile};
pub use renderer::AsciiRenderer;
pub use svg_writer::EdgeStyle;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Core(#[from] pinhole_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Project `mesh` through one shot's camera and write the SVG
pub fn render_shot(mesh: &Mesh, shot: &Shot, style: &EdgeStyle) -> Result<Wireframe, RenderError> {
    let projector = Projector::new(&shot.camera_to_world, &shot.camera, shot.image)?;
    let wireframe = render_mesh(mesh, &projector)?;

    if wireframe.outside_triangles() > 0 {
        warn!(
            "{}: {} of {} triangles leave the canvas",
            shot.output.display(),
            wireframe.outside_triangles(),
            wireframe.triangle_count
        );
    }

    svg_writer::save_wireframe(&shot.output, &wireframe, shot.image, style)?;
    info!(
        "wrote {} ({} edges, {}x{})",
        shot.output.display(),
        wireframe.edges.len(),
        shot.image.width,
        shot.image.height
    );
    Ok(wireframe)
}

/// Print a one-off ASCII rendering of a wireframe sized to the terminal
pub fn preview(wireframe: &Wireframe, shot: &Shot) -> io::Result<()> {
    let (width, height) = terminal::size().unwrap_or((80, 24));
    // leave a row for the title
    let rows = height.saturating_sub(2).max(1) as usize;

    let mut renderer = AsciiRenderer::new(width as usize, rows);
    renderer.render_wireframe(wireframe, shot.image);

    let mut stdout = stdout();
    queue!(
        stdout,
        SetForegroundColor(Color::Yellow),
        Print(format!(
            "{} | {} triangles, {} inside\n",
            shot.output.display(),
            wireframe.triangle_count,
            wireframe.visible_triangles
        )),
        ResetColor
    )?;
    renderer.draw(&mut stdout)?;
    stdout.flush()
}
