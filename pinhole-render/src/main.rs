/// Pinhole Render - wireframe SVGs of Blender scenes through a pinhole camera
///
/// Examples:
///   pinhole-render render --config demos/blocks.toml --preview
///   pinhole-render shot --scene demos/blocks.txt -o blocks.svg --rotation 77,0,5 --translation 0.5,-9,3.5
///   pinhole-render matrix --rotation 77,0,5 --translation 0.5,-9,3.5
use clap::Parser;
use log::error;
use pinhole_core::{load_scene, Transform};
use pinhole_render::{preview, render_shot, EdgeStyle, RenderError, Shot, ShotFile};

use crate::args::{Cli, Command};

mod args;

fn run(cli: Cli) -> Result<(), RenderError> {
    match cli.command {
        Command::Render { config, preview: show } => {
            let file = ShotFile::load(&config)?;
            let mesh = load_scene(file.scene_path(), file.object.as_deref())?;
            for shot in file.shots()? {
                let wireframe = render_shot(&mesh, &shot, &file.style)?;
                if show {
                    preview(&wireframe, &shot)?;
                }
            }
        }
        Command::Shot(args) => {
            let mesh = load_scene(&args.scene, args.object.as_deref())?;
            let shot = Shot {
                output: args.output.clone(),
                camera: args.camera(),
                camera_to_world: Transform::camera_to_world(&args.pose.pose()),
                image: args.image(),
            };
            let wireframe = render_shot(&mesh, &shot, &EdgeStyle::default())?;
            if args.preview {
                preview(&wireframe, &shot)?;
            }
        }
        Command::Matrix(pose) => {
            print!("{}", Transform::camera_to_world(&pose.pose()));
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        error!("{e}");
        std::process::exit(1);
    }
}
