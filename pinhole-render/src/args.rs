/// Argument parsing and validation
/// Uses library `clap`
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pinhole_core::{Camera, ImageSize, Pose, RotationState, Vec3f};

fn parse_floats<const N: usize>(value: &str) -> Result<[f32; N], String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {N} comma separated numbers, got `{value}`"));
    }
    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse::<f32>()
            .map_err(|_| format!("`{part}` is not a number"))?;
    }
    Ok(out)
}

pub fn parse_triple(value: &str) -> Result<[f32; 3], String> {
    parse_floats::<3>(value)
}

pub fn parse_pair(value: &str) -> Result<[f32; 2], String> {
    parse_floats::<2>(value)
}

pub fn is_positive(value: &str) -> Result<f32, String> {
    match value.parse::<f32>() {
        Ok(n) if n > 0.0 => Ok(n),
        Ok(_) => Err("Number must be greater than 0.0".into()),
        Err(_) => Err("Number required".into()),
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "pinhole-render",
    version,
    about = "Render scene wireframes to SVG through a pinhole camera"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render every shot listed in a TOML shot file
    Render {
        #[arg(long, value_name = "FILE")]
        config: PathBuf,

        /// Also print each wireframe to the terminal
        #[arg(long)]
        preview: bool,
    },

    /// Render a single shot described on the command line
    Shot(ShotArgs),

    /// Print the camera-to-world matrix for a pose
    Matrix(PoseArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PoseArgs {
    /// Rotation around X,Y,Z in degrees
    #[arg(long, value_name = "RX,RY,RZ", value_parser = parse_triple, allow_hyphen_values = true, default_value = "0,0,0")]
    pub rotation: [f32; 3],

    /// Camera position in world coordinates
    #[arg(long, value_name = "TX,TY,TZ", value_parser = parse_triple, allow_hyphen_values = true, default_value = "0,0,0")]
    pub translation: [f32; 3],
}

impl PoseArgs {
    pub fn pose(&self) -> Pose {
        let [tx, ty, tz] = self.translation;
        Pose::new(RotationState::from(self.rotation), Vec3f::new(tx, ty, tz))
    }
}

#[derive(Args, Debug, Clone)]
pub struct ShotArgs {
    /// Scene file: a vertex list, or an OBJ file
    #[arg(long, value_name = "FILE")]
    pub scene: PathBuf,

    /// OBJ object to render instead of the whole file
    #[arg(long, value_name = "NAME")]
    pub object: Option<String>,

    #[arg(long, short, value_name = "FILE")]
    pub output: PathBuf,

    #[command(flatten)]
    pub pose: PoseArgs,

    /// Focal length in mm
    #[arg(long, value_parser = is_positive, default_value = "50")]
    pub focal_length: f32,

    /// Film aperture width and height in mm
    #[arg(long, value_name = "W,H", value_parser = parse_pair, default_value = "35,24")]
    pub aperture: [f32; 2],

    #[arg(long, value_parser = is_positive, default_value = "0.1")]
    pub near: f32,

    #[arg(long, value_parser = is_positive, default_value = "100")]
    pub far: f32,

    #[arg(long, default_value_t = 512)]
    pub width: u32,

    #[arg(long, default_value_t = 512)]
    pub height: u32,

    #[arg(long)]
    pub preview: bool,
}

impl ShotArgs {
    pub fn camera(&self) -> Camera {
        Camera::new(
            self.focal_length,
            self.aperture[0],
            self.aperture[1],
            self.near,
            self.far,
        )
    }

    pub fn image(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }
}
