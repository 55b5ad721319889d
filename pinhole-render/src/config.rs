/// Shot files: which scene to load and the cameras to render it from
use std::fs;
use std::path::{Path, PathBuf};

use pinhole_core::{Camera, ImageSize, Matrix44, Pose, RotationState, Transform, Vec3f};
use serde::Deserialize;

use crate::svg_writer::EdgeStyle;
use crate::RenderError;

/// Top level of a shot file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShotFile {
    /// Scene description, relative to the shot file
    pub scene: PathBuf,

    /// Named object to pick from an OBJ scene
    #[serde(default)]
    pub object: Option<String>,

    /// Image size for every shot that does not set its own
    #[serde(default)]
    pub image: ImageSize,

    #[serde(default)]
    pub style: EdgeStyle,

    #[serde(rename = "shot", default)]
    pub shots: Vec<ShotConfig>,

    #[serde(skip)]
    base_dir: PathBuf,
}

/// One camera configuration and its output file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShotConfig {
    pub output: PathBuf,

    #[serde(default)]
    pub camera: Camera,

    /// Rotation around X, Y, Z in degrees
    pub rotation: Option<RotationState>,

    pub translation: Option<[f32; 3]>,

    /// Precomputed camera-to-world matrix in row-vector layout
    pub camera_to_world: Option<[[f32; 4]; 4]>,

    pub image: Option<ImageSize>,
}

/// A shot with its pose resolved to a matrix and its paths made absolute
#[derive(Debug, Clone)]
pub struct Shot {
    pub output: PathBuf,
    pub camera: Camera,
    pub camera_to_world: Matrix44,
    pub image: ImageSize,
}

impl ShotConfig {
    /// Pose parameters or a matrix, never both
    pub fn camera_to_world(&self) -> Result<Matrix44, RenderError> {
        let has_pose = self.rotation.is_some() || self.translation.is_some();
        match (has_pose, self.camera_to_world) {
            (true, Some(_)) => Err(RenderError::InvalidArgument(format!(
                "shot {} sets both a pose and camera_to_world",
                self.output.display()
            ))),
            (false, None) => Err(RenderError::InvalidArgument(format!(
                "shot {} needs rotation/translation or camera_to_world",
                self.output.display()
            ))),
            (false, Some(rows)) => Ok(Matrix44::from_rows(rows)),
            (true, None) => {
                let [x, y, z] = self.translation.unwrap_or_default();
                let pose = Pose::new(self.rotation.unwrap_or_default(), Vec3f::new(x, y, z));
                Ok(Transform::camera_to_world(&pose))
            }
        }
    }
}

impl ShotFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let mut file = Self::from_toml(&contents)?;
        file.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(file)
    }

    pub fn from_toml(contents: &str) -> Result<Self, RenderError> {
        let file: ShotFile = toml::from_str(contents)?;
        if file.shots.is_empty() {
            return Err(RenderError::InvalidArgument(
                "shot file lists no [[shot]] entries".to_string(),
            ));
        }
        Ok(file)
    }

    pub fn scene_path(&self) -> PathBuf {
        self.base_dir.join(&self.scene)
    }

    /// Resolve every shot, failing on the first invalid one
    pub fn shots(&self) -> Result<Vec<Shot>, RenderError> {
        self.shots
            .iter()
            .map(|shot| {
                Ok(Shot {
                    output: self.base_dir.join(&shot.output),
                    camera: shot.camera,
                    camera_to_world: shot.camera_to_world()?,
                    image: shot.image.unwrap_or(self.image),
                })
            })
            .collect()
    }
}
