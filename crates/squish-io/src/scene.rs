//! Scene text format.
//!
//! A scene describes one soft body and its static surroundings:
//!
//! ```text
//! <obstacle count>
//! <mesh file name>
//! <16 transform floats, column-major, one line>
//! <material name>
//! <edge compliance>
//! <volume compliance>
//! <obstacle 0 min: x y z>
//! <obstacle 0 max: x y z>
//! ...
//! ```
//!
//! The transform places the body in the scene and is baked into the
//! mesh positions before constraints are built. The material name is
//! carried as an opaque label for the renderer.

use std::path::Path;

use glam::{Mat4, Vec3};
use squish_contact::BoxObstacle;
use squish_types::{SquishError, SquishResult};

/// A parsed scene description.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Name of the tet-mesh file for the body.
    pub mesh_file: String,
    /// Placement transform for the body, column-major.
    pub transform: Mat4,
    /// Render material label.
    pub material: String,
    /// Edge compliance for this scene's body.
    pub edge_compliance: f32,
    /// Volume compliance for this scene's body.
    pub volume_compliance: f32,
    /// Static box obstacles.
    pub obstacles: Vec<BoxObstacle>,
}

/// Loads a scene from a text file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SquishResult<Scene> {
    let text = std::fs::read_to_string(path)?;
    parse_scene(&text)
}

/// Parses a scene from text.
pub fn parse_scene(text: &str) -> SquishResult<Scene> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty());

    let obstacle_count: usize = next_line(&mut lines, "obstacle count")?
        .parse()
        .map_err(|_| SquishError::Parse("Obstacle count is not an integer".into()))?;

    let mesh_file = next_line(&mut lines, "mesh file name")?.to_string();

    let transform_line = next_line(&mut lines, "transform")?;
    let values = parse_floats(transform_line, 16, "transform")?;
    let mut cols = [0.0f32; 16];
    cols.copy_from_slice(&values);
    let transform = Mat4::from_cols_array(&cols);

    let material = next_line(&mut lines, "material name")?.to_string();

    let edge_compliance: f32 = next_line(&mut lines, "edge compliance")?
        .parse()
        .map_err(|_| SquishError::Parse("Edge compliance is not a float".into()))?;
    let volume_compliance: f32 = next_line(&mut lines, "volume compliance")?
        .parse()
        .map_err(|_| SquishError::Parse("Volume compliance is not a float".into()))?;

    let mut obstacles = Vec::with_capacity(obstacle_count);
    for i in 0..obstacle_count {
        let min = parse_floats(next_line(&mut lines, "obstacle min")?, 3, "obstacle min")?;
        let max = parse_floats(next_line(&mut lines, "obstacle max")?, 3, "obstacle max")?;
        let min = Vec3::new(min[0], min[1], min[2]);
        let max = Vec3::new(max[0], max[1], max[2]);
        if min.cmpgt(max).any() {
            return Err(SquishError::Parse(format!(
                "Obstacle {} has min > max on some axis",
                i
            )));
        }
        obstacles.push(BoxObstacle::new(min, max));
    }

    Ok(Scene {
        mesh_file,
        transform,
        material,
        edge_compliance,
        volume_compliance,
        obstacles,
    })
}

/// Returns the next non-empty line or a parse error naming `what`.
fn next_line<'a, I: Iterator<Item = &'a str>>(lines: &mut I, what: &str) -> SquishResult<&'a str> {
    lines.next().ok_or_else(|| {
        SquishError::Parse(format!("Unexpected end of scene while reading {}", what))
    })
}

/// Parses exactly `count` whitespace-separated floats from one line.
fn parse_floats(line: &str, count: usize, what: &str) -> SquishResult<Vec<f32>> {
    let values: Result<Vec<f32>, _> = line.split_whitespace().map(str::parse).collect();
    let values =
        values.map_err(|_| SquishError::Parse(format!("Malformed float in {}", what)))?;
    if values.len() != count {
        return Err(SquishError::Parse(format!(
            "Expected {} values for {}, got {}",
            count,
            what,
            values.len()
        )));
    }
    Ok(values)
}
