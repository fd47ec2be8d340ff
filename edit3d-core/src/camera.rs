//! Viewing camera with an orbit that is not part of the edit history
use nalgebra::{Matrix4, Point3, Vector3};

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// View orbit around the three world axes (radians)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Orbit by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// Rotation matrix applying x, then y, then z.
    pub fn matrix(&self) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::x() * self.x);
        let ry = Matrix4::new_rotation(Vector3::y() * self.y);
        let rz = Matrix4::new_rotation(Vector3::z() * self.z);
        rz * ry * rx
    }
}

/// A cell on screen with its NDC depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub orbit: RotationState,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 6.0),
            target: Point3::origin(),
            up: Vector3::y(),
            orbit: RotationState::new(0.4, -0.6, 0.0),
            fov: std::f32::consts::FRAC_PI_4,
            aspect: width as f32 / height.max(1) as f32,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// Look-at view with the orbit applied to the world first
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up) * self.orbit.matrix()
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let height = (self.position - self.target).norm();
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Combined projection * view * model matrix
    pub fn mvp(&self, model_matrix: &Matrix4<f32>) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix() * model_matrix
    }

    /// Project a model-space point to a `width` x `height` grid of cells.
    ///
    /// Returns `None` for points outside the view volume.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        mvp: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<ScreenPoint> {
        let clip = project_homogeneous(mvp, point)?;
        let inside = |v: f32| (-1.0..=1.0).contains(&v);
        if !(inside(clip.x) && inside(clip.y) && inside(clip.z)) {
            return None;
        }

        Some(ScreenPoint {
            x: (clip.x + 1.0) * 0.5 * width as f32,
            y: (1.0 - clip.y) * 0.5 * height as f32,
            depth: clip.z,
        })
    }

    pub fn toggle_projection(&mut self) {
        self.mode = match self.mode {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        };
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Perspective-divided projection, `None` on or behind the camera plane.
fn project_homogeneous(mvp: &Matrix4<f32>, point: &Point3<f32>) -> Option<Point3<f32>> {
    let clip = mvp * point.to_homogeneous();
    if clip.w <= 1e-6 {
        return None;
    }
    Some(Point3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w))
}
