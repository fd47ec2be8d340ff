//! ASCII rasterizer for the edited model
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use edit3d_core::{Camera, MeshModel, ScreenPoint};
use nalgebra::Vector3;
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Character used for edges in wireframe mode
const EDGE_CHAR: char = '#';

/// Z-buffered character grid
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
    }

    /// Character at a cell, for inspection
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    pub fn render_model(&mut self, model: &MeshModel, camera: &Camera) {
        let mvp = camera.mvp(model.matrix());
        let view_model = camera.view_matrix() * model.matrix();
        let (width, height) = (self.width as u32, self.height as u32);

        for triangle in &model.mesh().triangles {
            let projected: Option<Vec<ScreenPoint>> = triangle
                .vertices
                .iter()
                .map(|v| camera.project_to_screen(&v.position, &mvp, width, height))
                .collect();
            // Whole triangles are dropped once any corner is clipped.
            let Some(screen) = projected else {
                continue;
            };

            if model.is_wireframe() {
                for (a, b) in [(0, 1), (1, 2), (2, 0)] {
                    self.draw_line(screen[a], screen[b]);
                }
            } else {
                let character = shade(&triangle.normal_under(&view_model));
                self.fill_triangle([screen[0], screen[1], screen[2]], character);
            }
        }
    }

    fn plot(&mut self, x: i32, y: i32, depth: f32, character: char) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = character;
        }
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint) {
        let steps = (to.x - from.x).abs().max((to.y - from.y).abs()).ceil().max(1.0) as i32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.plot(
                (from.x + (to.x - from.x) * t).floor() as i32,
                (from.y + (to.y - from.y) * t).floor() as i32,
                from.depth + (to.depth - from.depth) * t,
                EDGE_CHAR,
            );
        }
    }

    fn fill_triangle(&mut self, [v0, v1, v2]: [ScreenPoint; 3], character: char) {
        let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i32).max(0);
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i32).max(0);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                let Some((w0, w1, w2)) = barycentric(&v0, &v1, &v2, p) else {
                    continue;
                };
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    let depth = w0 * v0.depth + w1 * v1.depth + w2 * v2.depth;
                    self.plot(x, y, depth, character);
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in self.char_buffer.chunks(self.width.max(1)) {
            for &c in row {
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' | '@' => Color::Cyan,
                    _ => Color::White,
                };
                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Ramp character for a view-space face normal lit from the viewer
fn shade(normal: &Vector3<f32>) -> char {
    let brightness = normal.dot(&Vector3::z()).max(0.0);
    let index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}

/// Barycentric weights of `p` in the screen triangle, `None` when degenerate
fn barycentric(
    v0: &ScreenPoint,
    v1: &ScreenPoint,
    v2: &ScreenPoint,
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y);
    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.y - v2.y) * (p.0 - v2.x) + (v2.x - v1.x) * (p.1 - v2.y)) / denom;
    let w1 = ((v2.y - v0.y) * (p.0 - v2.x) + (v0.x - v2.x) * (p.1 - v2.y)) / denom;
    Some((w0, w1, 1.0 - w0 - w1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use edit3d_core::{EditableModel, Mesh, RotationState};

    fn filled(renderer: &AsciiRenderer) -> usize {
        renderer.char_buffer.iter().filter(|&&c| c != ' ').count()
    }

    fn front_camera() -> Camera {
        let mut camera = Camera::new(60, 30);
        camera.orbit = RotationState::default();
        camera
    }

    #[test]
    fn test_cube_covers_center() {
        let mut renderer = AsciiRenderer::new(60, 30);
        let model = MeshModel::new(Mesh::cube(2.0));
        renderer.render_model(&model, &front_camera());
        assert!(matches!(renderer.cell(30, 15), Some('%' | '@')));
    }

    #[test]
    fn test_wireframe_leaves_face_interior_empty() {
        let mut renderer = AsciiRenderer::new(60, 30);
        let mut model = MeshModel::new(Mesh::cube(2.0));
        model.toggle_wireframe();
        renderer.render_model(&model, &front_camera());
        assert!(filled(&renderer) > 0);
        assert!(renderer.char_buffer.iter().all(|&c| c == ' ' || c == EDGE_CHAR));
    }

    #[test]
    fn test_model_moved_out_of_view() {
        let mut renderer = AsciiRenderer::new(60, 30);
        let mut model = MeshModel::new(Mesh::cube(2.0));
        model.translate(edit3d_core::Axis::X, 50.0);
        renderer.render_model(&model, &front_camera());
        assert_eq!(filled(&renderer), 0);
    }

    #[test]
    fn test_clear_and_draw() {
        let mut renderer = AsciiRenderer::new(4, 2);
        renderer.plot(1, 1, 0.5, '@');
        assert_eq!(renderer.cell(1, 1), Some('@'));
        renderer.clear();
        assert_eq!(renderer.cell(1, 1), Some(' '));
        assert_eq!(renderer.cell(4, 0), None);

        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        assert!(!out.is_empty());
    }

    #[test]
    fn test_degenerate_barycentric() {
        let p = ScreenPoint {
            x: 1.0,
            y: 1.0,
            depth: 0.0,
        };
        assert!(barycentric(&p, &p, &p, (1.0, 1.0)).is_none());
    }
}
