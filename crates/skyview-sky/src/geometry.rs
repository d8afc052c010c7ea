//! UV sphere tessellation.

use std::f32::consts::{PI, TAU};

use skyview_render::VertexPositionNormalUv;

use crate::host::SphereSpec;

#[derive(Debug, Clone)]
pub struct SphereGeometry {
    pub vertices: Vec<VertexPositionNormalUv>,
    pub indices: Vec<u32>,
}

/// Tessellate a UV sphere centered on the origin.
///
/// Rows run from the north pole (+Y) to the south pole; each row repeats its
/// first vertex at the seam. Triangles wind counter-clockwise seen from
/// outside, and the degenerate triangles at the poles are skipped, giving
/// `width * (2 * height - 2)` triangles.
pub fn sphere(spec: SphereSpec) -> SphereGeometry {
    let width = spec.width_segments.max(3);
    let height = spec.height_segments.max(2);
    let radius = spec.radius;

    let mut vertices = Vec::with_capacity(((width + 1) * (height + 1)) as usize);
    for iy in 0..=height {
        let v = iy as f32 / height as f32;
        let theta = v * PI;
        for ix in 0..=width {
            let u = ix as f32 / width as f32;
            let phi = u * TAU;
            let normal = [-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin()];
            vertices.push(VertexPositionNormalUv {
                position: normal.map(|c| c * radius),
                normal,
                uv: [u, 1.0 - v],
            });
        }
    }

    let row = width + 1;
    let at = |iy: u32, ix: u32| iy * row + ix;
    let mut indices = Vec::with_capacity((width * (2 * height - 2) * 3) as usize);
    for iy in 0..height {
        for ix in 0..width {
            let a = at(iy, ix + 1);
            let b = at(iy, ix);
            let c = at(iy + 1, ix);
            let d = at(iy + 1, ix + 1);
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    SphereGeometry { vertices, indices }
}
