//! Shared GPU types and utilities for the effect pipelines.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Viewport};
use crate::shading::ProgramKind;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    pub(super) fn new(viewport: Viewport) -> Self {
        Self {
            viewport: [viewport.width.max(1.0), viewport.height.max(1.0)],
            _pad: [0.0; 2],
        }
    }
}

pub(super) const VIEWPORT_UBO_SIZE: NonZeroU64 =
    match NonZeroU64::new(std::mem::size_of::<ViewportUniform>() as u64) {
        Some(size) => size,
        None => panic!("ViewportUniform is zero-sized"),
    };

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Corners in the same order as `Quad::colors`: TL, TR, BR, BL.
pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

// ── shader sources ────────────────────────────────────────────────────────

pub(super) fn shader_source(kind: ProgramKind) -> &'static str {
    match kind {
        ProgramKind::Light => concat!(
            include_str!("shaders/common.wgsl"),
            include_str!("shaders/light.wgsl")
        ),
        ProgramKind::Minimap => concat!(
            include_str!("shaders/common.wgsl"),
            include_str!("shaders/minimap.wgsl")
        ),
        ProgramKind::Portal => concat!(
            include_str!("shaders/common.wgsl"),
            include_str!("shaders/portal.wgsl")
        ),
        ProgramKind::Composite => concat!(
            include_str!("shaders/common.wgsl"),
            include_str!("shaders/compositor.wgsl")
        ),
    }
}

// ── scissor rect ──────────────────────────────────────────────────────────

/// Converts a logical-pixel clip rect to a physical scissor rect `(x, y, w, h)`.
///
/// `None` clip means the full viewport. Returns `None` for a zero-area result;
/// the batch is skipped.
pub(super) fn logical_clip_to_scissor(
    clip: Option<Rect>,
    viewport: Viewport,
    scale: f32,
) -> Option<(u32, u32, u32, u32)> {
    let phys_vw = (viewport.width * scale).max(1.0) as u32;
    let phys_vh = (viewport.height * scale).max(1.0) as u32;

    let (x, y, w, h) = match clip {
        None => (0, 0, phys_vw, phys_vh),
        Some(r) => {
            let min = r.min();
            let max = r.max();
            let x = ((min.x * scale).max(0.0) as u32).min(phys_vw);
            let y = ((min.y * scale).max(0.0) as u32).min(phys_vh);
            let x2 = ((max.x * scale).max(0.0) as u32).min(phys_vw);
            let y2 = ((max.y * scale).max(0.0) as u32).min(phys_vh);
            (x, y, x2.saturating_sub(x), y2.saturating_sub(y))
        }
    };

    if w == 0 || h == 0 { None } else { Some((x, y, w, h)) }
}
