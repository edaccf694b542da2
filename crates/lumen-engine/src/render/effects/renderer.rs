use std::collections::HashMap;
use std::ops::Range;

use wgpu::util::DeviceExt;

use crate::coords::Rect;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawList, TextureId, TextureSet};
use crate::shading::{ImageTexture, ProgramKind};

use super::common::{
    QUAD_INDICES, QUAD_VERTICES, QuadVertex, VIEWPORT_UBO_SIZE, ViewportUniform,
    logical_clip_to_scissor, premul_alpha_blend, shader_source,
};
use super::instance::EffectInstance;
use super::textures::{GpuTexture, nearest_clamp_sampler, texture_bind_group_layout};

/// Texel bound when a texture program has no (or an unknown) texture:
/// opaque black, like an unbound sampler.
const UNBOUND_TEXEL: [u8; 4] = [0, 0, 0, 255];

/// Consecutive instances drawn with one pipeline, texture and scissor.
#[derive(Debug, Clone, PartialEq)]
struct Batch {
    kind: ProgramKind,
    /// `None` binds the unbound texel (texture programs only).
    texture: Option<TextureId>,
    clip: Option<Rect>,
    instances: Range<u32>,
}

/// Draws every command of a [`DrawList`] with its effect program.
///
/// Pipelines are built on first use per program and rebuilt when the surface
/// format changes. Textures must be uploaded with
/// [`upload_texture`](Self::upload_texture) before the draws that use them.
#[derive(Default)]
pub struct EffectRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipelines: HashMap<ProgramKind, wgpu::RenderPipeline>,

    viewport_bgl: Option<wgpu::BindGroupLayout>,
    texture_bgl: Option<wgpu::BindGroupLayout>,
    viewport_bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    sampler: Option<wgpu::Sampler>,

    textures: HashMap<TextureId, GpuTexture>,
    unbound: Option<GpuTexture>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
}

impl EffectRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads (or replaces) the GPU copy of texture `id`.
    pub fn upload_texture(&mut self, ctx: &RenderCtx<'_>, id: TextureId, image: &ImageTexture) {
        self.ensure_layouts(ctx);
        self.ensure_sampler(ctx);
        let (Some(layout), Some(sampler)) = (self.texture_bgl.as_ref(), self.sampler.as_ref()) else {
            return;
        };

        let label = format!("lumen effect texture {}", id.0);
        let texture = GpuTexture::upload(ctx.device, ctx.queue, layout, sampler, &label, image);
        log::debug!("uploaded texture {id:?} ({}x{})", image.width(), image.height());
        self.textures.insert(id, texture);
    }

    /// Uploads every texture in `set` that is not resident yet.
    pub fn upload_missing(&mut self, ctx: &RenderCtx<'_>, set: &TextureSet) {
        for (id, image) in set.iter() {
            if !self.textures.contains_key(&id) {
                self.upload_texture(ctx, id, image);
            }
        }
    }

    pub fn remove_texture(&mut self, id: TextureId) -> bool {
        self.textures.remove(&id).is_some()
    }

    /// Size of a resident texture.
    pub fn texture_size(&self, id: TextureId) -> Option<(u32, u32)> {
        self.textures.get(&id).map(|t| t.size)
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        let (instances, batches) = self.collect(draw_list);
        if instances.is_empty() {
            return;
        }

        self.ensure_layouts(ctx);
        self.ensure_sampler(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);
        self.ensure_unbound(ctx);
        for kind in ProgramKind::ALL {
            if batches.iter().any(|b| b.kind == kind) {
                self.ensure_pipeline(ctx, kind);
            }
        }

        self.write_viewport_uniform(ctx);
        self.ensure_instance_capacity(ctx, instances.len());

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&instances));

        let Some(viewport_bind_group) = self.viewport_bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lumen effect pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(0, viewport_bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);

        let mut bound_kind = None;
        for batch in &batches {
            let Some((sx, sy, sw, sh)) =
                logical_clip_to_scissor(batch.clip, ctx.viewport, ctx.scale_factor)
            else {
                continue;
            };
            let Some(pipeline) = self.pipelines.get(&batch.kind) else { continue };

            if bound_kind != Some(batch.kind) {
                rpass.set_pipeline(pipeline);
                bound_kind = Some(batch.kind);
            }

            if batch.kind.binds_texture() {
                let texture = batch
                    .texture
                    .and_then(|id| self.textures.get(&id))
                    .or(self.unbound.as_ref());
                let Some(texture) = texture else { continue };
                rpass.set_bind_group(1, &texture.bind_group, &[]);
            }

            rpass.set_scissor_rect(sx, sy, sw, sh);
            rpass.draw_indexed(0..6, 0, batch.instances.clone());
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    /// Packs instances in paint order and splits them into batches.
    fn collect(&self, draw_list: &mut DrawList) -> (Vec<EffectInstance>, Vec<Batch>) {
        let mut instances = Vec::with_capacity(draw_list.len());
        let mut batches: Vec<Batch> = Vec::new();
        let mut warned_missing = false;

        for item in draw_list.iter_in_paint_order() {
            let kind = item.cmd.kind();
            let texture = if kind.binds_texture() {
                item.cmd.texture().filter(|id| {
                    let resident = self.textures.contains_key(id);
                    if !resident && !warned_missing {
                        log::warn!("texture {id:?} is not uploaded; binding the unbound texel");
                        warned_missing = true;
                    }
                    resident
                })
            } else {
                None
            };

            let index = instances.len() as u32;
            instances.push(EffectInstance::from_cmd(&item.cmd));

            match batches.last_mut() {
                Some(b) if b.kind == kind && b.texture == texture && b.clip == item.clip_rect => {
                    b.instances.end = index + 1;
                }
                _ => batches.push(Batch {
                    kind,
                    texture,
                    clip: item.clip_rect,
                    instances: index..index + 1,
                }),
            }
        }

        (instances, batches)
    }

    fn ensure_layouts(&mut self, ctx: &RenderCtx<'_>) {
        if self.viewport_bgl.is_none() {
            self.viewport_bgl = Some(ctx.device.create_bind_group_layout(
                &wgpu::BindGroupLayoutDescriptor {
                    label: Some("lumen effect viewport bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: Some(VIEWPORT_UBO_SIZE),
                        },
                        count: None,
                    }],
                },
            ));
        }
        if self.texture_bgl.is_none() {
            self.texture_bgl = Some(texture_bind_group_layout(ctx.device));
        }
    }

    fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_none() {
            self.sampler = Some(nearest_clamp_sampler(ctx.device));
        }
    }

    fn ensure_unbound(&mut self, ctx: &RenderCtx<'_>) {
        if self.unbound.is_some() {
            return;
        }
        let (Some(layout), Some(sampler)) = (self.texture_bgl.as_ref(), self.sampler.as_ref()) else {
            return;
        };
        self.unbound = Some(GpuTexture::upload(
            ctx.device,
            ctx.queue,
            layout,
            sampler,
            "lumen effect unbound texel",
            &ImageTexture::pixel(UNBOUND_TEXEL),
        ));
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>, kind: ProgramKind) {
        if self.pipeline_format != Some(ctx.surface_format) {
            if self.pipeline_format.is_some() {
                log::debug!("surface format changed to {:?}; rebuilding effect pipelines", ctx.surface_format);
            }
            self.pipelines.clear();
            self.pipeline_format = Some(ctx.surface_format);
        }
        if self.pipelines.contains_key(&kind) {
            return;
        }

        let Some(viewport_bgl) = self.viewport_bgl.as_ref() else { return };
        let Some(texture_bgl) = self.texture_bgl.as_ref() else { return };

        let name = kind.name();
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("lumen {name} shader")),
            source: wgpu::ShaderSource::Wgsl(shader_source(kind).into()),
        });

        let mut layouts = vec![viewport_bgl];
        if kind.binds_texture() {
            layouts.push(texture_bgl);
        }
        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("lumen {name} pipeline layout")),
            bind_group_layouts: &layouts,
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("lumen {name} pipeline")),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), EffectInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("built {name} pipeline for {:?}", ctx.surface_format);
        self.pipelines.insert(kind, pipeline);
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.viewport_bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.viewport_bgl.as_ref() else { return };

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lumen effect viewport ubo"),
            size: VIEWPORT_UBO_SIZE.get(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lumen effect viewport bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.viewport_bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lumen effect quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lumen effect quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn write_viewport_uniform(&self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        ctx.queue
            .write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::new(ctx.viewport)));
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(64);
        let new_size = (new_cap * std::mem::size_of::<EffectInstance>()) as u64;
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lumen effect instance vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}
