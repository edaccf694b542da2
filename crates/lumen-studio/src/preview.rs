use anyhow::Result;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use lumen_engine::coords::ColorRgba;
use lumen_engine::core::{App, AppControl, FrameCtx};
use lumen_engine::device::GpuInit;
use lumen_engine::render::EffectRenderer;
use lumen_engine::scene::DrawList;
use lumen_engine::window::{Runtime, RuntimeConfig};

use crate::config::StudioConfig;
use crate::demo::DemoScene;

const CLEAR: ColorRgba = ColorRgba::new(0.02, 0.02, 0.03, 1.0);
const TITLE: &str = "lumen studio";

/// Live GPU preview of the demo scene. Space pauses the animation.
struct PreviewApp {
    demo: DemoScene,
    renderer: EffectRenderer,
    list: DrawList,
    textures_uploaded: bool,
    paused: bool,
    /// Animation time shown; frozen while paused.
    time: f32,
    /// Clock time at the last resume, to keep `time` continuous.
    time_offset: f32,
}

impl App for PreviewApp {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        if let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(KeyCode::Space),
                    state: ElementState::Pressed,
                    repeat: false,
                    ..
                },
            ..
        } = event
        {
            self.paused = !self.paused;
            log::info!("animation {}", if self.paused { "paused" } else { "resumed" });
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let clock = ctx.time.elapsed;
        if self.paused {
            self.time_offset = clock - self.time;
        } else {
            self.time = clock - self.time_offset;
        }

        if ctx.time.frame_index % 120 == 0 && ctx.time.dt > 0.0 {
            ctx.runtime
                .set_title(format!("{TITLE} - {:.0} fps", 1.0 / ctx.time.dt));
        }

        let viewport = ctx.window.viewport();
        self.demo.build(&mut self.list, viewport, self.time);

        let Self {
            demo,
            renderer,
            list,
            textures_uploaded,
            ..
        } = self;

        ctx.render(CLEAR, |rctx, target| {
            if !*textures_uploaded {
                renderer.upload_missing(rctx, demo.textures());
                *textures_uploaded = true;
            }
            renderer.render(rctx, target, list);
        })
    }
}

pub fn run(config: &StudioConfig) -> Result<()> {
    let app = PreviewApp {
        demo: DemoScene::new()?,
        renderer: EffectRenderer::new(),
        list: DrawList::new(),
        textures_uploaded: false,
        paused: false,
        time: 0.0,
        time_offset: 0.0,
    };

    let runtime = RuntimeConfig {
        title: TITLE.to_string(),
        initial_size: winit::dpi::LogicalSize::new(config.size.width as f64, config.size.height as f64),
        ..RuntimeConfig::default()
    };

    Runtime::run(runtime, GpuInit::default(), app)
}
