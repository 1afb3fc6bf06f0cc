//! Headless viewport driver.
//!
//! Opens a GPU device without a window, drives one viewport for a fixed
//! number of frames with scripted navigation and menu clicks, and logs what
//! each frame produced. Run with `RUST_LOG=info` (or `debug`) to see output.
//! An optional argument names a TOML options file.

use std::collections::VecDeque;
use std::path::Path;

use glam::{DMat4, DVec3, Mat4, Vec2};
use sceneview::display::{DisplayImage, WgpuTextureHost};
use sceneview::error::ViewportError;
use sceneview::gpu::{ColorAttachmentReader, RenderContext, RenderTarget};
use sceneview::options::ViewportOptions;
use sceneview::renderer::{
    ColorAttachment, Intersection, LightToggles, PluginId, Renderer,
    RendererFactory,
};
use sceneview::scene::{
    CameraSchema, Extent, MemoryScene, Prim, PrimPath, PrimType, SceneModel,
};
use sceneview::viewport::{
    GizmoMode, GizmoOperation, LabelOverlay, MenuModel, UiRect, Viewport,
    ViewportCommand, ViewportUi,
};

const FRAMES: usize = 8;
const WIDTH: f32 = 640.0;
const HEIGHT: f32 = 480.0;

/// Renderer that clears its target to a per-plugin color.
struct ClearRenderer {
    plugin: PluginId,
    context: RenderContext,
    target: RenderTarget,
    base: wgpu::Color,
    color: wgpu::Color,
    selected: bool,
    lights: LightToggles,
}

impl Renderer for ClearRenderer {
    fn current_plugin(&self) -> &PluginId {
        &self.plugin
    }

    fn set_selection(&mut self, paths: &[PrimPath]) {
        self.selected = !paths.is_empty();
    }

    fn set_render_size(&mut self, width: u32, height: u32) {
        if self.target.ensure_size(&self.context.device, width, height) {
            log::debug!("{} target resized to {width}x{height}", self.plugin);
        }
    }

    fn set_camera_matrices(&mut self, _view: DMat4, _projection: DMat4) {}

    fn set_lighting(&mut self, lights: LightToggles) {
        self.lights = lights;
    }

    fn prepare(&mut self, _scene: &dyn SceneModel) {
        let gain = match (self.lights.ambient, self.lights.dome) {
            (true, true) => 1.0,
            (true, false) | (false, true) => 0.75,
            (false, false) => 0.4,
        };
        self.color = wgpu::Color {
            r: self.base.r * gain + if self.selected { 0.2 } else { 0.0 },
            g: self.base.g * gain,
            b: self.base.b * gain,
            a: 1.0,
        };
    }

    fn render(&mut self) {
        self.target.clear(&self.context, self.color);
    }

    fn color_attachment(&self) -> Option<ColorAttachment<'_>> {
        Some(ColorAttachment::Texture(&self.target.texture))
    }

    fn intersect(&mut self, point: Vec2) -> Option<Intersection> {
        let (width, height) = self.target.size();
        let center = Vec2::new(width as f32, height as f32) / 2.0;
        (point.distance(center) < 50.0).then(|| Intersection {
            path: PrimPath::from("/World/Box"),
            world_point: DVec3::new(0.0, 0.0, 1.0),
            world_normal: DVec3::Z,
        })
    }
}

struct ClearFactory {
    context: RenderContext,
}

impl ClearFactory {
    fn base_color(plugin: &PluginId) -> Option<wgpu::Color> {
        match plugin.as_str() {
            "slate" => Some(wgpu::Color {
                r: 0.18,
                g: 0.2,
                b: 0.24,
                a: 1.0,
            }),
            "sky" => Some(wgpu::Color {
                r: 0.35,
                g: 0.55,
                b: 0.8,
                a: 1.0,
            }),
            _ => None,
        }
    }
}

impl RendererFactory for ClearFactory {
    fn plugins(&self) -> Vec<PluginId> {
        vec![PluginId::from("slate"), PluginId::from("sky")]
    }

    fn display_name(&self, plugin: &PluginId) -> String {
        match plugin.as_str() {
            "slate" => "Slate".to_owned(),
            "sky" => "Sky".to_owned(),
            other => other.to_owned(),
        }
    }

    fn default_plugin(&self) -> PluginId {
        PluginId::from("slate")
    }

    fn create(
        &self,
        plugin: &PluginId,
    ) -> Result<Box<dyn Renderer>, ViewportError> {
        let base = Self::base_color(plugin)
            .ok_or_else(|| ViewportError::UnknownRenderer(plugin.to_string()))?;
        let context = RenderContext::from_device(
            self.context.device.clone(),
            self.context.queue.clone(),
            self.context.backend,
        );
        let target = RenderTarget::new(
            &context.device,
            1,
            1,
            wgpu::TextureFormat::Rgba8Unorm,
        );
        Ok(Box::new(ClearRenderer {
            plugin: plugin.clone(),
            context,
            target,
            base,
            color: base,
            selected: false,
            lights: LightToggles::default(),
        }))
    }
}

/// UI stand-in with a fixed panel and a queue of scripted menu clicks.
struct HeadlessUi {
    rect: UiRect,
    clicks: VecDeque<(usize, ViewportCommand)>,
    frame: usize,
}

impl ViewportUi for HeadlessUi {
    fn menu_bar(&mut self, _menu: &MenuModel) -> Option<ViewportCommand> {
        match self.clicks.front() {
            Some((frame, _)) if *frame == self.frame => {
                self.clicks.pop_front().map(|(_, command)| command)
            }
            _ => None,
        }
    }

    fn inner_rect(&self) -> UiRect {
        self.rect
    }

    fn is_focused(&self) -> bool {
        true
    }

    fn begin_gizmo_frame(&mut self, _id: u32, _rect: UiRect) {}

    fn draw_grid(&mut self, _view: &Mat4, _projection: &Mat4, size: f32) {
        log::trace!("grid of size {size}");
    }

    fn draw_image(&mut self, image: &DisplayImage) {
        log::debug!("draw texture {:?} at {}", image.handle, image.size);
    }

    fn manipulate(
        &mut self,
        _view: &Mat4,
        _projection: &Mat4,
        _operation: GizmoOperation,
        _mode: GizmoMode,
        _transform: &mut Mat4,
    ) {
    }

    fn view_manipulate(
        &mut self,
        _view: &mut Mat4,
        _distance: f32,
        _position: Vec2,
        _size: Vec2,
    ) {
    }

    fn text_size(&self, text: &str) -> Vec2 {
        Vec2::new(text.len() as f32 * 7.0, 13.0)
    }

    fn draw_label(&mut self, label: &LabelOverlay) {
        log::trace!("label {:?} at {}", label.text, label.position);
    }
}

fn demo_scene() -> MemoryScene {
    let mut scene = MemoryScene::new();
    scene.insert(
        "/World/Cam1",
        Prim {
            prim_type: PrimType::Camera,
            xform: Some(DMat4::from_translation(DVec3::new(0.0, 2.0, 12.0))),
            camera: Some(CameraSchema::default()),
            extent: None,
        },
    );
    scene.insert(
        "/World/Box",
        Prim {
            prim_type: PrimType::Mesh,
            extent: Some(Extent::new(DVec3::splat(-1.0), DVec3::ONE)),
            ..Prim::default()
        },
    );
    scene
}

fn load_options() -> Result<ViewportOptions, ViewportError> {
    std::env::args()
        .nth(1)
        .map_or_else(|| Ok(ViewportOptions::default()), |path| {
            ViewportOptions::load(Path::new(&path))
        })
}

fn main() {
    env_logger::init();

    let options = match load_options() {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let context = match pollster::block_on(RenderContext::headless()) {
        Ok(context) => context,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let mut textures =
        WgpuTextureHost::new(context.device.clone(), context.queue.clone());
    let reader = context.reader();
    log::info!("reading back through {}", reader.name());

    let factory = ClearFactory { context };
    let mut viewport = match Viewport::new(0, &options, Box::new(factory), reader)
    {
        Ok(viewport) => viewport,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let mut scene = demo_scene();
    let mut ui = HeadlessUi {
        rect: UiRect::from_min_size(Vec2::ZERO, Vec2::new(WIDTH, HEIGHT)),
        clicks: VecDeque::from([
            (3, ViewportCommand::SwitchRenderer(PluginId::from("sky"))),
            (5, ViewportCommand::UseCamera(PrimPath::from("/World/Cam1"))),
            (6, ViewportCommand::SetDomeLight(true)),
        ]),
        frame: 0,
    };

    for frame in 0..FRAMES {
        ui.frame = frame;
        match frame {
            1 => {
                let _ = viewport.execute(
                    ViewportCommand::Pick {
                        position: Vec2::new(WIDTH, HEIGHT) / 2.0,
                    },
                    &mut scene,
                );
            }
            2 => {
                let _ = viewport.execute(ViewportCommand::FocusSelection, &mut scene);
            }
            _ => {
                let _ = viewport.execute(
                    ViewportCommand::Orbit {
                        delta: Vec2::new(12.0, 0.0),
                    },
                    &mut scene,
                );
            }
        }

        let image = viewport.draw(&mut scene, &mut ui, &mut textures);
        let pose = viewport.camera().pose();
        match image {
            Some(image) => log::info!(
                "frame {frame}: {} via {}, eye {:.2}, texture {:?}",
                image.size,
                viewport.renderer().current_plugin(),
                pose.eye,
                image.handle,
            ),
            None => log::info!("frame {frame}: no image"),
        }
    }

    log::info!(
        "selection {:?}, camera {:?}, {} camera writes",
        scene.selection(),
        viewport.camera().active_camera(),
        scene.xform_writes(),
    );
    viewport.release(&mut textures);
}
