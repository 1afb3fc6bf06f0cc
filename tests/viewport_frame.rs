//! Frame-level behavior of the viewport against in-memory collaborators.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{DMat4, DVec3, Mat4, Vec2, Vec3};
use sceneview::display::{DisplayImage, MemoryTextureHost};
use sceneview::error::ViewportError;
use sceneview::gpu::{DisplayFormat, HostMemoryReader};
use sceneview::input::InputEvent;
use sceneview::options::ViewportOptions;
use sceneview::renderer::{
    ColorAttachment, HostPixels, Intersection, LightToggles, PluginId,
    Renderer, RendererFactory,
};
use sceneview::scene::{
    CameraSchema, Extent, MemoryScene, Prim, PrimPath, PrimType, SceneModel,
};
use sceneview::viewport::{
    GizmoMode, GizmoOperation, LabelOverlay, MenuModel, PoseAuthority,
    UiRect, Viewport, ViewportCommand, ViewportUi,
};

#[derive(Default)]
struct RendererLog {
    sizes: Vec<(u32, u32)>,
    views: Vec<DMat4>,
    lights: Vec<LightToggles>,
    renders: usize,
    unsupported: bool,
}

struct FakeRenderer {
    plugin: PluginId,
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    log: Rc<RefCell<RendererLog>>,
}

impl Renderer for FakeRenderer {
    fn current_plugin(&self) -> &PluginId {
        &self.plugin
    }

    fn set_selection(&mut self, _paths: &[PrimPath]) {}

    fn set_render_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.log.borrow_mut().sizes.push((width, height));
    }

    fn set_camera_matrices(&mut self, view: DMat4, _projection: DMat4) {
        self.log.borrow_mut().views.push(view);
    }

    fn set_lighting(&mut self, lights: LightToggles) {
        self.log.borrow_mut().lights.push(lights);
    }

    fn prepare(&mut self, _scene: &dyn SceneModel) {}

    fn render(&mut self) {
        let mut log = self.log.borrow_mut();
        log.renders += 1;
        let shade = log.renders as u8;
        self.pixels = vec![shade; (self.width * self.height * 4) as usize];
    }

    fn color_attachment(&self) -> Option<ColorAttachment<'_>> {
        if self.log.borrow().unsupported {
            return Some(ColorAttachment::Unsupported("render buffer"));
        }
        Some(ColorAttachment::HostPixels(HostPixels {
            pixels: &self.pixels,
            width: self.width,
            height: self.height,
            format: wgpu::TextureFormat::Rgba8Unorm,
        }))
    }

    fn intersect(&mut self, _point: Vec2) -> Option<Intersection> {
        Some(Intersection {
            path: PrimPath::from("/World/Box"),
            world_point: DVec3::new(0.5, 1.0, 0.0),
            world_normal: DVec3::Y,
        })
    }
}

struct FakeFactory {
    log: Rc<RefCell<RendererLog>>,
}

impl RendererFactory for FakeFactory {
    fn plugins(&self) -> Vec<PluginId> {
        vec![PluginId::from("a"), PluginId::from("b")]
    }

    fn display_name(&self, plugin: &PluginId) -> String {
        format!("Renderer {}", plugin.as_str().to_uppercase())
    }

    fn default_plugin(&self) -> PluginId {
        PluginId::from("a")
    }

    fn create(
        &self,
        plugin: &PluginId,
    ) -> Result<Box<dyn Renderer>, ViewportError> {
        if !self.plugins().contains(plugin) {
            return Err(ViewportError::UnknownRenderer(plugin.to_string()));
        }
        Ok(Box::new(FakeRenderer {
            plugin: plugin.clone(),
            pixels: Vec::new(),
            width: 0,
            height: 0,
            log: Rc::clone(&self.log),
        }))
    }
}

#[derive(Default)]
struct FakeUi {
    rect: UiRect,
    focused: bool,
    click: Option<ViewportCommand>,
    cube_view: Option<Mat4>,
    gizmo_edit: Option<Mat4>,
    menus: Vec<MenuModel>,
    gizmo_frames: Vec<u32>,
    grids: Vec<f32>,
    images: Vec<DisplayImage>,
    labels: Vec<LabelOverlay>,
}

impl FakeUi {
    fn panel(width: f32, height: f32) -> Self {
        Self {
            rect: UiRect::from_min_size(
                Vec2::new(10.0, 20.0),
                Vec2::new(width, height),
            ),
            focused: true,
            ..Self::default()
        }
    }
}

impl ViewportUi for FakeUi {
    fn menu_bar(&mut self, menu: &MenuModel) -> Option<ViewportCommand> {
        self.menus.push(menu.clone());
        self.click.take()
    }

    fn inner_rect(&self) -> UiRect {
        self.rect
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn begin_gizmo_frame(&mut self, id: u32, _rect: UiRect) {
        self.gizmo_frames.push(id);
    }

    fn draw_grid(&mut self, _view: &Mat4, _projection: &Mat4, size: f32) {
        self.grids.push(size);
    }

    fn draw_image(&mut self, image: &DisplayImage) {
        self.images.push(*image);
    }

    fn manipulate(
        &mut self,
        _view: &Mat4,
        _projection: &Mat4,
        _operation: GizmoOperation,
        _mode: GizmoMode,
        transform: &mut Mat4,
    ) {
        if let Some(edit) = self.gizmo_edit.take() {
            *transform = edit;
        }
    }

    fn view_manipulate(
        &mut self,
        view: &mut Mat4,
        _distance: f32,
        _position: Vec2,
        _size: Vec2,
    ) {
        if let Some(edit) = self.cube_view.take() {
            *view = edit;
        }
    }

    fn text_size(&self, text: &str) -> Vec2 {
        Vec2::new(text.len() as f32 * 8.0, 10.0)
    }

    fn draw_label(&mut self, label: &LabelOverlay) {
        self.labels.push(label.clone());
    }
}

struct Harness {
    viewport: Viewport,
    scene: MemoryScene,
    textures: MemoryTextureHost,
    log: Rc<RefCell<RendererLog>>,
}

impl Harness {
    fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let log = Rc::new(RefCell::new(RendererLog::default()));
        let viewport = Viewport::new(
            7,
            &ViewportOptions::default(),
            Box::new(FakeFactory {
                log: Rc::clone(&log),
            }),
            Box::new(HostMemoryReader),
        )
        .unwrap();

        let mut scene = MemoryScene::new();
        scene.insert(
            "/World/Cam1",
            Prim {
                prim_type: PrimType::Camera,
                xform: Some(DMat4::from_translation(DVec3::new(0.0, 0.0, 10.0))),
                camera: Some(CameraSchema::default()),
                extent: None,
            },
        );
        scene.insert(
            "/World/Box",
            Prim {
                prim_type: PrimType::Mesh,
                xform: Some(DMat4::IDENTITY),
                extent: Some(Extent::new(DVec3::splat(-1.0), DVec3::ONE)),
                ..Prim::default()
            },
        );

        Self {
            viewport,
            scene,
            textures: MemoryTextureHost::default(),
            log,
        }
    }

    fn draw(&mut self, ui: &mut FakeUi) -> Option<DisplayImage> {
        self.viewport
            .draw(&mut self.scene, ui, &mut self.textures)
    }

    fn execute(&mut self, command: ViewportCommand) -> bool {
        self.viewport.execute(command, &mut self.scene)
    }

    fn bind_camera(&mut self) {
        assert!(self.execute(ViewportCommand::UseCamera(PrimPath::from(
            "/World/Cam1"
        ))));
    }
}

#[test]
fn degenerate_panel_skips_the_frame() {
    let mut h = Harness::new();
    let mut ui = FakeUi::panel(0.0, 100.0);

    assert!(h.draw(&mut ui).is_none());
    assert_eq!(ui.menus.len(), 1);
    assert!(ui.gizmo_frames.is_empty());
    assert!(ui.labels.is_empty());
    assert_eq!(h.log.borrow().renders, 0);
    assert_eq!(h.textures.creates(), 0);
}

#[test]
fn frame_renders_at_panel_size_and_draws_flipped_image() {
    let mut h = Harness::new();
    let mut ui = FakeUi::panel(64.0, 48.0);

    let image = h.draw(&mut ui).unwrap();
    assert_eq!(ui.gizmo_frames, [7]);
    assert_eq!(h.log.borrow().sizes, [(64, 48)]);
    assert_eq!(h.log.borrow().views, [h.viewport.camera().view_matrix()]);
    assert_eq!(image.size, Vec2::new(64.0, 48.0));
    assert_eq!(image.uv_min, Vec2::new(0.0, 1.0));
    assert_eq!(image.uv_max, Vec2::new(1.0, 0.0));
    assert_eq!(ui.images, [image]);
}

#[test]
fn display_texture_is_reused_until_the_panel_resizes() {
    let mut h = Harness::new();
    let mut ui = FakeUi::panel(64.0, 48.0);

    let first = h.draw(&mut ui).unwrap();
    let second = h.draw(&mut ui).unwrap();
    assert_eq!(first.handle, second.handle);
    assert_eq!(h.textures.creates(), 1);
    assert_eq!(h.textures.updates(), 1);

    let handle = h.viewport.readback().capture().handle().unwrap();
    assert_eq!(h.textures.format(handle), Some(DisplayFormat::Rgba8Unorm));
    assert!(h.textures.pixels(handle).unwrap().iter().all(|&b| b == 2));

    ui.rect = UiRect::from_min_size(Vec2::ZERO, Vec2::new(32.0, 32.0));
    let third = h.draw(&mut ui).unwrap();
    assert_ne!(third.handle, second.handle);
    assert_eq!(h.textures.creates(), 2);
    assert_eq!(h.textures.removes(), 1);
    assert_eq!(h.textures.live_textures(), 1);

    h.viewport.release(&mut h.textures);
    assert_eq!(h.textures.live_textures(), 0);
}

#[test]
fn unreadable_attachment_keeps_the_previous_texture() {
    let mut h = Harness::new();
    let mut ui = FakeUi::panel(16.0, 16.0);
    let _ = h.draw(&mut ui).unwrap();

    h.log.borrow_mut().unsupported = true;
    assert!(h.draw(&mut ui).is_none());
    assert_eq!(ui.images.len(), 1);
    assert_eq!(h.textures.live_textures(), 1);
    assert_eq!(ui.labels.len(), 2);
}

#[test]
fn pick_selects_the_hit_prim() {
    let mut h = Harness::new();
    assert!(h.execute(ViewportCommand::Pick {
        position: Vec2::new(5.0, 5.0)
    }));
    assert_eq!(h.scene.selection(), [PrimPath::from("/World/Box")]);
    let hit = h.scene.hit().unwrap();
    assert_eq!(hit.point, DVec3::new(0.5, 1.0, 0.0));
    assert_eq!(hit.normal, DVec3::Y);
}

#[test]
fn unfocused_bound_viewport_follows_the_scene_camera() {
    let mut h = Harness::new();
    h.bind_camera();
    let cam = PrimPath::from("/World/Cam1");

    h.scene
        .set_xform(&cam, DMat4::from_translation(DVec3::new(3.0, 0.0, 10.0)));
    let writes = h.scene.xform_writes();

    let mut ui = FakeUi::panel(64.0, 48.0);
    ui.focused = false;
    let _ = h.draw(&mut ui);

    assert_eq!(h.viewport.authority(), PoseAuthority::Scene);
    let eye = h.viewport.camera().pose().eye;
    assert!(eye.abs_diff_eq(DVec3::new(3.0, 0.0, 10.0), 1e-6));

    assert!(!h.execute(ViewportCommand::Orbit {
        delta: Vec2::new(40.0, 0.0)
    }));
    assert_eq!(h.viewport.camera().pose().eye, eye);
    assert_eq!(h.scene.xform_writes(), writes);
}

#[test]
fn focused_bound_viewport_writes_navigation_to_the_scene() {
    let mut h = Harness::new();
    h.bind_camera();
    let mut ui = FakeUi::panel(64.0, 48.0);
    let _ = h.draw(&mut ui);
    assert_eq!(h.viewport.authority(), PoseAuthority::Local);

    let writes = h.scene.xform_writes();
    assert!(h.execute(ViewportCommand::Orbit {
        delta: Vec2::new(40.0, 0.0)
    }));
    assert_eq!(h.scene.xform_writes(), writes + 1);

    let written = h.scene.xform(&PrimPath::from("/World/Cam1"));
    let expected = h.viewport.camera().view_matrix().inverse();
    assert!(written.abs_diff_eq(expected, 1e-9));
}

#[test]
fn focus_gained_between_frames_takes_the_pose_back() {
    let mut h = Harness::new();
    h.bind_camera();
    let mut ui = FakeUi::panel(64.0, 48.0);
    ui.focused = false;
    let _ = h.draw(&mut ui);
    assert_eq!(h.viewport.authority(), PoseAuthority::Scene);

    h.viewport.set_focus(true);
    assert_eq!(h.viewport.authority(), PoseAuthority::Local);

    let writes = h.scene.xform_writes();
    h.viewport.handle_event(
        InputEvent::Scroll { delta: 1.0 },
        &mut h.scene,
    );
    assert_eq!(h.scene.xform_writes(), writes + 1);
}

#[test]
fn menu_click_switches_renderer_and_label() {
    let mut h = Harness::new();
    let mut ui = FakeUi::panel(200.0, 100.0);
    ui.click = Some(ViewportCommand::SwitchRenderer(PluginId::from("b")));

    let _ = h.draw(&mut ui);
    assert_eq!(h.viewport.renderer().current_plugin(), &PluginId::from("b"));
    // New renderer gets the current lights on creation
    assert_eq!(h.log.borrow().lights.len(), 2);

    let label = ui.labels.last().unwrap();
    assert_eq!(label.text, "Renderer B");
    // "Renderer B" is 80 px wide in the fake font
    assert_eq!(label.position, Vec2::new(210.0 - 64.0 - 40.0, 32.0));
    assert_eq!(
        label.background,
        UiRect::new(Vec2::new(100.0, 26.0), Vec2::new(192.0, 48.0))
    );
    assert_eq!(label.rounding, 6.0);
    assert_eq!(label.background_alpha, 0.2);

    let renderer_menu = ui.menus[0].menu("renderer").unwrap();
    assert!(renderer_menu.items[0].checked);
}

#[test]
fn menu_click_binds_camera() {
    let mut h = Harness::new();
    let mut ui = FakeUi::panel(64.0, 48.0);
    let item = h
        .viewport
        .menu_model(&h.scene)
        .menu("cameras")
        .unwrap()
        .items
        .iter()
        .find(|item| item.label == "Cam1")
        .unwrap()
        .clone();
    ui.click = Some(item.command);

    let _ = h.draw(&mut ui);
    assert_eq!(h.scene.active_camera(), Some(&PrimPath::from("/World/Cam1")));
    let eye = h.viewport.camera().pose().eye;
    assert!(eye.abs_diff_eq(DVec3::new(0.0, 0.0, 10.0), 1e-6));
}

#[test]
fn grid_follows_the_show_menu() {
    let mut h = Harness::new();
    let mut ui = FakeUi::panel(64.0, 48.0);

    let _ = h.draw(&mut ui);
    assert!(h.scene.grid_populated());
    assert_eq!(ui.grids, [10.0]);

    ui.click = Some(ViewportCommand::SetGrid(false));
    let _ = h.draw(&mut ui);
    assert!(!h.scene.grid_populated());
    assert_eq!(ui.grids.len(), 1);
}

#[test]
fn hovering_locks_the_host_window() {
    let mut h = Harness::new();
    assert!(h.execute(ViewportCommand::Hover(true)));
    assert!(h.viewport.window_locked());
    assert!(h.execute(ViewportCommand::Hover(false)));
    assert!(!h.viewport.window_locked());
}

#[test]
fn view_cube_drag_reorients_the_free_camera() {
    let mut h = Harness::new();
    let mut ui = FakeUi::panel(64.0, 48.0);
    ui.cube_view = Some(Mat4::look_at_rh(
        Vec3::new(0.0, 0.0, 8.0),
        Vec3::ZERO,
        Vec3::Y,
    ));

    let _ = h.draw(&mut ui);
    let eye = h.viewport.camera().pose().eye;
    assert!(eye.abs_diff_eq(DVec3::new(0.0, 0.0, 8.0), 1e-4));
    assert_eq!(h.scene.xform_writes(), 0);
}

#[test]
fn gizmo_edits_the_first_selected_prim() {
    let mut h = Harness::new();
    let box_path = PrimPath::from("/World/Box");
    h.scene.set_selection(vec![box_path.clone()]);

    let moved = Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0));
    let mut ui = FakeUi::panel(64.0, 48.0);
    ui.gizmo_edit = Some(moved);

    let _ = h.draw(&mut ui);
    assert_eq!(h.scene.xform(&box_path), moved.as_dmat4());
}
