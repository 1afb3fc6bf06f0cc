//! The per-frame viewport orchestrator.
//!
//! A [`Viewport`] owns one panel's camera, renderer, readback state and
//! input processor. The host calls [`Viewport::draw`] once per UI frame and
//! forwards input through [`Viewport::handle_event`] /
//! [`Viewport::handle_key_press`] (or issues [`ViewportCommand`]s directly).

mod authority;
/// The viewport's interactive vocabulary.
pub mod command;
mod execute;
mod frame;
/// Transform gizmo and view cube.
pub mod gizmo;
/// Menu bar contents.
pub mod menu;
/// UI surface the viewport draws through.
pub mod ui;

pub use authority::PoseAuthority;
pub use command::ViewportCommand;
pub use gizmo::{GizmoMode, GizmoOperation};
pub use menu::{Menu, MenuItem, MenuModel};
pub use ui::{LabelOverlay, UiRect, ViewportUi};

use crate::camera::CameraController;
use crate::display::{FrameReadback, TextureHost};
use crate::error::ViewportError;
use crate::gpu::ColorAttachmentReader;
use crate::input::InputProcessor;
use crate::options::{DisplayOptions, ViewportOptions};
use crate::renderer::{LightToggles, Renderer, RendererFactory};

/// One interactive viewport panel.
pub struct Viewport {
    id: u32,
    camera: CameraController,
    factory: Box<dyn RendererFactory>,
    renderer: Box<dyn Renderer>,
    readback: FrameReadback,
    input: InputProcessor,
    display: DisplayOptions,
    gizmo_operation: GizmoOperation,
    gizmo_mode: GizmoMode,
    authority: PoseAuthority,
    focused: bool,
    window_locked: bool,
}

impl Viewport {
    /// Create a viewport with the factory's default renderer.
    ///
    /// `id` scopes this panel's gizmo widgets; give each viewport in a
    /// window a different one.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError`] if the default renderer cannot be created.
    pub fn new(
        id: u32,
        options: &ViewportOptions,
        factory: Box<dyn RendererFactory>,
        reader: Box<dyn ColorAttachmentReader>,
    ) -> Result<Self, ViewportError> {
        let plugin = factory.default_plugin();
        let mut renderer = factory.create(&plugin)?;
        let display = options.display.clone();
        renderer.set_lighting(light_toggles(&display));
        log::info!(
            "viewport {id} using renderer {}",
            factory.display_name(&plugin)
        );

        Ok(Self {
            id,
            camera: CameraController::new(options),
            factory,
            renderer,
            readback: FrameReadback::new(reader),
            input: InputProcessor::new(
                &options.navigation,
                options.keybindings.clone(),
            ),
            display,
            gizmo_operation: GizmoOperation::default(),
            gizmo_mode: GizmoMode::default(),
            authority: PoseAuthority::default(),
            focused: true,
            window_locked: false,
        })
    }

    /// Camera controller.
    #[must_use]
    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    /// Current renderer.
    #[must_use]
    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    /// Readback and display-texture state.
    #[must_use]
    pub fn readback(&self) -> &FrameReadback {
        &self.readback
    }

    /// Grid and light toggles.
    #[must_use]
    pub fn display_options(&self) -> &DisplayOptions {
        &self.display
    }

    /// Current transform gizmo operation and mode.
    #[must_use]
    pub fn gizmo(&self) -> (GizmoOperation, GizmoMode) {
        (self.gizmo_operation, self.gizmo_mode)
    }

    /// Current pose authority.
    ///
    /// Re-decided at the start of every frame, on [`Viewport::set_focus`] and
    /// whenever the active camera changes.
    #[must_use]
    pub fn authority(&self) -> PoseAuthority {
        self.authority
    }

    /// Report a focus change that happened between frames.
    ///
    /// Events routed through [`Viewport::handle_event`] before the next
    /// [`Viewport::draw`] are then judged against the new focus state.
    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
        self.decide_authority();
    }

    fn decide_authority(&mut self) {
        self.authority =
            PoseAuthority::decide(self.focused, self.camera.active_camera());
    }

    /// Whether the host window must not move (pointer is over the viewport).
    #[must_use]
    pub fn window_locked(&self) -> bool {
        self.window_locked
    }

    /// Release the display texture. Call before dropping the viewport.
    pub fn release(&mut self, textures: &mut dyn TextureHost) {
        self.readback.release(textures);
    }
}

fn light_toggles(display: &DisplayOptions) -> LightToggles {
    LightToggles {
        ambient: display.ambient_light,
        dome: display.dome_light,
    }
}
