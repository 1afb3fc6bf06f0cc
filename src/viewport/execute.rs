use super::{light_toggles, PoseAuthority, Viewport, ViewportCommand};
use crate::input::InputEvent;
use crate::renderer::PluginId;
use crate::scene::SceneModel;

impl Viewport {
    /// Execute a command.
    ///
    /// Pose commands are dropped while the bound scene camera owns the pose
    /// (see [`PoseAuthority`]); otherwise they are applied and, for a bound
    /// camera, written back to the scene.
    ///
    /// Returns `true` if the command took effect.
    pub fn execute(
        &mut self,
        command: ViewportCommand,
        scene: &mut dyn SceneModel,
    ) -> bool {
        if command.moves_camera() {
            return self.execute_pose(command, scene);
        }

        match command {
            ViewportCommand::Pick { position } => {
                let hit = self.renderer.intersect(position);
                scene.set_selection(hit.iter().map(|h| h.path.clone()).collect());
                if let Some(hit) = hit {
                    scene.set_hit(hit.world_point, hit.world_normal);
                }
                true
            }
            ViewportCommand::SetGizmo { operation, mode } => {
                self.gizmo_operation = operation;
                self.gizmo_mode = mode;
                true
            }
            ViewportCommand::UseFreeCamera => {
                self.camera.set_free_camera_active();
                self.decide_authority();
                true
            }
            ViewportCommand::UseCamera(path) => {
                self.camera.set_active_camera(scene, path);
                self.decide_authority();
                true
            }
            ViewportCommand::SwitchRenderer(plugin) => {
                self.switch_renderer(&plugin)
            }
            ViewportCommand::SetGrid(enabled) => {
                self.display.grid = enabled;
                true
            }
            ViewportCommand::SetAmbientLight(enabled) => {
                self.display.ambient_light = enabled;
                self.renderer.set_lighting(light_toggles(&self.display));
                true
            }
            ViewportCommand::SetDomeLight(enabled) => {
                self.display.dome_light = enabled;
                self.renderer.set_lighting(light_toggles(&self.display));
                true
            }
            ViewportCommand::Hover(inside) => {
                self.window_locked = inside;
                true
            }
            _ => false,
        }
    }

    fn execute_pose(
        &mut self,
        command: ViewportCommand,
        scene: &mut dyn SceneModel,
    ) -> bool {
        if self.authority == PoseAuthority::Scene {
            log::debug!("{command:?} dropped: scene camera owns the pose");
            return false;
        }

        let changed = match command {
            ViewportCommand::Orbit { delta } => {
                self.camera.orbit(delta);
                true
            }
            ViewportCommand::Pan { delta } => {
                self.camera.pan(delta);
                true
            }
            ViewportCommand::DragZoom { delta } => {
                self.camera.zoom_drag(delta);
                true
            }
            ViewportCommand::ScrollZoom { amount } => {
                self.camera.zoom_scroll(amount);
                true
            }
            ViewportCommand::FocusSelection => {
                let selection = scene.selection();
                selection
                    .first()
                    .filter(|path| !path.is_empty())
                    .is_some_and(|path| self.camera.focus_on(scene, path))
            }
            ViewportCommand::FocusOn(path) => {
                !path.is_empty() && self.camera.focus_on(scene, &path)
            }
            _ => false,
        };

        if changed {
            let _ = self.camera.push_to_scene(scene);
        }
        changed
    }

    fn switch_renderer(&mut self, plugin: &PluginId) -> bool {
        if plugin == self.renderer.current_plugin() {
            return false;
        }
        match self.factory.create(plugin) {
            Ok(mut renderer) => {
                renderer.set_lighting(light_toggles(&self.display));
                self.renderer = renderer;
                log::info!(
                    "viewport {} switched to renderer {}",
                    self.id,
                    self.factory.display_name(plugin)
                );
                true
            }
            Err(e) => {
                log::warn!("cannot switch renderer: {e}");
                false
            }
        }
    }

    /// Route a raw input event through the input processor and execute the
    /// resulting commands.
    ///
    /// Pose commands are judged against the focus last reported by
    /// [`Viewport::draw`] or [`Viewport::set_focus`].
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        scene: &mut dyn SceneModel,
    ) {
        for command in self.input.handle_event(event) {
            let _ = self.execute(command, scene);
        }
    }

    /// Execute the command bound to `key`, if any.
    ///
    /// Returns `true` if a bound command took effect.
    pub fn handle_key_press(
        &mut self,
        key: &str,
        scene: &mut dyn SceneModel,
    ) -> bool {
        self.input
            .handle_key_press(key)
            .is_some_and(|command| self.execute(command, scene))
    }
}
