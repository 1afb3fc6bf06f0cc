use glam::Vec2;

use super::gizmo::{update_transform_gizmo, update_view_cube};
use super::menu::{MenuModel, MenuState};
use super::ui::{LabelOverlay, UiRect, ViewportUi};
use super::{PoseAuthority, Viewport};
use crate::display::{DisplayImage, TextureHost};
use crate::scene::SceneModel;

/// Label background margin and corner rounding.
const LABEL_MARGIN: f32 = 6.0;
/// Label center distance from the right edge.
const LABEL_RIGHT_OFFSET: f32 = 64.0;
/// Label background opacity.
const LABEL_BACKGROUND_ALPHA: f32 = 0.2;

impl Viewport {
    /// Draw one frame.
    ///
    /// Sequence: menu bar, skip if the panel has no area, gizmo frame, pose
    /// authority (pulling from the bound camera under scene authority),
    /// projection, grid, render and readback, transform gizmo, view cube,
    /// renderer label.
    ///
    /// Returns the display image drawn this frame, or `None` if the frame
    /// was skipped or the readback failed.
    pub fn draw(
        &mut self,
        scene: &mut dyn SceneModel,
        ui: &mut dyn ViewportUi,
        textures: &mut dyn TextureHost,
    ) -> Option<DisplayImage> {
        let menu = self.menu_model(scene);
        if let Some(command) = ui.menu_bar(&menu) {
            let _ = self.execute(command, scene);
        }

        let rect = ui.inner_rect();
        if rect.is_degenerate() {
            return None;
        }

        ui.begin_gizmo_frame(self.id, rect);

        self.set_focus(ui.is_focused());
        if self.authority == PoseAuthority::Scene {
            self.camera.pull_from_scene(scene);
        }

        self.camera
            .update_projection(scene, f64::from(rect.width() / rect.height()));

        let view = self.camera.view_matrix();
        let projection = self.camera.projection_matrix();

        scene.populate_grid(self.display.grid);
        if self.display.grid {
            ui.draw_grid(
                &view.as_mat4(),
                &projection.as_mat4(),
                self.display.grid_size,
            );
        }

        let image = self.render(scene, ui, textures, rect);

        let _ = update_transform_gizmo(
            ui,
            scene,
            view,
            projection,
            self.gizmo_operation,
            self.gizmo_mode,
        );

        if update_view_cube(ui, rect, &mut self.camera) {
            match self.authority {
                PoseAuthority::Local => {
                    let _ = self.camera.push_to_scene(scene);
                }
                PoseAuthority::Scene => self.camera.pull_from_scene(scene),
            }
        }

        self.draw_label(ui, rect);
        ui.end_gizmo_frame();
        image
    }

    fn render(
        &mut self,
        scene: &dyn SceneModel,
        ui: &mut dyn ViewportUi,
        textures: &mut dyn TextureHost,
        rect: UiRect,
    ) -> Option<DisplayImage> {
        let width = rect.width() as u32;
        let height = rect.height() as u32;
        if width == 0 || height == 0 {
            return None;
        }

        self.renderer.set_selection(&scene.selection());
        self.renderer.set_render_size(width, height);
        self.renderer.set_camera_matrices(
            self.camera.view_matrix(),
            self.camera.projection_matrix(),
        );
        self.renderer.prepare(scene);
        self.renderer.render();

        let Some(attachment) = self.renderer.color_attachment() else {
            log::debug!("renderer produced no color attachment");
            return None;
        };
        match self
            .readback
            .capture_frame(&attachment, width, height, textures)
        {
            Ok(image) => {
                ui.draw_image(&image);
                Some(image)
            }
            Err(e) => {
                log::debug!("skipping frame: {e}");
                None
            }
        }
    }

    fn draw_label(&self, ui: &mut dyn ViewportUi, rect: UiRect) {
        let text = self.factory.display_name(self.renderer.current_plugin());
        let text_size = ui.text_size(&text);
        let position = Vec2::new(
            rect.max.x - LABEL_RIGHT_OFFSET - text_size.x / 2.0,
            rect.min.y + LABEL_MARGIN * 2.0,
        );
        ui.draw_label(&LabelOverlay {
            background: UiRect::new(
                position - Vec2::splat(LABEL_MARGIN),
                position + text_size + Vec2::splat(LABEL_MARGIN),
            ),
            text,
            position,
            rounding: LABEL_MARGIN,
            background_alpha: LABEL_BACKGROUND_ALPHA,
        });
    }

    /// Menu bar reflecting the current state.
    #[must_use]
    pub fn menu_model(&self, scene: &dyn SceneModel) -> MenuModel {
        let plugins = self
            .factory
            .plugins()
            .into_iter()
            .map(|id| {
                let name = self.factory.display_name(&id);
                (id, name)
            })
            .collect();
        MenuModel::build(&MenuState {
            gizmo: (self.gizmo_operation, self.gizmo_mode),
            plugins,
            current_plugin: self.renderer.current_plugin(),
            cameras: scene.cameras(),
            active_camera: self.camera.active_camera(),
            display: &self.display,
        })
    }
}
