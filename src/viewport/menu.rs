//! Menu bar contents.
//!
//! The viewport describes its menus as data; the UI draws them and returns
//! the command of whichever item was clicked.

use super::gizmo::{GizmoMode, GizmoOperation};
use super::ViewportCommand;
use crate::camera::ActiveCamera;
use crate::options::DisplayOptions;
use crate::renderer::PluginId;
use crate::scene::PrimPath;

/// One clickable menu entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    /// Text shown.
    pub label: String,
    /// Whether a check mark is drawn.
    pub checked: bool,
    /// Command issued when clicked.
    pub command: ViewportCommand,
}

impl MenuItem {
    fn new(label: impl Into<String>, checked: bool, command: ViewportCommand) -> Self {
        Self {
            label: label.into(),
            checked,
            command,
        }
    }

    /// Check-box item that issues the toggled state.
    fn toggle(
        label: &str,
        enabled: bool,
        command: impl Fn(bool) -> ViewportCommand,
    ) -> Self {
        Self::new(label, enabled, command(!enabled))
    }
}

/// A titled drop-down menu.
#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    /// Menu title in the bar.
    pub title: &'static str,
    /// Entries, top to bottom.
    pub items: Vec<MenuItem>,
}

/// The full menu bar.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MenuModel {
    /// Menus, left to right.
    pub menus: Vec<Menu>,
}

/// Snapshot of viewport state the menus reflect.
pub(crate) struct MenuState<'a> {
    pub(crate) gizmo: (GizmoOperation, GizmoMode),
    /// `(id, display name)` per renderer plugin.
    pub(crate) plugins: Vec<(PluginId, String)>,
    pub(crate) current_plugin: &'a PluginId,
    pub(crate) cameras: Vec<PrimPath>,
    pub(crate) active_camera: &'a ActiveCamera,
    pub(crate) display: &'a DisplayOptions,
}

impl MenuModel {
    pub(crate) fn build(state: &MenuState<'_>) -> Self {
        Self {
            menus: vec![
                transform_menu(state.gizmo),
                Menu {
                    title: "renderer",
                    items: state
                        .plugins
                        .iter()
                        .map(|(id, name)| {
                            MenuItem::new(
                                name.as_str(),
                                id == state.current_plugin,
                                ViewportCommand::SwitchRenderer(id.clone()),
                            )
                        })
                        .collect(),
                },
                cameras_menu(&state.cameras, state.active_camera),
                Menu {
                    title: "lights",
                    items: vec![
                        MenuItem::toggle(
                            "ambient light",
                            state.display.ambient_light,
                            ViewportCommand::SetAmbientLight,
                        ),
                        MenuItem::toggle(
                            "dome light",
                            state.display.dome_light,
                            ViewportCommand::SetDomeLight,
                        ),
                    ],
                },
                Menu {
                    title: "show",
                    items: vec![MenuItem::toggle(
                        "grid",
                        state.display.grid,
                        ViewportCommand::SetGrid,
                    )],
                },
            ],
        }
    }

    /// Look up a menu by title.
    #[must_use]
    pub fn menu(&self, title: &str) -> Option<&Menu> {
        self.menus.iter().find(|m| m.title == title)
    }
}

fn transform_menu(current: (GizmoOperation, GizmoMode)) -> Menu {
    let entries = [
        ("local translate", GizmoOperation::Translate, GizmoMode::Local),
        ("local rotation", GizmoOperation::Rotate, GizmoMode::Local),
        ("local scale", GizmoOperation::Scale, GizmoMode::Local),
        ("global translate", GizmoOperation::Translate, GizmoMode::World),
        ("global rotation", GizmoOperation::Rotate, GizmoMode::World),
        ("global scale", GizmoOperation::Scale, GizmoMode::World),
    ];
    Menu {
        title: "transform",
        items: entries
            .into_iter()
            .map(|(label, operation, mode)| {
                MenuItem::new(
                    label,
                    current == (operation, mode),
                    ViewportCommand::SetGizmo { operation, mode },
                )
            })
            .collect(),
    }
}

fn cameras_menu(cameras: &[PrimPath], active: &ActiveCamera) -> Menu {
    let mut items = vec![MenuItem::new(
        "free camera",
        *active == ActiveCamera::Free,
        ViewportCommand::UseFreeCamera,
    )];
    items.extend(cameras.iter().map(|path| {
        MenuItem::new(
            path.name(),
            active.path() == Some(path),
            ViewportCommand::UseCamera(path.clone()),
        )
    }));
    Menu {
        title: "cameras",
        items,
    }
}
