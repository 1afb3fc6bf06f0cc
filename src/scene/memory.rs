use glam::{DMat4, DVec3};
use rustc_hash::FxHashMap;

use super::{Prim, PrimPath, PrimType, SceneModel};

/// Last pick hit recorded through [`SceneModel::set_hit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// World-space hit point.
    pub point: DVec3,
    /// World-space surface normal.
    pub normal: DVec3,
}

/// Flat in-memory scene: a path → prim map plus selection state.
///
/// Transforms written through [`SceneModel::set_xform`] are visible in
/// subsequent [`SceneModel::prim`] lookups, like an editable transform
/// filter in front of the composed scene.
#[derive(Debug, Default)]
pub struct MemoryScene {
    prims: FxHashMap<PrimPath, Prim>,
    selection: Vec<PrimPath>,
    hit: Option<Hit>,
    active_camera: Option<PrimPath>,
    grid_populated: bool,
    xform_writes: usize,
}

impl MemoryScene {
    /// Empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a prim.
    pub fn insert(&mut self, path: impl Into<PrimPath>, prim: Prim) {
        let _ = self.prims.insert(path.into(), prim);
    }

    /// Mutable access to a stored prim, for simulating edits made elsewhere.
    pub fn prim_mut(&mut self, path: &PrimPath) -> Option<&mut Prim> {
        self.prims.get_mut(path)
    }

    /// Last recorded pick hit.
    #[must_use]
    pub fn hit(&self) -> Option<Hit> {
        self.hit
    }

    /// Camera most recently made active by a viewport.
    #[must_use]
    pub fn active_camera(&self) -> Option<&PrimPath> {
        self.active_camera.as_ref()
    }

    /// Whether the grid overlay prims are present.
    #[must_use]
    pub fn grid_populated(&self) -> bool {
        self.grid_populated
    }

    /// Number of transform writes received so far.
    #[must_use]
    pub fn xform_writes(&self) -> usize {
        self.xform_writes
    }
}

impl SceneModel for MemoryScene {
    fn prim(&self, path: &PrimPath) -> Option<Prim> {
        self.prims.get(path).cloned()
    }

    fn cameras(&self) -> Vec<PrimPath> {
        let mut cameras: Vec<PrimPath> = self
            .prims
            .iter()
            .filter(|(_, prim)| prim.prim_type == PrimType::Camera)
            .map(|(path, _)| path.clone())
            .collect();
        cameras.sort();
        cameras
    }

    fn selection(&self) -> Vec<PrimPath> {
        self.selection.clone()
    }

    fn set_selection(&mut self, paths: Vec<PrimPath>) {
        self.selection = paths;
    }

    fn set_hit(&mut self, point: DVec3, normal: DVec3) {
        self.hit = Some(Hit { point, normal });
    }

    fn set_active_camera(&mut self, path: &PrimPath) {
        self.active_camera = Some(path.clone());
    }

    fn xform(&self, path: &PrimPath) -> DMat4 {
        self.prims
            .get(path)
            .and_then(|prim| prim.xform)
            .unwrap_or(DMat4::IDENTITY)
    }

    fn set_xform(&mut self, path: &PrimPath, xform: DMat4) {
        self.xform_writes += 1;
        self.prims.entry(path.clone()).or_default().xform = Some(xform);
    }

    fn populate_grid(&mut self, enabled: bool) {
        self.grid_populated = enabled;
    }
}
