// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Camera state machine and GPU frame readback core for an embedded 3D
//! scene viewport.
//!
//! A host editor embeds a [`viewport::Viewport`] per panel and drives it once
//! per UI frame. The viewport navigates a free or scene-bound camera, asks a
//! pluggable [`renderer::Renderer`] to draw the scene, copies the rendered
//! color attachment back from the GPU and hands a display texture to the UI.
//!
//! # Key entry points
//!
//! - [`viewport::Viewport`] - the per-frame orchestrator
//! - [`camera::controller::CameraController`] - orbit/pan/zoom/focus and
//!   authored-camera sync
//! - [`display::FrameReadback`] - color attachment to display texture
//! - [`options::ViewportOptions`] - TOML-backed configuration
//!
//! # Architecture
//!
//! Everything runs on the UI thread. The scene graph, renderer, UI widgets
//! and host texture API are collaborators reached through the traits in
//! [`scene`], [`renderer`], [`viewport::ui`] and [`display`]. Each frame the
//! viewport decides whether the local camera or the bound scene camera owns
//! the pose, recomputes projection, renders, reads back, and then runs the
//! transform and view-cube gizmos.

pub mod camera;
pub mod display;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod viewport;
