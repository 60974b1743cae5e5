//! `center-course` plans the center-field work of an agricultural field: a
//! geometric planner that, given a field boundary (possibly with internal
//! obstacle islands) and an implement working width, produces an ordered
//! polyline of waypoints covering the interior with parallel rows,
//! connected by transitions along the innermost headland.
//!
//! # Pipeline
//!
//! - **[`angle_search`]**: sweeps candidate row angles and scores each by
//!   row/block count and deviation from the field's dominant axis.
//! - **[`row_generator`]**: emits horizontal rows across the rotated
//!   bounding box and intersects them against the boundary and islands.
//! - **[`block_splitter`]**: groups rows into rectangular blocks.
//! - **[`materializer`]**: cuts each row at its boundary intersections and
//!   samples waypoints.
//! - **[`row_order`]**: the four within-block traversal patterns (UP_DOWN,
//!   SPIRAL, CIRCULAR, LANDS).
//! - **[`ga`]**: the genetic algorithm that orders blocks and chooses each
//!   block's entry corner.
//! - **[`linker`]**: assembles the connecting headland segments and the
//!   ordered rows into one polyline.
//! - **[`post_pass`]**: ridge-marker tagging over the finished polyline.
//! - **[`orchestrator`]**: ties the above into [`generate_field_center`].
//!
//! Headland generation, island geometry, ridge-marker *consumption*, and
//! any CLI/file I/O are out of scope: this crate only consumes their
//! output via [`input::HeadlandInput`] and [`input::Island`].

pub mod angle_search;
pub mod block_splitter;
pub mod constants;
pub mod error;
pub mod ga;
pub mod geometry;
pub mod ids;
pub mod input;
pub mod linker;
pub mod materializer;
mod orchestrator;
pub mod post_pass;
pub mod row_generator;
pub mod row_order;
pub mod settings;

pub use error::Error;
pub use orchestrator::{generate_field_center, FieldCenterResult};
