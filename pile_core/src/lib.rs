//! # pile_core - Axial Pile Capacity Engine
//!
//! `pile_core` computes the axial bearing capacity of a single foundation
//! pile through a layered soil profile using the Decourt-Quaresma and
//! Mayerhof empirical methods, and the Converse-Labarre efficiency of
//! pile groups sharing a cap. All inputs and outputs are
//! JSON-serializable for easy front-end and API integration.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: the engine is a pure function of its inputs; callers
//!   own any caching of prior results
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **Eager validation**: bad input is rejected before any computation
//!
//! ## Quick Start
//!
//! ```rust
//! use pile_core::capacity::{calculate, CapacityInput};
//! use pile_core::piles::{CapacityMethod, PileType};
//! use pile_core::soil::SoilLayer;
//!
//! let input = CapacityInput {
//!     method: CapacityMethod::DecourtQuaresma,
//!     diameter_m: 0.4,
//!     pile_depth_m: 10.0,
//!     cutoff_m: 0.0,
//!     fs: 2.5,
//!     pile_type: Some(PileType::PrefabricatedDrivenOrSteel),
//!     pile_material: None,
//!     dz: 1.0,
//!     layers: vec![SoilLayer::clay(10.0, "clay").with_nspt(10.0)],
//! };
//!
//! let result = calculate(&input).unwrap();
//! println!("Qall = {} kN", result.recap.qall_total_kn);
//! ```
//!
//! ## Modules
//!
//! - [`capacity`] - The depth-marching capacity engine
//! - [`stratigraphy`] - Layer segmentation and NSPT zone averaging
//! - [`group`] - Converse-Labarre pile group efficiency
//! - [`soil`] - Soil layers and the Kdp coefficient table
//! - [`piles`] - Pile classification and method coefficient tables
//! - [`geometry`] - Pile cross-section utilities
//! - [`project`] - Project container, metadata, and settings
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves and locking

pub mod capacity;
pub mod errors;
pub mod file_io;
pub mod geometry;
pub mod group;
pub mod piles;
pub mod project;
pub mod soil;
pub mod stratigraphy;

// Re-export commonly used types at crate root for convenience
pub use capacity::{calculate, CapacityInput, CapacityResult, ProfileSample, Recap};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project, FileLock};
pub use group::{calculate_group_efficiency, GroupLayout, GroupResult, GroupSummary};
pub use piles::{CapacityMethod, PileMaterial, PileType};
pub use project::{PileAnalysis, Project, ProjectMetadata, ProjectSettings};
pub use soil::{SoilBehavior, SoilLayer};
