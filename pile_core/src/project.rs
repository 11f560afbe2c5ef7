//! # Project Data Structures
//!
//! The `Project` struct is the root container for saved pile analyses.
//! Projects serialize to `.axp` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: ProjectSettings (default method, FS, increment)
//! └── analyses: HashMap<Uuid, PileAnalysis> (stored capacity inputs)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pile_core::project::Project;
//!
//! let project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::capacity::CapacityInput;
use crate::group::GroupLayout;
use crate::piles::CapacityMethod;

/// Current schema version for .axp files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// One saved analysis: a capacity input plus the group layouts attached
/// to it. Results are recomputed on demand rather than persisted; the
/// engine is pure, so recomputation is cheap and always consistent with
/// the stored input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PileAnalysis {
    /// User label (e.g., "P-1", "Abutment piles")
    pub label: String,

    /// Single-pile capacity input
    pub input: CapacityInput,

    /// Center-to-center pile spacing for the group calculation (m)
    pub spacing_m: f64,

    /// Pile group layouts sharing this pile design
    pub groups: Vec<GroupLayout>,
}

/// Root project container, serialized to `.axp` files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Project defaults for new analyses
    pub settings: ProjectSettings,

    /// All saved analyses, keyed by UUID
    pub analyses: HashMap<Uuid, PileAnalysis>,
}

impl Project {
    /// Create a new empty project.
    pub fn new(
        engineer: impl Into<String>,
        job_id: impl Into<String>,
        client: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: ProjectSettings::default(),
            analyses: HashMap::new(),
        }
    }

    /// Add an analysis to the project. Returns the UUID assigned to it.
    pub fn add_analysis(&mut self, analysis: PileAnalysis) -> Uuid {
        let id = Uuid::new_v4();
        self.analyses.insert(id, analysis);
        self.touch();
        id
    }

    /// Remove an analysis by UUID. Returns the removed analysis if it existed.
    pub fn remove_analysis(&mut self, id: &Uuid) -> Option<PileAnalysis> {
        let analysis = self.analyses.remove(id);
        if analysis.is_some() {
            self.touch();
        }
        analysis
    }

    /// Get an analysis by UUID.
    pub fn get_analysis(&self, id: &Uuid) -> Option<&PileAnalysis> {
        self.analyses.get(id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Number of stored analyses
    pub fn analysis_count(&self) -> usize {
        self.analyses.len()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Defaults applied to new analyses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Default capacity method
    pub default_method: CapacityMethod,

    /// Default safety factor
    pub default_fs: f64,

    /// Default vertical sampling increment (m)
    pub default_dz_m: f64,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        ProjectSettings {
            default_method: CapacityMethod::DecourtQuaresma,
            default_fs: 2.5,
            default_dz_m: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piles::PileType;
    use crate::soil::SoilLayer;

    fn test_analysis() -> PileAnalysis {
        PileAnalysis {
            label: "P-1".to_string(),
            input: CapacityInput {
                method: CapacityMethod::DecourtQuaresma,
                diameter_m: 0.4,
                pile_depth_m: 10.0,
                cutoff_m: 0.0,
                fs: 2.5,
                pile_type: Some(PileType::PrefabricatedDrivenOrSteel),
                pile_material: None,
                dz: 1.0,
                layers: vec![SoilLayer::clay(10.0, "clay").with_nspt(10.0)],
            },
            spacing_m: 1.0,
            groups: Vec::new(),
        }
    }

    #[test]
    fn test_project_creation() {
        let project = Project::new("John Doe", "25-001", "Acme Corp");
        assert_eq!(project.meta.engineer, "John Doe");
        assert_eq!(project.meta.job_id, "25-001");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.analysis_count(), 0);
    }

    #[test]
    fn test_project_serialization() {
        let mut project = Project::new("Jane Engineer", "25-042", "Test Client");
        project.add_analysis(test_analysis());

        let json = serde_json::to_string_pretty(&project).unwrap();
        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("Decourt-Quaresma"));

        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.engineer, "Jane Engineer");
        assert_eq!(roundtrip.analysis_count(), 1);
    }

    #[test]
    fn test_add_remove_analysis() {
        let mut project = Project::new("Engineer", "25-001", "Client");
        let id = project.add_analysis(test_analysis());
        assert_eq!(project.analysis_count(), 1);
        assert!(project.get_analysis(&id).is_some());

        let removed = project.remove_analysis(&id);
        assert!(removed.is_some());
        assert_eq!(project.analysis_count(), 0);
    }

    #[test]
    fn test_default_settings() {
        let settings = ProjectSettings::default();
        assert_eq!(settings.default_method, CapacityMethod::DecourtQuaresma);
        assert_eq!(settings.default_fs, 2.5);
        assert_eq!(settings.default_dz_m, 1.0);
    }
}
