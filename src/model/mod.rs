//! In-memory representation of a decoded metrics report.
//!
//! The hierarchy is project → packages → files → members/methods. Everything
//! here is built once by the loader and only read afterwards; presentation
//! state lives in the modules that own it.

pub mod flags;
pub mod records;
pub mod rollup;
mod walk;

use serde::{Deserialize, Serialize};

use flags::null_as_default;
pub use flags::{parse_bool, parse_count};
pub use records::{
    Access, File, FileMeta, Member, MemberMeta, Method, MethodMeta, Package, PackageMeta,
    ProjectMeta,
};
pub use rollup::{
    BranchDensityStats, CoreStats, InlineImplicitStats, ParameterStats, PatternMatchingStats,
    Rollup,
};
pub use walk::{DedupeKey, MethodRef, UniqueFile};

/// Root of a metrics report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: ProjectMeta,
    #[serde(deserialize_with = "null_as_default")]
    pub rollup: Rollup,
    #[serde(rename = "packageStats", deserialize_with = "null_as_default")]
    pub packages: Vec<Package>,
}

impl Dataset {
    pub fn find_package(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.name() == name)
    }

    /// Locate a file by package name and file name.
    pub fn find_file(&self, package: &str, file_name: &str) -> Option<&File> {
        self.find_package(package)
            .and_then(|pkg| pkg.find_file(file_name))
    }

    pub fn method_count(&self) -> usize {
        self.packages
            .iter()
            .flat_map(|p| &p.files)
            .map(|f| f.methods.len())
            .sum()
    }

    pub fn file_count(&self) -> usize {
        self.packages.iter().map(|p| p.files.len()).sum()
    }
}
