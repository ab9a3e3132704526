//! Flattened views over the package hierarchy.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Dataset, File, Method};

/// A method together with the package and file it was found in.
#[derive(Debug, Clone, Copy)]
pub struct MethodRef<'a> {
    pub package: &'a str,
    pub file: &'a File,
    pub method: &'a Method,
}

/// Key used to collapse files when building cross-package listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupeKey {
    /// Collapse files sharing a display name (first occurrence wins).
    #[default]
    Name,
    /// Collapse only files sharing a full path.
    Path,
}

/// A file in a cross-package listing.
#[derive(Debug, Clone, Copy)]
pub struct UniqueFile<'a> {
    pub package: &'a str,
    pub file: &'a File,
}

impl Dataset {
    /// Every method in package → file → method order.
    ///
    /// The package of a method is the file's declared `packageName` when the
    /// generator provided one, otherwise the grouping package.
    pub fn methods(&self) -> impl Iterator<Item = MethodRef<'_>> {
        self.packages.iter().flat_map(|pkg| {
            pkg.files.iter().flat_map(move |file| {
                let package = file
                    .metadata
                    .package_name
                    .as_deref()
                    .filter(|name| !name.is_empty())
                    .unwrap_or(pkg.name());
                file.methods.iter().map(move |method| MethodRef {
                    package,
                    file,
                    method,
                })
            })
        })
    }

    /// Files across all packages with duplicates removed by `key`.
    pub fn unique_files(&self, key: DedupeKey) -> Vec<UniqueFile<'_>> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut files = Vec::new();

        for pkg in &self.packages {
            for file in &pkg.files {
                let identity = match key {
                    DedupeKey::Name => file.name(),
                    DedupeKey::Path => file.display_path(),
                };
                if seen.insert(identity) {
                    files.push(UniqueFile {
                        package: pkg.name(),
                        file,
                    });
                } else {
                    log::debug!(
                        "Dropping duplicate file {} ({}) from package {}",
                        file.name(),
                        file.display_path(),
                        pkg.name()
                    );
                }
            }
        }

        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FileMeta, Package, PackageMeta};

    fn file(name: &str, path: &str, methods: usize) -> File {
        File {
            metadata: FileMeta {
                file_name: name.into(),
                file_path: Some(path.into()),
                ..Default::default()
            },
            methods: vec![Method::default(); methods],
            ..Default::default()
        }
    }

    fn dataset() -> Dataset {
        Dataset {
            packages: vec![
                Package {
                    metadata: PackageMeta { name: "a".into() },
                    files: vec![file("Util.scala", "a/Util.scala", 2)],
                    ..Default::default()
                },
                Package {
                    metadata: PackageMeta { name: "b".into() },
                    files: vec![
                        file("Util.scala", "b/Util.scala", 1),
                        file("Main.scala", "b/Main.scala", 3),
                    ],
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_methods_flatten_all_packages() {
        let data = dataset();
        let methods: Vec<_> = data.methods().collect();
        assert_eq!(methods.len(), 6);
        assert_eq!(methods.len(), data.method_count());
        assert_eq!(methods[0].package, "a");
        assert_eq!(methods[5].file.name(), "Main.scala");
    }

    #[test]
    fn test_declared_package_overrides_grouping() {
        let mut data = dataset();
        data.packages[0].files[0].metadata.package_name = Some("a.internal".into());
        let packages: Vec<_> = data.methods().map(|m| m.package).collect();
        assert_eq!(packages[0], "a.internal");
        assert_eq!(packages[2], "b");
    }

    #[test]
    fn test_unique_files_by_name_keeps_first() {
        let data = dataset();
        let files = data.unique_files(DedupeKey::Name);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].package, "a");
    }

    #[test]
    fn test_unique_files_by_path_keeps_distinct_files() {
        let data = dataset();
        assert_eq!(data.unique_files(DedupeKey::Path).len(), 3);
    }
}
