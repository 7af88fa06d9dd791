use crate::cli::Framework;
use std::path::{Path, PathBuf};

pub const XAMARIN_FOLDERS: &[&str] = &["arm64-v8a", "armeabi-v7a"];
pub const FLUTTER_FOLDERS: &[&str] = &["arm64-v8a", "armeabi-v7a", "x86_64"];
pub const FULL_FOLDERS: &[&str] = &["arm64-v8a", "armeabi-v7a", "x86_64", "x86"];

pub const SO_MARKER: &str = "so:";
pub const DLL_MARKER: &str = "dll:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameRule {
    Fixed(&'static str),
    /// `<prefix><arch><suffix>`, e.g. `libQt6Core_x86.so`.
    PerFolder {
        prefix: &'static str,
        suffix: &'static str,
    },
    /// Expanded once inside the first folder; every match is then expected
    /// under all folders.
    Glob(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Folders {
    PerArch(&'static [&'static str]),
    /// No architecture folder on disk; the label names the ledger file.
    Flat(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactSpec {
    pub subdir: &'static str,
    pub filename: FilenameRule,
    pub folders: Folders,
    /// Start-of-digest marker in the hashing tool output.
    pub marker: &'static str,
}

const FLUTTER: &[ArtifactSpec] = &[ArtifactSpec {
    subdir: "lib",
    filename: FilenameRule::Fixed("libflutter.so"),
    folders: Folders::PerArch(FLUTTER_FOLDERS),
    marker: SO_MARKER,
}];

const REACT_NATIVE: &[ArtifactSpec] = &[ArtifactSpec {
    subdir: "lib",
    filename: FilenameRule::Glob("libreact*.so"),
    folders: Folders::PerArch(FULL_FOLDERS),
    marker: SO_MARKER,
}];

const XAMARIN: &[ArtifactSpec] = &[
    ArtifactSpec {
        subdir: "lib",
        filename: FilenameRule::Fixed("libxa-internal-api.so"),
        folders: Folders::PerArch(XAMARIN_FOLDERS),
        marker: SO_MARKER,
    },
    ArtifactSpec {
        subdir: "assemblies",
        filename: FilenameRule::Fixed("Java.Interop.dll"),
        folders: Folders::Flat("assemblies"),
        marker: DLL_MARKER,
    },
];

const QT: &[ArtifactSpec] = &[ArtifactSpec {
    subdir: "lib",
    filename: FilenameRule::PerFolder {
        prefix: "libQt6Core_",
        suffix: ".so",
    },
    folders: Folders::PerArch(FULL_FOLDERS),
    marker: SO_MARKER,
}];

impl Framework {
    pub fn artifacts(self) -> &'static [ArtifactSpec] {
        match self {
            Framework::Flutter => FLUTTER,
            Framework::ReactNative => REACT_NATIVE,
            Framework::Xamarin => XAMARIN,
            Framework::Qt => QT,
        }
    }

    /// Directory (under the ledger root) holding this framework's ledgers.
    pub fn ledger_dir(self) -> &'static str {
        match self {
            Framework::Flutter => "flutter",
            Framework::ReactNative => "react_native",
            Framework::Xamarin => "xamarin",
            Framework::Qt => "qt",
        }
    }
}

impl FilenameRule {
    /// Concrete filename for `arch`; `None` for glob rules.
    pub fn resolve(&self, arch: &str) -> Option<String> {
        match self {
            FilenameRule::Fixed(name) => Some((*name).to_string()),
            FilenameRule::PerFolder { prefix, suffix } => Some(format!("{prefix}{arch}{suffix}")),
            FilenameRule::Glob(_) => None,
        }
    }
}

impl ArtifactSpec {
    /// Keyed ledgers carry the filename as part of the row key.
    pub fn is_keyed(&self) -> bool {
        matches!(self.filename, FilenameRule::Glob(_))
    }

    pub fn folder_names(&self) -> &'static [&'static str] {
        match self.folders {
            Folders::PerArch(folders) => folders,
            Folders::Flat(_) => &[],
        }
    }

    /// Directory the artifact lives in for `arch` (ignored for flat specs).
    pub fn folder_path(&self, root: &Path, arch: &str) -> PathBuf {
        match self.folders {
            Folders::PerArch(_) => root.join(self.subdir).join(arch),
            Folders::Flat(_) => root.join(self.subdir),
        }
    }
}

pub fn ledger_path(ledger_root: &Path, framework: Framework, architecture: &str) -> PathBuf {
    ledger_root
        .join(framework.ledger_dir())
        .join(format!("{architecture}.csv"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qt_filename_splices_architecture() {
        let spec = &Framework::Qt.artifacts()[0];
        assert_eq!(
            spec.filename.resolve("armeabi-v7a").as_deref(),
            Some("libQt6Core_armeabi-v7a.so")
        );
    }

    #[test]
    fn only_react_native_is_keyed() {
        for fw in [Framework::Flutter, Framework::Xamarin, Framework::Qt] {
            assert!(fw.artifacts().iter().all(|a| !a.is_keyed()));
        }
        assert!(Framework::ReactNative.artifacts()[0].is_keyed());
    }

    #[test]
    fn xamarin_assembly_uses_single_ledger() {
        let root = Path::new("/ledgers");
        let spec = &Framework::Xamarin.artifacts()[1];
        let Folders::Flat(label) = spec.folders else {
            panic!("assembly spec should be flat");
        };
        assert_eq!(
            ledger_path(root, Framework::Xamarin, label),
            PathBuf::from("/ledgers/xamarin/assemblies.csv")
        );
        assert_eq!(spec.marker, DLL_MARKER);
    }

    #[test]
    fn folder_sets_match_framework_conventions() {
        assert_eq!(Framework::Xamarin.artifacts()[0].folder_names().len(), 2);
        assert_eq!(Framework::Flutter.artifacts()[0].folder_names().len(), 3);
        assert_eq!(Framework::Qt.artifacts()[0].folder_names().len(), 4);
        assert_eq!(Framework::ReactNative.artifacts()[0].folder_names(), FULL_FOLDERS);
    }
}
