use crate::config::FilterConfig;
use std::fmt;

/// Outcome of running a file name through the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDecision {
    Include,
    /// Name contains `~` (editor backups, temp saves).
    SkipBackup,
    /// Lowercased name contains `editor`.
    SkipEditor,
    /// None of the configured extensions occur in the name.
    SkipNoMatch,
}

impl FilterDecision {
    pub fn is_included(self) -> bool {
        self == FilterDecision::Include
    }
}

impl fmt::Display for FilterDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FilterDecision::Include => "included",
            FilterDecision::SkipBackup => "backup file",
            FilterDecision::SkipEditor => "editor file",
            FilterDecision::SkipNoMatch => "no extension match",
        };
        f.write_str(label)
    }
}

const BACKUP_MARKER: char = '~';
const EDITOR_MARKER: &str = "editor";

pub struct FileFilter {
    extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            extensions: config.extensions.clone(),
        }
    }

    /// Classify a bare file name. Stages run in a fixed order: the `~` check,
    /// then the case-insensitive `editor` check, then substring matching
    /// against the extension set. Directory names are never looked at.
    pub fn evaluate(&self, file_name: &str) -> FilterDecision {
        if file_name.contains(BACKUP_MARKER) {
            return FilterDecision::SkipBackup;
        }

        if file_name.to_lowercase().contains(EDITOR_MARKER) {
            return FilterDecision::SkipEditor;
        }

        if self.matches_extension(file_name) {
            FilterDecision::Include
        } else {
            FilterDecision::SkipNoMatch
        }
    }

    pub fn is_asset_file(&self, file_name: &str) -> bool {
        self.evaluate(file_name).is_included()
    }

    // Containment, not suffix: "foo.pngbackup" matches ".png".
    fn matches_extension(&self, file_name: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| file_name.contains(ext.as_str()))
    }

    pub fn get_extensions(&self) -> &Vec<String> {
        &self.extensions
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        let config = FilterConfig::default();
        Self::new(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extensions_are_included() {
        let filter = FileFilter::default();

        for name in [
            "wall.mat",
            "door.prefab",
            "icon.png",
            "photo.jpg",
            "photo.jpeg",
            "hero.fbx",
            "water.shader",
        ] {
            assert_eq!(filter.evaluate(name), FilterDecision::Include, "{}", name);
        }

        assert_eq!(filter.evaluate("readme.txt"), FilterDecision::SkipNoMatch);
        assert_eq!(filter.evaluate("script.cs"), FilterDecision::SkipNoMatch);
    }

    #[test]
    fn test_substring_matching() {
        let filter = FileFilter::default();

        assert!(filter.is_asset_file("sprite.png.bak"));
        assert!(filter.is_asset_file("foo.pngbackup"));
        assert!(filter.is_asset_file("icon.png.meta"));
        // Matching is case-sensitive
        assert!(!filter.is_asset_file("ICON.PNG"));
    }

    #[test]
    fn test_backup_marker_excludes() {
        let filter = FileFilter::default();

        assert_eq!(filter.evaluate("icon~.png"), FilterDecision::SkipBackup);
        assert_eq!(filter.evaluate("~tmp.fbx"), FilterDecision::SkipBackup);
        assert_eq!(filter.evaluate("notes~"), FilterDecision::SkipBackup);
    }

    #[test]
    fn test_editor_marker_excludes_case_insensitively() {
        let filter = FileFilter::default();

        assert_eq!(filter.evaluate("EditorIcon.png"), FilterDecision::SkipEditor);
        assert_eq!(filter.evaluate("leveleditor.prefab"), FilterDecision::SkipEditor);
        assert_eq!(filter.evaluate("MapEDITOR.mat"), FilterDecision::SkipEditor);
        assert_eq!(filter.evaluate("edit.png"), FilterDecision::Include);
    }

    #[test]
    fn test_stage_order() {
        let filter = FileFilter::default();

        // Backup check wins over the editor check
        assert_eq!(filter.evaluate("editor~.png"), FilterDecision::SkipBackup);
        // Editor check wins over a non-match
        assert_eq!(filter.evaluate("editor.txt"), FilterDecision::SkipEditor);
    }

    #[test]
    fn test_custom_extensions() {
        let config = FilterConfig {
            extensions: vec![".tga".to_string()],
        };
        let filter = FileFilter::new(&config);

        assert!(filter.is_asset_file("grass.tga"));
        assert!(!filter.is_asset_file("grass.png"));
        assert_eq!(filter.get_extensions(), &vec![".tga".to_string()]);
    }

    #[test]
    fn test_decision_display() {
        assert_eq!(FilterDecision::SkipBackup.to_string(), "backup file");
        assert_eq!(FilterDecision::Include.to_string(), "included");
    }
}
