//! Runtime options with TOML preset support.
//!
//! Shader toggles, camera parameters, debug visualization and animation
//! playback are consolidated here. Options serialize to/from TOML for
//! presets stored in `assets/presets/`.

mod animation;
mod camera;
mod debug;
mod shading;

use std::path::Path;

pub use animation::AnimationOptions;
pub use camera::CameraOptions;
pub use debug::DebugOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use shading::ShadingOptions;

use crate::{error::SkinviewError, uniforms::Settings};

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[shading]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Shader toggles and material scalars.
    pub shading: ShadingOptions,
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Debug visualization options.
    pub debug: DebugOptions,
    /// Animation playback options.
    pub animation: AnimationOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SkinviewError::Io`] if the file cannot be read and
    /// [`SkinviewError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, SkinviewError> {
        let content =
            std::fs::read_to_string(path).map_err(SkinviewError::Io)?;
        let options = toml::from_str(&content)
            .map_err(|e| SkinviewError::OptionsParse(e.to_string()))?;
        log::debug!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`SkinviewError::OptionsParse`] if serialization fails and
    /// [`SkinviewError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), SkinviewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SkinviewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SkinviewError::Io)?;
        }
        std::fs::write(path, content).map_err(SkinviewError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Shader flags for a mesh draw. `skinned` is whether the mesh carries
    /// joint weights.
    #[must_use]
    pub fn mesh_settings(&self, skinned: bool) -> Settings {
        Settings {
            do_skinning: skinned && self.shading.skinning,
            drawing_points: false,
            lighting: self.shading.lighting,
            show_normals: self.debug.show_normals,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::animation::PlaybackMode;

    fn presets_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/presets")
    }

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[shading]
ambient = 0.25

[animation]
mode = "controllable"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.shading.ambient, 0.25);
        assert_eq!(opts.animation.mode, PlaybackMode::Controllable);
        // Everything else should be default
        assert_eq!(opts.shading.diffuse, 1.0);
        assert_eq!(opts.shading.light_position, [200.0, 100.0, 300.0]);
        assert_eq!(opts.camera.fovy, 60.0);
        assert_eq!(opts.camera.znear, 0.1);
        assert_eq!(opts.camera.zfar, 300.0);
    }

    #[test]
    fn default_material_matches_shader_defaults() {
        let opts = Options::default();
        let material = opts.shading.material(glam::Vec4::ONE);
        assert_eq!(material, crate::uniforms::Material::default());
    }

    #[test]
    fn mesh_settings_only_skins_weighted_meshes() {
        let mut opts = Options::default();
        assert!(opts.mesh_settings(true).do_skinning);
        assert!(!opts.mesh_settings(false).do_skinning);
        opts.shading.skinning = false;
        opts.debug.show_normals = true;
        let settings = opts.mesh_settings(true);
        assert!(!settings.do_skinning);
        assert!(settings.show_normals);
        assert!(settings.lighting);
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = std::env::temp_dir()
            .join(format!("skinview-options-{}", std::process::id()));
        let path = dir.join("custom.toml");
        let mut opts = Options::default();
        opts.shading.lighting = false;
        opts.animation.speed = 2.5;
        opts.save(&path).unwrap();
        assert_eq!(Options::load(&path).unwrap(), opts);
        assert_eq!(Options::list_presets(&dir), vec!["custom".to_owned()]);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn bundled_presets_parse() {
        let dir = presets_dir();
        let names = Options::list_presets(&dir);
        assert!(names.contains(&"default".to_owned()));
        for name in names {
            let path = dir.join(format!("{name}.toml"));
            assert!(Options::load(&path).is_ok(), "preset {name} failed");
        }
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = std::env::temp_dir()
            .join(format!("skinview-bad-options-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "[shading]\nambient = \"bright\"\n").unwrap();
        assert!(matches!(
            Options::load(&path),
            Err(SkinviewError::OptionsParse(_))
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("shading"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("debug"));
        assert!(props.contains_key("animation"));

        // Skipped fields should be absent
        let shading = &props["shading"]["properties"];
        assert!(shading.get("ambient").is_some());
        assert!(shading.get("light_position").is_none());
        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("znear").is_none());
    }
}
