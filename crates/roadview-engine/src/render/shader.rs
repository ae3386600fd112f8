//! Shader loading.
//!
//! Every draw pass uses two WGSL files, one per stage. Files are read from
//! disk, parsed and validated with naga before wgpu ever sees them, so a
//! broken or missing shader comes back as a [`ShaderError`] carrying the
//! compiler diagnostic instead of a device-level panic.

use std::fmt;
use std::path::{Path, PathBuf};

/// Entry point the vertex file must export.
pub const VERTEX_ENTRY: &str = "vs_main";
/// Entry point the fragment file must export.
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Directory holding the bundled shaders.
pub const SHADER_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders");

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn entry_point(self) -> &'static str {
        match self {
            ShaderStage::Vertex => VERTEX_ENTRY,
            ShaderStage::Fragment => FRAGMENT_ENTRY,
        }
    }

    fn naga_stage(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// A shader that failed to load or compile.
#[derive(Debug)]
pub enum ShaderError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        stage: ShaderStage,
        diagnostic: String,
    },
    Validate {
        path: PathBuf,
        stage: ShaderStage,
        diagnostic: String,
    },
    MissingEntryPoint {
        path: PathBuf,
        stage: ShaderStage,
    },
}

impl ShaderError {
    /// Compiler output, when there is any.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            ShaderError::Parse { diagnostic, .. } | ShaderError::Validate { diagnostic, .. } => {
                Some(diagnostic)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Read { path, source } => {
                write!(f, "cannot read shader {}: {source}", path.display())
            }
            ShaderError::Parse { path, stage, diagnostic } => {
                write!(f, "{stage} shader compilation failed ({}):\n{diagnostic}", path.display())
            }
            ShaderError::Validate { path, stage, diagnostic } => {
                write!(f, "{stage} shader validation failed ({}):\n{diagnostic}", path.display())
            }
            ShaderError::MissingEntryPoint { path, stage } => write!(
                f,
                "{stage} shader {} has no @{stage} fn {}",
                path.display(),
                stage.entry_point()
            ),
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShaderError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// One validated WGSL stage.
#[derive(Debug, Clone)]
pub struct ShaderFile {
    pub path: PathBuf,
    pub stage: ShaderStage,
    pub source: String,
}

impl ShaderFile {
    /// Reads and validates a stage from disk.
    pub fn load(path: impl AsRef<Path>, stage: ShaderStage) -> Result<Self, ShaderError> {
        let path = path.as_ref().to_path_buf();
        let source = std::fs::read_to_string(&path).map_err(|source| ShaderError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_source(path, stage, source)
    }

    /// Validates in-memory WGSL; `path` is only used in diagnostics.
    pub fn from_source(
        path: impl Into<PathBuf>,
        stage: ShaderStage,
        source: impl Into<String>,
    ) -> Result<Self, ShaderError> {
        let file = Self {
            path: path.into(),
            stage,
            source: source.into(),
        };
        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> Result<(), ShaderError> {
        let module = naga::front::wgsl::parse_str(&self.source).map_err(|e| ShaderError::Parse {
            path: self.path.clone(),
            stage: self.stage,
            diagnostic: e.emit_to_string(&self.source),
        })?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator.validate(&module).map_err(|e| ShaderError::Validate {
            path: self.path.clone(),
            stage: self.stage,
            diagnostic: e.emit_to_string(&self.source),
        })?;

        let has_entry = module
            .entry_points
            .iter()
            .any(|ep| ep.name == self.stage.entry_point() && ep.stage == self.stage.naga_stage());
        if !has_entry {
            return Err(ShaderError::MissingEntryPoint {
                path: self.path.clone(),
                stage: self.stage,
            });
        }

        log::debug!("{} shader {} validated", self.stage, self.path.display());
        Ok(())
    }

    pub(crate) fn create_module(&self, device: &wgpu::Device) -> wgpu::ShaderModule {
        let label = format!("roadview {} ({})", self.stage, self.path.display());
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&label),
            source: wgpu::ShaderSource::Wgsl(self.source.as_str().into()),
        })
    }
}

/// Vertex + fragment stage for one draw pass.
#[derive(Debug, Clone)]
pub struct ShaderPair {
    pub vertex: ShaderFile,
    pub fragment: ShaderFile,
}

impl ShaderPair {
    pub fn load(
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        Ok(Self {
            vertex: ShaderFile::load(vertex_path, ShaderStage::Vertex)?,
            fragment: ShaderFile::load(fragment_path, ShaderStage::Fragment)?,
        })
    }

    /// Bundled ring-mesh shaders.
    pub fn ring() -> Result<Self, ShaderError> {
        Self::load(bundled("ring.vert.wgsl"), bundled("color.frag.wgsl"))
    }

    /// Bundled overlay-line shaders.
    pub fn overlay() -> Result<Self, ShaderError> {
        Self::load(bundled("overlay.vert.wgsl"), bundled("color.frag.wgsl"))
    }

    pub(crate) fn create_modules(&self, device: &wgpu::Device) -> (wgpu::ShaderModule, wgpu::ShaderModule) {
        (self.vertex.create_module(device), self.fragment.create_module(device))
    }
}

/// Path of a bundled shader file.
pub fn bundled(name: &str) -> PathBuf {
    Path::new(SHADER_DIR).join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_FRAGMENT: &str = r#"
        @fragment
        fn fs_main() -> @location(0) vec4<f32> {
            return vec4<f32>(1.0, 0.0, 0.0, 1.0);
        }
    "#;

    // ── bundled shaders ───────────────────────────────────────────────────

    #[test]
    fn bundled_ring_shaders_validate() {
        ShaderPair::ring().unwrap();
    }

    #[test]
    fn bundled_overlay_shaders_validate() {
        ShaderPair::overlay().unwrap();
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn missing_file_is_a_read_error() {
        let err = ShaderFile::load("/nonexistent/nope.wgsl", ShaderStage::Vertex).unwrap_err();
        assert!(matches!(err, ShaderError::Read { .. }));
        assert!(err.to_string().contains("nope.wgsl"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn syntax_error_carries_diagnostic() {
        let err = ShaderFile::from_source("bad.wgsl", ShaderStage::Fragment, "fn fs_main( {")
            .unwrap_err();
        assert!(matches!(err, ShaderError::Parse { .. }));
        assert!(!err.diagnostic().unwrap().is_empty());
    }

    #[test]
    fn type_error_fails_validation_or_parse() {
        let src = r#"
            @fragment
            fn fs_main() -> @location(0) vec4<f32> {
                return 1.0;
            }
        "#;
        let err = ShaderFile::from_source("typed.wgsl", ShaderStage::Fragment, src).unwrap_err();
        assert!(err.diagnostic().is_some());
    }

    #[test]
    fn wrong_stage_is_reported() {
        let err = ShaderFile::from_source("frag.wgsl", ShaderStage::Vertex, GOOD_FRAGMENT)
            .unwrap_err();
        assert!(matches!(
            err,
            ShaderError::MissingEntryPoint { stage: ShaderStage::Vertex, .. }
        ));
        assert!(err.to_string().contains(VERTEX_ENTRY));
    }

    #[test]
    fn good_source_validates() {
        let file = ShaderFile::from_source("ok.wgsl", ShaderStage::Fragment, GOOD_FRAGMENT).unwrap();
        assert_eq!(file.stage, ShaderStage::Fragment);
    }
}
