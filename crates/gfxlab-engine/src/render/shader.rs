//! WGSL shader sources.
//!
//! A [`ShaderSource`] is loaded (from disk or embedded at compile time) and
//! checked before any GPU work happens, so a broken or missing shader file
//! fails at startup with a readable error instead of a validation panic
//! mid-frame.

use std::fmt;
use std::path::{Path, PathBuf};

use wgpu::naga;
use wgpu::naga::valid::{Capabilities, ValidationFlags, Validator};

/// Error returned while loading or checking a shader source.
#[derive(Debug)]
pub enum ShaderError {
    Io { path: PathBuf, source: std::io::Error },
    Empty { label: String },
    /// WGSL syntax error, rendered against the source.
    Parse { label: String, message: String },
    /// Parsed, but rejected by the validator (types, bindings, uniformity).
    Invalid { label: String, message: String },
    MissingEntryPoint { label: String, entry: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Io { path, source } => {
                write!(f, "failed to read shader {}: {source}", path.display())
            }
            ShaderError::Empty { label } => write!(f, "shader {label} is empty"),
            ShaderError::Parse { label, message } => {
                write!(f, "shader {label} does not parse:\n{message}")
            }
            ShaderError::Invalid { label, message } => {
                write!(f, "shader {label} is invalid:\n{message}")
            }
            ShaderError::MissingEntryPoint { label, entry } => {
                write!(f, "shader {label} has no entry point `{entry}`")
            }
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShaderError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// WGSL source text plus a label used for GPU debug names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    label: String,
    code: String,
}

impl ShaderSource {
    /// Wraps source text compiled into the binary (`include_str!`).
    pub fn embedded(label: impl Into<String>, code: &str) -> Self {
        Self { label: label.into(), code: code.to_string() }
    }

    /// Reads a WGSL file; the file name becomes the label.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let code = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let src = Self { label, code };
        if src.code.trim().is_empty() {
            return Err(ShaderError::Empty { label: src.label });
        }
        log::debug!("loaded shader {} ({} bytes)", src.label, src.code.len());
        Ok(src)
    }

    /// Parses and validates the WGSL, then fails unless every name in
    /// `entries` is a shader entry point.
    pub fn require_entry_points(self, entries: &[&str]) -> Result<Self, ShaderError> {
        let module = self.validate()?;
        if let Some(missing) = entries
            .iter()
            .find(|e| !module.entry_points.iter().any(|ep| ep.name == **e))
        {
            return Err(ShaderError::MissingEntryPoint {
                label: self.label,
                entry: (*missing).to_string(),
            });
        }
        Ok(self)
    }

    /// Runs the WGSL front end and validator that `create_module` would,
    /// returning the parsed module.
    pub fn validate(&self) -> Result<naga::Module, ShaderError> {
        let module = naga::front::wgsl::parse_str(&self.code).map_err(|e| ShaderError::Parse {
            label: self.label.clone(),
            message: e.emit_to_string(&self.code),
        })?;
        Validator::new(ValidationFlags::all(), Capabilities::default())
            .validate(&module)
            .map_err(|e| ShaderError::Invalid {
                label: self.label.clone(),
                message: e.emit_to_string(&self.code),
            })?;
        Ok(module)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Compiles the source into a shader module.
    pub fn create_module(&self, device: &wgpu::Device) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&self.label),
            source: wgpu::ShaderSource::Wgsl(self.code.as_str().into()),
        })
    }
}
