//! Shader module loading, caching and compile diagnostics.
//!
//! Modules are built from embedded WGSL strings inside a validation error
//! scope. After each module is created its compilation messages are read back
//! and logged; a failed compile is reported, never propagated, so the frame
//! loop keeps running.

use log::{debug, error, info, warn};
use std::{collections::HashMap, fmt, sync::Arc};
use wgpu::{ShaderModuleDescriptor, ShaderSource};

use crate::gpu::with_validation_scope;

/// Severity of a compiler message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Info,
}

impl From<wgpu::CompilationMessageType> for DiagnosticSeverity {
    fn from(value: wgpu::CompilationMessageType) -> Self {
        match value {
            wgpu::CompilationMessageType::Error => Self::Error,
            wgpu::CompilationMessageType::Warning => Self::Warning,
            wgpu::CompilationMessageType::Info => Self::Info,
        }
    }
}

/// One compiler message attached to a named shader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShaderDiagnostic {
    pub shader: String,
    pub severity: DiagnosticSeverity,
    pub message: String,
    /// 1-based line and column, when the compiler reported one.
    pub location: Option<(u32, u32)>,
}

impl ShaderDiagnostic {
    fn from_compilation_message(shader: &str, message: &wgpu::CompilationMessage) -> Self {
        Self {
            shader: shader.to_string(),
            severity: message.message_type.into(),
            message: message.message.clone(),
            location: message
                .location
                .as_ref()
                .map(|loc| (loc.line_number, loc.line_position)),
        }
    }

    fn from_validation_error(shader: &str, err: &wgpu::Error) -> Self {
        Self {
            shader: shader.to_string(),
            severity: DiagnosticSeverity::Error,
            message: err.to_string(),
            location: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }

    /// Emit at the log level matching the severity.
    pub fn log(&self) {
        match self.severity {
            DiagnosticSeverity::Error => error!("{self}"),
            DiagnosticSeverity::Warning => warn!("{self}"),
            DiagnosticSeverity::Info => info!("{self}"),
        }
    }
}

impl fmt::Display for ShaderDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.severity {
            DiagnosticSeverity::Error => "COMPILATION_FAILED",
            DiagnosticSeverity::Warning => "COMPILATION_WARNING",
            DiagnosticSeverity::Info => "COMPILATION_INFO",
        };
        match self.location {
            Some((line, col)) => {
                write!(f, "shader '{}' {kind} at {line}:{col}: {}", self.shader, self.message)
            }
            None => write!(f, "shader '{}' {kind}: {}", self.shader, self.message),
        }
    }
}

/// Named cache of compiled shader modules and their diagnostics.
pub struct ShaderLibrary {
    modules: HashMap<String, Arc<wgpu::ShaderModule>>,
    diagnostics: HashMap<String, Vec<ShaderDiagnostic>>,
}

impl ShaderLibrary {
    pub fn new() -> Self {
        Self {
            modules: HashMap::new(),
            diagnostics: HashMap::new(),
        }
    }

    /// Compile a WGSL source string under `name`, replacing any earlier module
    /// of that name. Compiler messages are logged and kept for [`Self::diagnostics`].
    pub fn load_from_source(
        &mut self,
        device: &wgpu::Device,
        name: &str,
        source: &str,
    ) -> Arc<wgpu::ShaderModule> {
        debug!("Loading shader '{}' from source", name);

        let (module, scope_error) = with_validation_scope(device, || {
            device.create_shader_module(ShaderModuleDescriptor {
                label: Some(name),
                source: ShaderSource::Wgsl(source.into()),
            })
        });

        let info = pollster::block_on(module.get_compilation_info());
        let mut diagnostics: Vec<ShaderDiagnostic> = info
            .messages
            .iter()
            .map(|m| ShaderDiagnostic::from_compilation_message(name, m))
            .collect();
        if let Some(err) = scope_error
            && !diagnostics.iter().any(ShaderDiagnostic::is_error)
        {
            diagnostics.push(ShaderDiagnostic::from_validation_error(name, &err));
        }
        for diagnostic in &diagnostics {
            diagnostic.log();
        }
        self.diagnostics.insert(name.to_string(), diagnostics);

        let module = Arc::new(module);
        let replaced = self
            .modules
            .insert(name.to_string(), module.clone())
            .is_some();
        if replaced {
            info!("Replaced shader '{}'", name);
        } else {
            info!("Loaded shader '{}'", name);
        }
        module
    }

    /// Compiler messages from the most recent load of `name`.
    pub fn diagnostics(&self, name: &str) -> &[ShaderDiagnostic] {
        self.diagnostics.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True if any loaded shader reported an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .values()
            .flatten()
            .any(ShaderDiagnostic::is_error)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Default for ShaderLibrary {
    fn default() -> Self {
        Self::new()
    }
}
