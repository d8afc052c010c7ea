//! Shader module loading and caching.

use log::{debug, info};
use std::{collections::HashMap, sync::Arc};
use thiserror::Error;
use wgpu::{ShaderModuleDescriptor, ShaderSource};

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("shader '{name}' has empty source")]
    EmptySource { name: String },

    #[error("shader '{name}' has no entry point '{entry_point}'")]
    MissingEntryPoint { name: String, entry_point: String },

    #[error("shader '{name}' not found in library")]
    NotLoaded { name: String },
}

/// Named registry of compiled shader modules.
///
/// Each sky stage is registered once at startup and then looked up by name
/// when pipelines are built.
pub struct ShaderLibrary {
    modules: HashMap<String, Arc<wgpu::ShaderModule>>,
}

impl ShaderLibrary {
    pub fn new() -> Self {
        Self {
            modules: HashMap::new(),
        }
    }

    /// Compile a WGSL source string and cache it under `name`.
    ///
    /// Loading the same name twice replaces the cached module.
    pub fn load_from_source(
        &mut self,
        device: &wgpu::Device,
        name: &str,
        source: &str,
    ) -> Result<Arc<wgpu::ShaderModule>, ShaderError> {
        if source.trim().is_empty() {
            return Err(ShaderError::EmptySource {
                name: name.to_string(),
            });
        }

        debug!("Compiling shader '{}' ({} bytes)", name, source.len());
        let module = Arc::new(device.create_shader_module(ShaderModuleDescriptor {
            label: Some(name),
            source: ShaderSource::Wgsl(source.into()),
        }));

        if self
            .modules
            .insert(name.to_string(), module.clone())
            .is_some()
        {
            info!("Replaced shader '{}'", name);
        } else {
            info!("Loaded shader '{}'", name);
        }
        Ok(module)
    }

    /// Like [`load_from_source`](Self::load_from_source), but first checks
    /// that the source declares `entry_point`.
    pub fn load_stage(
        &mut self,
        device: &wgpu::Device,
        name: &str,
        source: &str,
        entry_point: &str,
    ) -> Result<Arc<wgpu::ShaderModule>, ShaderError> {
        check_entry_point(name, source, entry_point)?;
        self.load_from_source(device, name, source)
    }

    pub fn get(&self, name: &str) -> Option<Arc<wgpu::ShaderModule>> {
        self.modules.get(name).cloned()
    }

    /// Like [`get`](Self::get), but a missing module is an error.
    pub fn require(&self, name: &str) -> Result<Arc<wgpu::ShaderModule>, ShaderError> {
        self.get(name).ok_or_else(|| ShaderError::NotLoaded {
            name: name.to_string(),
        })
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

/// Cheap textual check that `source` defines `fn <entry_point>(`.
pub(crate) fn check_entry_point(
    name: &str,
    source: &str,
    entry_point: &str,
) -> Result<(), ShaderError> {
    let needle = format!("fn {entry_point}(");
    if source.contains(&needle) {
        Ok(())
    } else {
        Err(ShaderError::MissingEntryPoint {
            name: name.to_string(),
            entry_point: entry_point.to_string(),
        })
    }
}
