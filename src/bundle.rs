//! Multi-module builds sharing one rule cache.
//!
//! Modules compile in parallel; the class-name cache is the only shared
//! state. The stylesheet is assembled afterwards, taking each module's
//! rules in input order, so it does not depend on thread scheduling.

use std::path::{Component, Path, PathBuf};

use log::{debug, info};
use rayon::prelude::*;

use crate::compiler::{RuleCache, StyleRule};
use crate::emit;
use crate::error::Result;
use crate::options::TransformOptions;
use crate::schema::SchemaRegistry;
use crate::transform::{TransformOutput, transform_with};

/// One input module.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleModule {
    /// Module identifier, used as the module's `file_id`.
    pub id: String,
    pub source: String,
}

impl BundleModule {
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        Ok(Self::new(path.to_string_lossy().replace('\\', "/"), source))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledModule {
    pub id: String,
    pub output: TransformOutput,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BundleOutput {
    /// In input order.
    pub modules: Vec<CompiledModule>,
    /// Stylesheet for every module together; `None` in development.
    pub stylesheet: Option<String>,
}

impl BundleOutput {
    /// Unique rules across the bundle in first-seen order.
    pub fn rules(&self) -> Vec<&StyleRule> {
        crate::order::dedup(self.modules.iter().flat_map(|m| m.output.rules.iter()))
    }
}

pub struct Bundle {
    options: TransformOptions,
    cache: RuleCache,
}

impl Bundle {
    pub fn new(options: TransformOptions) -> Self {
        let cache = RuleCache::new(options.class_name_prefix.clone());
        Self { options, cache }
    }

    pub fn cache(&self) -> &RuleCache {
        &self.cache
    }

    pub fn compile(&self, modules: &[BundleModule]) -> Result<BundleOutput> {
        self.compile_with(modules, SchemaRegistry::standard())
    }

    /// Compile every module. Any failing module fails the bundle, and
    /// modules still queued are not started.
    pub fn compile_with(
        &self,
        modules: &[BundleModule],
        registry: &SchemaRegistry,
    ) -> Result<BundleOutput> {
        info!("compiling {} module(s)", modules.len());
        let modules = modules
            .par_iter()
            .map(|module| -> Result<CompiledModule> {
                let options = self.options.clone().with_file_id(module.id.clone());
                let output = transform_with(&module.source, &options, &self.cache, registry)?;
                debug!("{}: {} rule(s)", module.id, output.rules.len());
                Ok(CompiledModule {
                    id: module.id.clone(),
                    output,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let stylesheet = (!self.options.dev).then(|| {
            emit::stylesheet(modules.iter().flat_map(|m| m.output.rules.iter()))
        });
        debug!("{} cached class name(s)", self.cache.len());
        Ok(BundleOutput {
            modules,
            stylesheet,
        })
    }

    /// Read and compile files from disk.
    pub fn compile_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Result<BundleOutput> {
        let modules = paths
            .iter()
            .map(BundleModule::from_path)
            .collect::<Result<Vec<_>>>()?;
        self.compile(&modules)
    }
}

/// Where a compiled module lands under `out_dir`. Relative layout is kept;
/// absolute paths are reduced to their file name, and `..`, `.` and root
/// components are dropped so the result never leaves `out_dir`.
pub fn output_path(out_dir: &Path, module_id: &str) -> PathBuf {
    let path = Path::new(module_id);
    if path.is_absolute() {
        return match path.file_name() {
            Some(name) => out_dir.join(name),
            None => out_dir.to_path_buf(),
        };
    }
    let mut target = out_dir.to_path_buf();
    for component in path.components() {
        if let Component::Normal(part) = component {
            target.push(part);
        }
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_shared_cache_and_input_order() {
        let modules = vec![
            BundleModule::new("a.js", "const a = stylex.create({x: {color: 'red', ':hover': {color: 'blue'}}});"),
            BundleModule::new("b.js", "const b = stylex.create({y: {color: 'red', width: 10}});"),
        ];
        let out = Bundle::new(TransformOptions::default()).compile(&modules).unwrap();
        assert_eq!(out.modules[0].id, "a.js");
        assert_eq!(out.rules().len(), 3);
        let sheet = out.stylesheet.unwrap();
        let lines: Vec<_> = sheet.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("{color:red}"));
        assert!(lines[1].ends_with("{width:10px}"));
        assert!(lines[2].ends_with(":hover{color:blue}"));
    }

    #[test]
    fn test_failing_module_fails_bundle() {
        let modules = vec![
            BundleModule::new("ok.js", "const a = stylex.create({x: {color: 'red'}});"),
            BundleModule::new("bad.js", "const b = stylex.create({y: {colr: 'red'}});"),
        ];
        let err = Bundle::new(TransformOptions::default()).compile(&modules).unwrap_err();
        assert!(matches!(err, Error::Diagnostics(_)));
    }

    #[test]
    fn test_output_path() {
        let out = Path::new("dist");
        assert_eq!(output_path(out, "src/a.js"), PathBuf::from("dist/src/a.js"));
        assert_eq!(output_path(out, "/abs/b.js"), PathBuf::from("dist/b.js"));
        assert_eq!(output_path(out, "../src/a.js"), PathBuf::from("dist/src/a.js"));
        assert_eq!(output_path(out, "./a/../../b.js"), PathBuf::from("dist/a/b.js"));
    }
}
