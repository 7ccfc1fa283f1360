//! Per-root engine state
//!
//! A [`Context`] owns the resolved options and the [`Registry`] for exactly
//! one project root. It is mutated through `&mut self` by a single task;
//! projects with several roots create one context each.

use std::sync::Arc;

use autocomp_fs::NormalizedPath;
use autocomp_markup::{MarkupParser, TemplateParser};
use tokio::time::Instant;

use crate::Result;
use crate::artifacts::{render_eslintrc, write_declaration, write_eslintrc};
use crate::config::{Options, ResolvedOptions, resolve_options};
use crate::imports::{ImportInfo, resolve_external_imports};
use crate::registry::Registry;
use crate::search::search_components;
use crate::session::LiveSession;
use crate::throttle::{ARTIFACT_THROTTLE, Fire, Throttle};
use crate::transform::Preprocessor;

/// Rewrites the module specifier of an injected import. Returning `None`
/// keeps the original specifier.
pub type ImportPathTransform = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

pub struct Context {
    raw_options: Options,
    options: ResolvedOptions,
    registry: Registry,
    searched: bool,
    parser: Arc<dyn TemplateParser>,
    preprocessor: Option<Arc<dyn Preprocessor>>,
    import_path_transform: Option<ImportPathTransform>,
    session: Option<Arc<dyn LiveSession>>,
    throttle: Throttle,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("root", &self.options.root)
            .field("registry", &self.registry)
            .field("searched", &self.searched)
            .field("session", &self.session.is_some())
            .finish_non_exhaustive()
    }
}

impl Context {
    /// Create a context for `root`.
    ///
    /// # Errors
    ///
    /// Fails when the options do not resolve (see [`resolve_options`]).
    pub fn new(options: Options, root: NormalizedPath) -> Result<Self> {
        let resolved = resolve_options(&options, &root)?;
        Ok(Self {
            raw_options: options,
            options: resolved,
            registry: Registry::new(),
            searched: false,
            parser: Arc::new(MarkupParser),
            preprocessor: None,
            import_path_transform: None,
            session: None,
            throttle: Throttle::new(ARTIFACT_THROTTLE),
        })
    }

    pub fn with_parser(mut self, parser: Arc<dyn TemplateParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_preprocessor(mut self, preprocessor: Arc<dyn Preprocessor>) -> Self {
        self.preprocessor = Some(preprocessor);
        self
    }

    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn set_import_path_transform(&mut self, transform: ImportPathTransform) {
        self.import_path_transform = Some(transform);
    }

    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.options.root
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub(crate) fn parser(&self) -> &dyn TemplateParser {
        self.parser.as_ref()
    }

    pub(crate) fn preprocessor(&self) -> Option<Arc<dyn Preprocessor>> {
        self.preprocessor.clone()
    }

    pub(crate) fn throttle_mut(&mut self) -> &mut Throttle {
        &mut self.throttle
    }

    /// Re-resolve the options for a new root.
    ///
    /// The next transform rescans the disk.
    pub fn set_root(&mut self, root: NormalizedPath) -> Result<()> {
        if self.options.root == root {
            return Ok(());
        }
        tracing::debug!(%root, "Root changed");
        self.options = resolve_options(&self.raw_options, &root)?;
        self.searched = false;
        self.registry.rebuild(&self.options);
        Ok(())
    }

    /// Scan the disk for components, at most once per root.
    pub fn search_glob(&mut self) -> Result<()> {
        if self.searched {
            return Ok(());
        }
        let files = search_components(&self.options)?;
        if files.is_empty() && self.options.external.is_empty() {
            tracing::warn!(root = %self.options.root, "No components found");
        }
        self.registry.add_components(files, &self.options);
        self.searched = true;
        Ok(())
    }

    /// Resolve a referenced component name.
    ///
    /// Local components win unless their path is one of `exclude_paths`
    /// (compared with and without a leading `/`); external declarations are
    /// consulted next, in order.
    pub fn find_component(&self, name: &str, exclude_paths: &[&str]) -> Option<ImportInfo> {
        if let Some(info) = self.registry.lookup(name) {
            let from = info.from.as_str();
            let trimmed = from.strip_prefix('/').unwrap_or(from);
            if !exclude_paths.iter().any(|p| *p == from || *p == trimmed) {
                return Some(info.clone());
            }
        }
        self.options
            .external
            .iter()
            .find_map(|decl| decl.resolve(name))
    }

    pub fn add_components<I>(&mut self, paths: I) -> bool
    where
        I: IntoIterator<Item = NormalizedPath>,
    {
        self.registry.add_components(paths, &self.options)
    }

    pub fn remove_components<I>(&mut self, paths: I) -> bool
    where
        I: IntoIterator<Item = NormalizedPath>,
    {
        self.registry.remove_components(paths, &self.options)
    }

    pub fn add_custom_component(&mut self, info: ImportInfo) {
        self.registry.add_custom_component(info);
    }

    pub fn update_usage_map<I>(&mut self, consumer: &NormalizedPath, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.registry.update_usage_map(consumer, names);
    }

    pub(crate) fn transform_import_path(&self, from: &str) -> String {
        self.import_path_transform
            .as_ref()
            .and_then(|transform| transform(from))
            .unwrap_or_else(|| from.to_string())
    }

    /// Attach a live session; attaching the same session again is a no-op.
    pub fn attach_session(&mut self, session: Arc<dyn LiveSession>) {
        if let Some(current) = &self.session {
            if Arc::ptr_eq(current, &session) {
                return;
            }
        }
        self.session = Some(session);
    }

    pub(crate) fn session(&self) -> Option<&Arc<dyn LiveSession>> {
        self.session.as_ref()
    }

    /// Write the declaration and lint artifacts that are enabled.
    ///
    /// Without a live session the declaration is rebuilt from scratch;
    /// during a session, entries of the existing file are kept.
    pub fn generate_artifacts(&self) -> Result<()> {
        let components = self.registry.all_components();

        if let Some(dts) = &self.options.dts {
            write_declaration(dts, &components, self.session.is_none())?;
        }

        let eslintrc = &self.options.eslintrc;
        if eslintrc.enabled {
            let external = resolve_external_imports(&self.options.external)
                .into_iter()
                .map(|import| import.alias);
            let names = components.into_keys().chain(external);
            let content = render_eslintrc(names, &eslintrc.globals_prop_value)?;
            write_eslintrc(&eslintrc.filepath, &content)?;
        }

        Ok(())
    }

    /// Request artifact regeneration through the throttle.
    ///
    /// Runs the writers right away on the leading edge; otherwise the call is
    /// parked until [`Context::flush_due_artifacts`] finds it due.
    pub fn schedule_artifacts(&mut self, now: Instant) -> Result<Fire> {
        let fire = self.throttle.trigger(now);
        if fire.is_now() {
            self.generate_artifacts()?;
        }
        Ok(fire)
    }

    /// Run a parked regeneration whose deadline has passed.
    pub fn flush_due_artifacts(&mut self, now: Instant) -> Result<bool> {
        if self.throttle.fire_due(now) {
            self.generate_artifacts()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Deadline of the parked regeneration, if any.
    pub fn artifacts_deadline(&self) -> Option<Instant> {
        self.throttle.deadline()
    }
}
