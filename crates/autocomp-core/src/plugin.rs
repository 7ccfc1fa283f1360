//! Host build pipeline contract.
//!
//! A host drives the engine through these hooks:
//!
//! ```text
//! on_root_resolved(root)          once the project root is known
//! transform_include(id)?          per module
//!   transform(code, id)           per included module
//! on_watch_mode_enabled()         globs to watch in watch builds
//! on_dev_session_attached(s)      dev server with a live-update channel
//! ```

use std::sync::Arc;

use autocomp_fs::NormalizedPath;
use tokio::time::Instant;

use crate::Result;
use crate::config::Options;
use crate::context::Context;
use crate::session::LiveSession;
use crate::transform::TransformResult;

#[derive(Debug)]
pub struct Plugin {
    context: Context,
}

impl Plugin {
    pub fn new(context: Context) -> Self {
        Self { context }
    }

    /// A plugin for `root` with the given options.
    pub fn from_options(options: Options, root: NormalizedPath) -> Result<Self> {
        Ok(Self::new(Context::new(options, root)?))
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    pub fn transform_include(&self, id: &str) -> bool {
        self.context.transform_include(id)
    }

    /// Transform one module and schedule artifact regeneration.
    pub async fn transform(&mut self, code: &str, id: &str) -> Result<Option<TransformResult>> {
        if code.is_empty() {
            return Ok(None);
        }
        let result = self.context.transform(code, id).await?;
        self.context.schedule_artifacts(Instant::now())?;
        Ok(result)
    }

    /// Switch to `root`, scanning and writing artifacts eagerly when any
    /// artifact is enabled.
    pub fn on_root_resolved(&mut self, root: NormalizedPath) -> Result<()> {
        self.context.set_root(root)?;
        let options = self.context.options();
        if options.dts.is_some() || options.eslintrc.enabled {
            self.context.search_glob()?;
            self.context.generate_artifacts()?;
        }
        Ok(())
    }

    /// Glob patterns a watch build should observe.
    pub fn on_watch_mode_enabled(&self) -> Vec<String> {
        self.context.options().globs.clone()
    }

    pub fn on_dev_session_attached(&mut self, session: Arc<dyn LiveSession>) {
        self.context.attach_session(session);
    }

    /// Run any artifact regeneration the throttle parked.
    pub fn flush_due_artifacts(&mut self) -> Result<bool> {
        self.context.flush_due_artifacts(Instant::now())
    }
}
