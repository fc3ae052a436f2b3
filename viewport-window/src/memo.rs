use alloc::sync::Arc;

/// A custom equality test for memo dependencies.
pub type DepsEqCallback<D> = Arc<dyn Fn(&D, &D) -> bool + Send + Sync>;

/// Re-render gate keyed on a dependency value.
///
/// The first query always renders. Later queries render only when the dependencies differ from
/// the ones seen at the last render, compared with `PartialEq` or a custom comparator.
pub struct RenderMemo<D> {
    last: Option<D>,
    deps_eq: Option<DepsEqCallback<D>>,
    renders: usize,
}

impl<D> Default for RenderMemo<D> {
    fn default() -> Self {
        Self {
            last: None,
            deps_eq: None,
            renders: 0,
        }
    }
}

impl<D> RenderMemo<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deps_eq(
        mut self,
        deps_eq: Option<impl Fn(&D, &D) -> bool + Send + Sync + 'static>,
    ) -> Self {
        self.deps_eq = deps_eq.map(|f| Arc::new(f) as _);
        self
    }

    /// Dependencies of the last render.
    pub fn last_deps(&self) -> Option<&D> {
        self.last.as_ref()
    }

    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// Forces the next query to render.
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

impl<D: PartialEq + Clone> RenderMemo<D> {
    /// Returns `true` when `deps` require a new render, and records them if so.
    pub fn should_render(&mut self, deps: &D) -> bool {
        if let Some(last) = &self.last {
            let unchanged = match &self.deps_eq {
                Some(eq) => eq(last, deps),
                None => last == deps,
            };
            if unchanged {
                vtrace!(renders = self.renders, "RenderMemo: skipped");
                return false;
            }
        }
        self.last = Some(deps.clone());
        self.renders = self.renders.saturating_add(1);
        true
    }
}

impl<D: Clone> Clone for RenderMemo<D> {
    fn clone(&self) -> Self {
        Self {
            last: self.last.clone(),
            deps_eq: self.deps_eq.clone(),
            renders: self.renders,
        }
    }
}

impl<D: core::fmt::Debug> core::fmt::Debug for RenderMemo<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RenderMemo")
            .field("last", &self.last)
            .field("renders", &self.renders)
            .finish_non_exhaustive()
    }
}
