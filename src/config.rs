//! Catalogue configuration
//!
//! Provides presets for:
//! - Resolution cache bound
//! - Duplicate handling in multi-assembly scans

/// Tuning knobs for a [`Catalogue`](crate::Catalogue)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueOptions {
    /// Upper bound on memoized resolutions. `None` never stops caching.
    /// Once reached, new keys are resolved on every call instead of being
    /// cached; keys already cached keep their outcome.
    pub max_cached_resolutions: Option<usize>,

    /// Collapse repeated assemblies within one `scan_all` call instead of
    /// failing with a duplicate-scan error.
    pub deduplicate_scan_inputs: bool,
}

impl Default for CatalogueOptions {
    fn default() -> Self {
        Self {
            max_cached_resolutions: None,
            deduplicate_scan_inputs: true,
        }
    }
}

impl CatalogueOptions {
    /// Cache at most `max` resolutions (long-lived, high-cardinality hosts)
    pub fn bounded(max: usize) -> Self {
        Self {
            max_cached_resolutions: Some(max),
            ..Self::default()
        }
    }

    /// Treat every repeated assembly as a duplicate scan, even within one call
    pub fn strict() -> Self {
        Self {
            deduplicate_scan_inputs: false,
            ..Self::default()
        }
    }

    pub fn with_max_cached_resolutions(mut self, max: Option<usize>) -> Self {
        self.max_cached_resolutions = max;
        self
    }

    pub fn with_deduplicate_scan_inputs(mut self, deduplicate: bool) -> Self {
        self.deduplicate_scan_inputs = deduplicate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded_and_deduplicating() {
        let options = CatalogueOptions::default();
        assert_eq!(options.max_cached_resolutions, None);
        assert!(options.deduplicate_scan_inputs);
    }

    #[test]
    fn presets() {
        assert_eq!(CatalogueOptions::bounded(64).max_cached_resolutions, Some(64));
        assert!(CatalogueOptions::bounded(64).deduplicate_scan_inputs);
        assert!(!CatalogueOptions::strict().deduplicate_scan_inputs);
        assert_eq!(CatalogueOptions::strict().max_cached_resolutions, None);
    }

    #[test]
    fn builders_override_fields() {
        let options = CatalogueOptions::default()
            .with_max_cached_resolutions(Some(2))
            .with_deduplicate_scan_inputs(false);
        assert_eq!(options, CatalogueOptions::bounded(2).with_deduplicate_scan_inputs(false));
    }
}
