use bitflags::bitflags;

bitflags! {
    /// Grammar capabilities a query may use.
    ///
    /// A parser is configured with the set of permitted features; every
    /// description reports the features its subtree relies on through
    /// [`Description::query_features`](crate::ast::Description::query_features).
    ///
    /// Serialized (through serde) as a `|`-separated list of flag names:
    ///
    /// ```text
    /// "PROPERTY | CATEGORY | CONJUNCTION"
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct QueryFeatures: u32 {
        /// `[[Property::value]]`
        const PROPERTY = 1;
        /// `[[Category:Name]]`
        const CATEGORY = 2;
        /// `[[Concept:Name]]`
        const CONCEPT = 4;
        /// `[[Help:+]]`
        const NAMESPACE = 8;
        /// Adjacent atoms
        const CONJUNCTION = 16;
        /// `||` and `OR`
        const DISJUNCTION = 32;
    }
}

impl Default for QueryFeatures {
    fn default() -> Self {
        QueryFeatures::all()
    }
}

impl QueryFeatures {
    /// Upper-case name of a single flag, `None` for combinations.
    pub fn name(&self) -> Option<&'static str> {
        self.iter_names()
            .next()
            .filter(|_| self.bits().count_ones() == 1)
            .map(|(name, _)| name)
    }
}
