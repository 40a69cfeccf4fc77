pub mod ambiguity;
pub mod registry;
pub mod resolution;
pub mod resolver;
pub mod scope;

pub use ambiguity::{AmbiguityPolicy, ReferenceRole};
pub use registry::{DuplicateDeclaration, Registration};
pub use resolution::Resolution;
pub use resolver::{normalize_type, ResolutionOutcome};
pub use scope::{Scope, ScopeId, ScopeKind, ScopeTree};

use rayon::prelude::*;
use tracing::debug;

use crate::ast::{Ast, NodeId, NodeKind};
use crate::config::{DuplicatePolicy, Language, ResolverConfig};
use crate::error::ResolveError;

/// Progress of one translation unit through the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    Registering,
    Resolving,
    Resolved,
}

impl PassState {
    pub fn advance(self) -> Self {
        match self {
            Self::Registering => Self::Resolving,
            Self::Resolving | Self::Resolved => Self::Resolved,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registering => "registering",
            Self::Resolving => "resolving",
            Self::Resolved => "resolved",
        }
    }
}

/// Everything the pass learned about one translation unit. The annotated
/// tree itself stays in the `Ast` that was resolved.
#[derive(Debug, Clone)]
pub struct ResolvedUnit {
    root: NodeId,
    scopes: ScopeTree,
    duplicates: Vec<DuplicateDeclaration>,
    unresolved: Vec<NodeId>,
    resolved_count: usize,
    implicit_members: usize,
    state: PassState,
}

impl ResolvedUnit {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }

    /// Declarations dropped under `DuplicatePolicy::KeepFirst`.
    pub fn duplicates(&self) -> &[DuplicateDeclaration] {
        &self.duplicates
    }

    pub fn unresolved(&self) -> &[NodeId] {
        &self.unresolved
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved_count
    }

    /// Plain names rewritten into member accesses on an implicit receiver.
    pub fn implicit_members(&self) -> usize {
        self.implicit_members
    }

    pub fn state(&self) -> PassState {
        self.state
    }
}

pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    pub fn new() -> Self {
        Self::with_config(ResolverConfig::default())
    }

    pub fn with_config(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Runs registration then resolution over one translation unit,
    /// annotating `ast` in place. Running it again on the same tree reuses
    /// the implicit members and yields the same bindings.
    pub fn resolve(&self, ast: &mut Ast) -> Result<ResolvedUnit, ResolveError> {
        let root = ast.root().ok_or(ResolveError::MissingRoot)?;
        if ast.kind(root) != Some(NodeKind::TranslationUnit) {
            return Err(ResolveError::malformed(
                root,
                ast.get(root).and_then(|node| node.region()),
                "root is not a translation unit",
            ));
        }
        let unit_name = ast.name(root).unwrap_or_default().to_string();

        let mut state = PassState::Registering;
        let registration = registry::register(ast, root, &self.config)?;
        debug!(
            unit = %unit_name,
            scopes = registration.scopes.len(),
            duplicates = registration.duplicates.len(),
            "registered declarations"
        );

        state = state.advance();
        let outcome = resolver::resolve(ast, root, &registration.scopes, &self.config)?;
        state = state.advance();
        debug!(
            unit = %unit_name,
            resolved = outcome.resolved,
            unresolved = outcome.unresolved.len(),
            implicit_members = outcome.implicit_members,
            state = state.as_str(),
            "resolved references"
        );

        Ok(ResolvedUnit {
            root,
            scopes: registration.scopes,
            duplicates: registration.duplicates,
            unresolved: outcome.unresolved,
            resolved_count: outcome.resolved,
            implicit_members: outcome.implicit_members,
            state,
        })
    }

    /// Resolves independent units in parallel. A failure only affects its
    /// own unit.
    pub fn resolve_units(&self, units: &mut [Ast]) -> Vec<Result<ResolvedUnit, ResolveError>> {
        units.par_iter_mut().map(|ast| self.resolve(ast)).collect()
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ResolverBuilder {
    config: ResolverConfig,
}

impl ResolverBuilder {
    pub fn new() -> Self {
        Self {
            config: ResolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.config.language = language;
        self
    }

    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.config.duplicate_policy = policy;
        self
    }

    pub fn ambiguity_policy(mut self, policy: AmbiguityPolicy) -> Self {
        self.config.ambiguity_policy = policy;
        self
    }

    pub fn build(self) -> Resolver {
        Resolver {
            config: self.config,
        }
    }
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}
