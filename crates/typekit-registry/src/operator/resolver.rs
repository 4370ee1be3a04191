//! OperatorResolver - registration and cached lookup of conversion operators.
//!
//! # Locking
//!
//! Registered operators live behind `state`; lookup results live behind
//! `cache`. Both locks are always taken in that order: a typed lookup that
//! misses the cache inserts its result while still holding the state read
//! lock, and registration clears the cache while holding the state write
//! lock, so a stale result can never be published after a registration.
//! Metrics are reported after both locks are released.
//!
//! Typed results ([`OperatorResolver::get`]) are cached per
//! `(source, target, kind)`, including misses. Concurrent misses on the same
//! key compute equivalent results; the last insert wins.
//! [`OperatorResolver::lookup`] reads that cache but never fills it: it has
//! no `U`/`T` to build the typed function a cache entry carries.
//!
//! # Upcast pairs
//!
//! A pair registered with [`OperatorResolver::register_upcast`] has a single
//! function used both by direct lookups and by chains through the pair. An
//! implicit registration on that pair replaces the function and keeps the
//! pair an upcast; a later upcast registration replaces an earlier implicit
//! operator. An explicit operator on an upcast pair is shadowed by the
//! upcast, since explicit lookups prefer implicit operators.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::Instant;

use rustc_hash::FxHashMap;
use typekit_core::{RuntimeType, TraitError, TraitResult};

use super::hierarchy::Hierarchy;
use super::{
    Conversion, ConvertFn, ErasedFn, Operator, OperatorKind, Registered, numeric, typed_operator,
};
use crate::locks::{recover_read, recover_write};
use crate::metrics::{MetricsCollector, NoopMetrics};
use crate::options::ResolverOptions;

static GLOBAL: OnceLock<OperatorResolver> = OnceLock::new();

type CacheKey = (TypeId, TypeId, OperatorKind);

/// Direct operators registered for one `(source, target)` pair.
#[derive(Default, Clone)]
struct DirectOps {
    implicit: Option<Registered>,
    explicit: Option<Registered>,
}

impl DirectOps {
    fn set(&mut self, registered: Registered) {
        if registered.conversion.is_implicit {
            self.implicit = Some(registered);
        } else {
            self.explicit = Some(registered);
        }
    }

    fn find(&self, kind: OperatorKind) -> Option<&Registered> {
        match kind {
            OperatorKind::Implicit => self.implicit.as_ref(),
            OperatorKind::Explicit => self.implicit.as_ref().or(self.explicit.as_ref()),
        }
    }
}

#[derive(Default)]
struct ResolverState {
    operators: FxHashMap<(TypeId, TypeId), DirectOps>,
    hierarchy: Hierarchy,
}

/// Outcome of an uncached search.
enum Found {
    Direct(Registered),
    Chain(Vec<ErasedFn>),
}

impl ResolverState {
    /// Store a user operator. An implicit one on an upcast pair becomes the
    /// pair's upcast function. Returns the conversion actually stored.
    fn insert_direct(&mut self, key: (TypeId, TypeId), registered: Registered) -> Conversion {
        let on_upcast = self.hierarchy.contains(key.0, key.1);
        let registered = if registered.conversion.is_implicit && on_upcast {
            let upcast = Registered {
                conversion: Conversion::upcast(1),
                ..registered
            };
            self.hierarchy.insert(key.0, key.1, upcast.clone());
            upcast
        } else {
            registered
        };

        let conversion = registered.conversion;
        self.operators.entry(key).or_default().set(registered);
        conversion
    }

    /// Store an upcast edge and make it the pair's implicit operator.
    fn insert_upcast(&mut self, key: (TypeId, TypeId), registered: Registered) {
        self.hierarchy.insert(key.0, key.1, registered.clone());
        self.operators.entry(key).or_default().set(registered);
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    fn find(&self, source: TypeId, target: TypeId, kind: OperatorKind) -> Option<Found> {
        if let Some(direct) = self.operators.get(&(source, target)).and_then(|ops| ops.find(kind)) {
            return Some(Found::Direct(direct.clone()));
        }
        // Upcast chains are implicit, so any lookup kind accepts them.
        self.hierarchy.path(source, target).map(Found::Chain)
    }
}

impl Found {
    fn conversion(&self) -> Conversion {
        match self {
            Found::Direct(registered) => registered.conversion,
            Found::Chain(steps) => Conversion::upcast(steps.len() as u32),
        }
    }
}

/// A cached lookup result.
#[derive(Clone)]
struct Resolved {
    conversion: Conversion,
    /// A `ConvertFn<U, T>` behind `dyn Any`.
    typed: Arc<dyn Any + Send + Sync>,
}

/// Registry of conversion operators with a lookup cache.
pub struct OperatorResolver {
    state: RwLock<ResolverState>,
    cache: RwLock<FxHashMap<CacheKey, Option<Resolved>>>,
    options: ResolverOptions,
    metrics: Arc<dyn MetricsCollector>,
}

impl Default for OperatorResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl OperatorResolver {
    /// Create a resolver with the default options.
    pub fn new() -> Self {
        Self::with_options(ResolverOptions::default())
    }

    pub fn with_options(options: ResolverOptions) -> Self {
        let mut state = ResolverState::default();
        if options.numeric_conversions {
            numeric::for_each(options.implicit_narrowing, |source, target, registered| {
                state.operators.entry((source, target)).or_default().set(registered);
            });
        }

        Self {
            state: RwLock::new(state),
            cache: RwLock::new(FxHashMap::default()),
            options,
            metrics: Arc::new(NoopMetrics),
        }
    }

    /// Report cache-miss lookup times to `metrics`.
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsCollector>) -> Self {
        self.metrics = metrics;
        self
    }

    /// The process-wide resolver, created with defaults on first use.
    pub fn global() -> &'static OperatorResolver {
        GLOBAL.get_or_init(OperatorResolver::new)
    }

    /// Install the process-wide resolver.
    ///
    /// Fails, handing `resolver` back, if the global resolver already exists.
    pub fn set_global(resolver: OperatorResolver) -> Result<(), OperatorResolver> {
        GLOBAL.set(resolver)
    }

    pub fn options(&self) -> ResolverOptions {
        self.options
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a conversion usable without a cast.
    ///
    /// On a registered upcast pair this replaces the upcast's function.
    pub fn register_implicit<U: 'static, T: 'static>(
        &self,
        func: impl Fn(U) -> T + Send + Sync + 'static,
    ) {
        self.insert_direct::<U, T>(Registered::new(Conversion::user_implicit(), func));
    }

    /// Register a conversion that needs an explicit lookup.
    pub fn register_explicit<U: 'static, T: 'static>(
        &self,
        func: impl Fn(U) -> T + Send + Sync + 'static,
    ) {
        self.insert_direct::<U, T>(Registered::new(Conversion::user_explicit(), func));
    }

    /// Register `Derived` as assignable to `Base`, converting with `func`.
    ///
    /// Replaces an implicit operator registered for the same pair.
    pub fn register_upcast<Derived: 'static, Base: 'static>(
        &self,
        func: impl Fn(Derived) -> Base + Send + Sync + 'static,
    ) {
        let registered = Registered::new(Conversion::upcast(1), func);
        let key = (TypeId::of::<Derived>(), TypeId::of::<Base>());

        let mut state = recover_write(&self.state, "OperatorResolver::register_upcast");
        state.insert_upcast(key, registered);
        self.invalidate();
        drop(state);

        log::debug!(
            "[OperatorResolver] registered upcast {} -> {}",
            std::any::type_name::<Derived>(),
            std::any::type_name::<Base>()
        );
    }

    fn insert_direct<U: 'static, T: 'static>(&self, registered: Registered) {
        let mut state = recover_write(&self.state, "OperatorResolver::register");
        let conversion = state.insert_direct((TypeId::of::<U>(), TypeId::of::<T>()), registered);
        self.invalidate();
        drop(state);

        log::debug!(
            "[OperatorResolver] registered {:?} {} -> {}",
            conversion.kind,
            std::any::type_name::<U>(),
            std::any::type_name::<T>()
        );
    }

    /// Must be called with the state write lock held.
    fn invalidate(&self) {
        recover_write(&self.cache, "OperatorResolver::invalidate").clear();
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// The operator converting `U` into `T`, if one is available for `kind`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn get<U: 'static, T: 'static>(&self, kind: OperatorKind) -> Option<Operator<U, T>> {
        if TypeId::of::<U>() == TypeId::of::<T>() {
            return Some(identity());
        }

        let key = (TypeId::of::<U>(), TypeId::of::<T>(), kind);
        let cached = recover_read(&self.cache, "OperatorResolver::get").get(&key).cloned();
        if let Some(resolved) = cached {
            return resolved.and_then(|r| typed_operator(r.conversion, &r.typed));
        }

        let state = recover_read(&self.state, "OperatorResolver::get");
        let start = Instant::now();
        let resolved = state.find(key.0, key.1, kind).map(|found| match found {
            Found::Direct(registered) => Resolved {
                conversion: registered.conversion,
                typed: registered.typed,
            },
            chain @ Found::Chain(_) => Resolved {
                conversion: chain.conversion(),
                typed: Arc::new(compose::<U, T>(chain)),
            },
        });

        let elapsed = start.elapsed();
        let found = resolved.is_some();

        let operator = resolved.as_ref().and_then(|r| typed_operator(r.conversion, &r.typed));
        recover_write(&self.cache, "OperatorResolver::get").insert(key, resolved);
        drop(state);

        let source = RuntimeType::of::<U>();
        let target = RuntimeType::of::<T>();
        self.metrics.report_lookup_time(&source, &target, elapsed);
        log::trace!(
            "[OperatorResolver] cache miss {} -> {} ({:?}): {}",
            source,
            target,
            kind,
            if found { "found" } else { "none" }
        );

        operator
    }

    /// Classify the conversion from `source` to `target` without typing it.
    ///
    /// Answers from the cache when a typed lookup already filled it; a miss
    /// is computed without being cached.
    pub fn lookup(
        &self,
        source: &RuntimeType,
        target: &RuntimeType,
        kind: OperatorKind,
    ) -> Option<Conversion> {
        if source == target {
            return Some(Conversion::identity());
        }

        let key = (source.id(), target.id(), kind);
        let cached = recover_read(&self.cache, "OperatorResolver::lookup").get(&key).cloned();
        if let Some(resolved) = cached {
            return resolved.map(|r| r.conversion);
        }

        let state = recover_read(&self.state, "OperatorResolver::lookup");
        let start = Instant::now();
        let conversion = state.find(key.0, key.1, kind).map(|found| found.conversion());
        let elapsed = start.elapsed();
        drop(state);

        self.metrics.report_lookup_time(source, target, elapsed);
        log::trace!(
            "[OperatorResolver] cache miss {} -> {} ({:?}), uncached lookup",
            source,
            target,
            kind
        );

        conversion
    }

    /// Check whether `U` is `T` or reaches it through registered upcasts.
    pub fn is_assignable<U: 'static, T: 'static>(&self) -> bool {
        self.is_assignable_types(&RuntimeType::of::<U>(), &RuntimeType::of::<T>())
    }

    pub fn is_assignable_types(&self, source: &RuntimeType, target: &RuntimeType) -> bool {
        recover_read(&self.state, "OperatorResolver::is_assignable")
            .hierarchy
            .is_assignable(source.id(), target.id())
    }

    /// Convert with any available operator.
    pub fn try_convert<U: 'static, T: 'static>(&self, value: U) -> Option<T> {
        self.get::<U, T>(OperatorKind::Explicit).map(|op| op.invoke(value))
    }

    /// Convert with any available operator, failing with `InvalidConversion`.
    pub fn convert<U: 'static, T: 'static>(&self, value: U) -> TraitResult<T> {
        self.try_convert(value).ok_or_else(|| {
            TraitError::invalid_conversion(&RuntimeType::of::<U>(), &RuntimeType::of::<T>())
        })
    }

    /// Number of cached lookup results.
    pub fn cached_len(&self) -> usize {
        recover_read(&self.cache, "OperatorResolver::cached_len").len()
    }
}

impl fmt::Debug for OperatorResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = recover_read(&self.state, "OperatorResolver::fmt");
        f.debug_struct("OperatorResolver")
            .field("options", &self.options)
            .field("operators", &state.operators.len())
            .field("upcasts", &state.hierarchy.len())
            .finish_non_exhaustive()
    }
}

/// `U -> U`, typed as `U -> T` where the caller has checked `U == T`.
fn identity<U: 'static, T: 'static>() -> Operator<U, T> {
    let func: ConvertFn<U, T> = Arc::new(|value: U| {
        let mut value = Some(value);
        let same = (&mut value as &mut dyn Any)
            .downcast_mut::<Option<T>>()
            .and_then(Option::take);
        same.unwrap_or_else(|| unreachable!("identity operator between distinct types"))
    });
    Operator::new(Conversion::identity(), func)
}

/// Compose an upcast chain into a typed function.
fn compose<U: 'static, T: 'static>(found: Found) -> ConvertFn<U, T> {
    let steps = match found {
        Found::Chain(steps) => steps,
        Found::Direct(registered) => vec![registered.erased],
    };

    Arc::new(move |value: U| {
        steps
            .iter()
            .try_fold(Box::new(value) as Box<dyn Any>, |value, step| step(value))
            .and_then(|value| value.downcast::<T>().ok())
            .map(|value| *value)
            .unwrap_or_else(|| {
                unreachable!(
                    "upcast chain {} -> {} is ill-typed",
                    std::any::type_name::<U>(),
                    std::any::type_name::<T>()
                )
            })
    })
}
