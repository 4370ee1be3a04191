//! TypeRegistry - lazily resolved, shared trait entries.
//!
//! Every key (a [`ValueType<V>`] provider or a [`TypeEntry<T>`]) owns one
//! boxed `OnceLock` slot. The map of slots is locked only long enough to
//! find or insert a slot; resolution itself runs inside the slot's
//! `get_or_init`, so:
//!
//! - exactly one thread resolves a key, others block on that key only,
//! - resolving `TypeEntry<T>` may resolve `ValueType<T>` without deadlock,
//! - a failed resolution is recorded and returned on every later access.
//!
//! Metrics are reported once the slot is filled, outside its
//! initialization, so a collector may call back into the registry.
//!
//! Entries are owned by the registry and dropped with it. References handed
//! out borrow the registry; [`TypeRegistry::global`] lives for the process,
//! so its entries are `'static`.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;
use typekit_core::{
    PrimitiveKind, RuntimeType, TraitError, TraitResult, TypeFlags, TypeKind, ValueKind, ValueType,
};

use crate::locks::{recover_read, recover_write};
use crate::metrics::{MetricsCollector, NoopMetrics};
use crate::reflect::{Reflect, Resolution};

type Erased = Box<dyn Any + Send + Sync>;
type Slot = OnceLock<TraitResult<Erased>>;

static GLOBAL: OnceLock<TypeRegistry> = OnceLock::new();

/// Cache of resolved type traits.
pub struct TypeRegistry {
    /// Slots are boxed so their address survives a rehash of the map. A slot
    /// is never removed or replaced while the registry lives.
    slots: RwLock<FxHashMap<TypeId, Box<Slot>>>,
    metrics: Arc<dyn MetricsCollector>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create an empty registry that reports to [`NoopMetrics`].
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(FxHashMap::default()),
            metrics: Arc::new(NoopMetrics),
        }
    }

    /// Report resolution times to `metrics`.
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsCollector>) -> Self {
        self.metrics = metrics;
        self
    }

    /// The process-wide registry, created with defaults on first use.
    pub fn global() -> &'static TypeRegistry {
        GLOBAL.get_or_init(TypeRegistry::new)
    }

    /// Install the process-wide registry.
    ///
    /// Fails, handing `registry` back, if the global registry already exists.
    pub fn set_global(registry: TypeRegistry) -> Result<(), TypeRegistry> {
        GLOBAL.set(registry)
    }

    /// Number of keys resolved so far, successfully or not.
    pub fn len(&self) -> usize {
        recover_read(&self.slots, "TypeRegistry::len")
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether the entry of `T` has been resolved.
    pub fn is_resolved<T: Reflect>(&self) -> bool {
        recover_read(&self.slots, "TypeRegistry::is_resolved")
            .get(&TypeId::of::<TypeEntry<T>>())
            .is_some_and(|slot| slot.get().is_some())
    }

    /// The shared value-kind provider of `V`, resolved on first use.
    pub fn value_type<V: ValueKind>(&self) -> TraitResult<&ValueType<V>> {
        let slot = self.slot::<ValueType<V>>();
        self.resolve_slot(slot, RuntimeType::of::<V>(), |_| ValueType::<V>::new())
    }

    /// The resolved entry of `T`, resolved on first use.
    pub fn entry<T: Reflect>(&self) -> TraitResult<&TypeEntry<T>> {
        let slot = self.slot::<TypeEntry<T>>();
        if slot.get().is_none() {
            if let Resolution::Value(provider) = T::resolve() {
                // Resolve the provider outside the entry's initialization so
                // its metrics are reported with no slot being filled. A failure
                // is recorded in the provider's slot and picked up below.
                let _ = provider(self);
            }
        }
        self.resolve_slot(slot, RuntimeType::of::<T>(), TypeEntry::<T>::resolve)
    }

    fn slot<E: 'static>(&self) -> &Slot {
        let key = TypeId::of::<E>();
        let found = recover_read(&self.slots, "TypeRegistry::slot")
            .get(&key)
            .map(|slot| &**slot as *const Slot);

        let slot = match found {
            Some(slot) => slot,
            None => {
                let mut slots = recover_write(&self.slots, "TypeRegistry::slot");
                &**slots.entry(key).or_default() as *const Slot
            }
        };

        // SAFETY: the slot is boxed and stays in the map, unmoved, until the
        // registry is dropped, so it outlives the `&self` borrow.
        unsafe { &*slot }
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    fn resolve_slot<'a, E: Any + Send + Sync>(
        &self,
        slot: &'a Slot,
        runtime_type: RuntimeType,
        resolve: impl FnOnce(&Self) -> TraitResult<E>,
    ) -> TraitResult<&'a E> {
        let mut resolved: Option<(Duration, bool)> = None;
        let result = slot.get_or_init(|| {
            let start = Instant::now();
            let result = resolve(self).map(|entry| Box::new(entry) as Erased);
            resolved = Some((start.elapsed(), result.is_ok()));
            result
        });

        if let Some((elapsed, ok)) = resolved {
            self.metrics.report_resolution_time(&runtime_type, elapsed);
            if ok {
                log::debug!("[TypeRegistry] resolved {}", runtime_type);
            }
        }

        match result {
            Ok(entry) => entry.downcast_ref::<E>().ok_or_else(|| {
                TraitError::initialization(&runtime_type, "registry slot holds a different type")
            }),
            Err(err) => Err(err.clone()),
        }
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("resolved", &self.len())
            .finish_non_exhaustive()
    }
}

/// The resolved traits of `T`: its kind, default value and default-ness test.
pub struct TypeEntry<T> {
    runtime_type: RuntimeType,
    kind: TypeKind,
    flags: TypeFlags,
    default_value: T,
    is_default: fn(&T) -> bool,
}

impl<T: Reflect> TypeEntry<T> {
    #[cfg_attr(feature = "profiling", profiling::function)]
    fn resolve(registry: &TypeRegistry) -> TraitResult<Self> {
        let runtime_type = RuntimeType::of::<T>();
        let entry = match T::resolve() {
            Resolution::Value(provider) => {
                let provider = provider(registry)?;
                let kind = TypeKind::value::<T>();
                Self {
                    runtime_type,
                    kind,
                    flags: TypeFlags::describe(kind, PrimitiveKind::of::<T>()),
                    default_value: provider.default_value(),
                    is_default: provider.predicate(),
                }
            }
            Resolution::Composite { default, is_default } => {
                let kind = TypeKind::value::<T>();
                Self {
                    runtime_type,
                    kind,
                    flags: TypeFlags::describe(kind, None),
                    default_value: default(),
                    is_default,
                }
            }
            Resolution::Reference { null, is_null } => Self {
                runtime_type,
                kind: TypeKind::Reference,
                flags: TypeFlags::describe(TypeKind::Reference, None),
                default_value: null(),
                is_default: is_null,
            },
        };
        Ok(entry)
    }

    /// A fresh copy of the default value.
    pub fn default_value(&self) -> T {
        self.default_value.clone()
    }
}

impl<T> TypeEntry<T> {
    pub fn runtime_type(&self) -> RuntimeType {
        self.runtime_type
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn flags(&self) -> TypeFlags {
        self.flags
    }

    pub fn is_default(&self, value: &T) -> bool {
        (self.is_default)(value)
    }

    pub fn is_default_predicate(&self) -> fn(&T) -> bool {
        self.is_default
    }
}

impl<T> fmt::Debug for TypeEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeEntry")
            .field("runtime_type", &self.runtime_type)
            .field("kind", &self.kind)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}
