//! Leaf hashing hooks.
//!
//! The visitors decide *how* hash codes combine; a [`HashHooks`]
//! implementation decides what the leaves contribute: strings (names),
//! constant values and assembly references.
//!
//! - [`DefaultHashHooks`]: fast, process-local (`FxHasher`)
//! - [`StableHashHooks`]: reproducible across processes and toolchains
//!   (seeded Marvin32), with [`StableOptions`] to drop constants or
//!   assembly versions from the result

use std::hash::{Hash, Hasher};

use arbor_ir::{AssemblyRef, ConstValue};
use bitflags::bitflags;
use rustc_hash::FxHasher;

use crate::combine::fold_u64;
use crate::marvin::{marvin32, DEFAULT_SEED};

/// Leaf contributions to an expression hash.
///
/// Implementations must be pure: equal inputs always hash equally.
pub trait HashHooks: Send + Sync {
    fn hash_str(&self, text: &str) -> i32;

    fn hash_constant(&self, value: &ConstValue) -> i32;

    /// Defaults to the hash of the full assembly name.
    fn hash_assembly(&self, assembly: &AssemblyRef) -> i32 {
        self.hash_str(assembly.full_name())
    }
}

/// Process-local hooks backed by `FxHasher`.
///
/// Results are deterministic within a build but not across toolchains.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultHashHooks;

fn fx_hash<T: Hash + ?Sized>(value: &T) -> i32 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    fold_u64(hasher.finish())
}

impl HashHooks for DefaultHashHooks {
    fn hash_str(&self, text: &str) -> i32 {
        fx_hash(text)
    }

    fn hash_constant(&self, value: &ConstValue) -> i32 {
        fx_hash(value)
    }
}

bitflags! {
    /// Knobs of the stable hash.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct StableOptions: u32 {
        /// Constants contribute nothing: equal hashes mean equal shape.
        const IGNORE_CONSTANTS = 1;
        /// Hash assemblies by simple name, dropping version, culture and key.
        const USE_ASSEMBLY_SIMPLE_NAME = 1 << 1;
        const ALL = Self::IGNORE_CONSTANTS.bits() | Self::USE_ASSEMBLY_SIMPLE_NAME.bits();
    }
}

impl StableOptions {
    pub const NONE: Self = Self::empty();
}

/// Hooks whose results do not depend on the process, platform or toolchain.
#[derive(Copy, Clone, Debug)]
pub struct StableHashHooks {
    options: StableOptions,
    seed: u64,
}

impl StableHashHooks {
    pub fn new(options: StableOptions) -> Self {
        Self::with_seed(options, DEFAULT_SEED)
    }

    pub fn with_seed(options: StableOptions, seed: u64) -> Self {
        Self { options, seed }
    }

    #[inline]
    pub fn options(&self) -> StableOptions {
        self.options
    }
}

impl Default for StableHashHooks {
    fn default() -> Self {
        Self::new(StableOptions::NONE)
    }
}

impl HashHooks for StableHashHooks {
    fn hash_str(&self, text: &str) -> i32 {
        marvin32(text, self.seed)
    }

    fn hash_constant(&self, value: &ConstValue) -> i32 {
        if self.options.contains(StableOptions::IGNORE_CONSTANTS) {
            return 0;
        }
        match value {
            ConstValue::Null => 0,
            ConstValue::Bool(b) => i32::from(*b),
            ConstValue::Int(v) => fold_u64(*v as u64),
            ConstValue::UInt(v) | ConstValue::Float(v) => fold_u64(*v),
            ConstValue::Char(c) => u32::from(*c) as i32,
            ConstValue::Str(s) => self.hash_str(s),
        }
    }

    fn hash_assembly(&self, assembly: &AssemblyRef) -> i32 {
        if self.options.contains(StableOptions::USE_ASSEMBLY_SIMPLE_NAME) {
            self.hash_str(assembly.simple_name())
        } else {
            self.hash_str(assembly.full_name())
        }
    }
}
