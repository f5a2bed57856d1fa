use serde::{Deserialize, Serialize};
use std::sync::{OnceLock, RwLock};

use crate::types::BindingBehavior;

/// Options consulted when a descriptor is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptorOptions {
    pub default_binding_behavior: BindingBehavior,
}

impl DescriptorOptions {
    pub fn with_binding_behavior(mut self, behavior: BindingBehavior) -> Self {
        self.default_binding_behavior = behavior;
        self
    }

    /// Current process-wide options.
    pub fn ambient() -> Self {
        match ambient_slot().read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

static AMBIENT: OnceLock<RwLock<DescriptorOptions>> = OnceLock::new();

fn ambient_slot() -> &'static RwLock<DescriptorOptions> {
    AMBIENT.get_or_init(|| RwLock::new(DescriptorOptions::default()))
}

/// Replace the process-wide options picked up by contexts created afterwards.
///
/// Returns the previous value. Contexts that already exist keep their snapshot.
pub fn set_ambient_options(options: DescriptorOptions) -> DescriptorOptions {
    let mut guard = match ambient_slot().write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    std::mem::replace(&mut *guard, options)
}
