// Every module served by the demo server. Order is the lifecycle order.

use blog::BlogModule;
use customer::CustomerModule;
use demo_kit::ModuleEntry;

#[must_use]
pub fn registered_modules() -> Vec<ModuleEntry> {
    vec![
        ModuleEntry::new(BlogModule::default()),
        ModuleEntry::new(CustomerModule::default()),
    ]
}
