use crate::rule::Rule;

mod firebase_dynamic_links;


pub use firebase_dynamic_links::VerifyFirebaseDynamicLinksRule;

static REGISTRY: &[&dyn Rule] = &[&VerifyFirebaseDynamicLinksRule];

/// Every registered rule, in evaluation order.
pub fn registry() -> &'static [&'static dyn Rule] {
    REGISTRY
}

pub fn lookup(key: &str) -> Option<&'static dyn Rule> {
    REGISTRY.iter().copied().find(|r| r.key() == key)
}
