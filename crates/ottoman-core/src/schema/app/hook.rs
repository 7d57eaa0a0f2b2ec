use crate::doc::Document;

/// A lifecycle callback. Hooks run synchronously against the document
/// being persisted; mutations are carried into the store and written back
/// to the instance after the round trip.
pub type Hook = fn(&mut Document);

/// Ordered callback lists per lifecycle event. Create-only and
/// update-only lists are distinct.
#[derive(Debug, Clone, Default)]
pub struct Hooks {
    pub before_create: Vec<Hook>,
    pub after_create: Vec<Hook>,
    pub before_update: Vec<Hook>,
    pub after_update: Vec<Hook>,
    pub before_destroy: Vec<Hook>,
    pub after_destroy: Vec<Hook>,
}

impl Hooks {
    /// Runs one event's hooks in declaration order.
    pub fn run(hooks: &[Hook], doc: &mut Document) {
        for hook in hooks {
            hook(doc);
        }
    }
}
