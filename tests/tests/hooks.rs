use tests::MemoryDriver;

use ottoman::schema::Entity;
use ottoman::{Db, Document, Model};

use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};

static BEFORE_DESTROY_RUNS: AtomicUsize = AtomicUsize::new(0);
static AFTER_DESTROY_RUNS: AtomicUsize = AtomicUsize::new(0);

fn audit(doc: &mut Document, marker: &str) {
    let mut trail = doc
        .get("audit")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    trail.push(json!(marker));
    doc.set("audit", trail);
}

fn first_before_create(doc: &mut Document) {
    audit(doc, "create:first");
}

fn second_before_create(doc: &mut Document) {
    audit(doc, "create:second");
}

fn after_create(doc: &mut Document) {
    audit(doc, "create:after");
}

fn before_update(doc: &mut Document) {
    audit(doc, "update:before");
}

fn after_update(doc: &mut Document) {
    audit(doc, "update:after");
}

fn before_destroy(_doc: &mut Document) {
    BEFORE_DESTROY_RUNS.fetch_add(1, Ordering::SeqCst);
}

fn after_destroy(_doc: &mut Document) {
    AFTER_DESTROY_RUNS.fetch_add(1, Ordering::SeqCst);
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Tracked {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    rev: Option<String>,

    #[serde(default)]
    audit: Vec<String>,
}

impl Model for Tracked {
    const NAME: &'static str = "Tracked";

    fn entity() -> Entity {
        Entity::new(Self::NAME)
            .before_create(first_before_create)
            .before_create(second_before_create)
            .after_create(after_create)
            .before_update(before_update)
            .after_update(after_update)
            .before_destroy(before_destroy)
            .after_destroy(after_destroy)
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    fn rev(&self) -> Option<&str> {
        self.rev.as_deref()
    }

    fn set_rev(&mut self, rev: Option<String>) {
        self.rev = rev;
    }
}

#[tokio::test]
async fn hooks_run_in_declaration_order_per_lifecycle_event() {
    let driver = MemoryDriver::new();
    let db = Db::builder().build(driver.clone());

    let mut record = Tracked::default();
    db.save(&mut record).await.unwrap();

    // Create-only hooks ran, in order; the after hook is visible on the
    // instance but was not persisted.
    assert_eq!(
        record.audit,
        vec!["create:first", "create:second", "create:after"]
    );
    let stored = driver.document(record.id.as_deref().unwrap()).unwrap();
    assert_eq!(
        stored.get("audit"),
        Some(&json!(["create:first", "create:second"]))
    );

    db.save(&mut record).await.unwrap();

    // Update-only hooks; the create hooks did not run again.
    assert_eq!(
        record.audit,
        vec![
            "create:first",
            "create:second",
            "create:after",
            "update:before",
            "update:after",
        ]
    );

    db.destroy(&mut record).await.unwrap();
    assert_eq!(BEFORE_DESTROY_RUNS.load(Ordering::SeqCst), 1);
    assert_eq!(AFTER_DESTROY_RUNS.load(Ordering::SeqCst), 1);
}
