use crate::db::Shared;
use crate::{Error, Model, Result};

use ottoman_core::{
    doc::Document,
    schema::app::{Entity, Hooks},
};

use chrono::Utc;

pub(crate) const CREATED_AT: &str = "created_at";
pub(crate) const UPDATED_AT: &str = "updated_at";

/// The create/update path. A record with no revision is created:
/// defaults fill absent or null fields, before-create hooks run, the
/// unique-id rule derives the identity when one exists and none was
/// supplied. A record carrying a revision is updated through the
/// update-only hooks. Both paths stamp timestamps when tracking is on,
/// persist, run the matching after hooks, and reload the instance from
/// the final document so every mutation is visible on it.
pub(crate) async fn save<T: Model>(shared: &Shared, record: &mut T) -> Result<()> {
    let entity = T::entity();
    let mut doc = record.to_document()?;
    doc.set_type_tag(entity.name.as_str());

    let create = doc.is_new();
    if create {
        apply_defaults(&entity, &mut doc);
        Hooks::run(&entity.hooks.before_create, &mut doc);
    } else {
        Hooks::run(&entity.hooks.before_update, &mut doc);
    }

    if entity.timestamps {
        let now = serde_json::to_value(Utc::now())?;
        if create {
            doc.set(CREATED_AT, now.clone());
        }
        doc.set(UPDATED_AT, now);
    }

    if create && doc.id().is_none() {
        if let Some(rule) = entity.unique_id {
            let id = rule(&doc);
            if id.is_empty() {
                return Err(Error::configuration(format!(
                    "unique-id rule for `{}` produced an empty identity",
                    entity.name
                )));
            }
            doc.set_id(id);
        }
    }

    let response = shared.driver.save_document(&doc).await?;
    if !response.ok {
        return Err(Error::persistence(
            "save",
            format!("store rejected document; id={}", response.id),
        ));
    }

    tracing::debug!(entity = %entity.name, id = %response.id, rev = %response.rev, create, "saved");

    doc.set_id(response.id);
    doc.set_rev(response.rev);

    if create {
        Hooks::run(&entity.hooks.after_create, &mut doc);
    } else {
        Hooks::run(&entity.hooks.after_update, &mut doc);
    }

    *record = T::load(doc)?;
    Ok(())
}

/// The destroy path: before-destroy hooks, a delete round trip, then the
/// identity and revision are cleared so the record can be saved again as
/// brand-new (deriving a fresh unique id if a rule exists).
pub(crate) async fn destroy<T: Model>(shared: &Shared, record: &mut T) -> Result<()> {
    let entity = T::entity();

    let (id, rev) = match (record.id(), record.rev()) {
        (Some(id), Some(rev)) => (id.to_string(), rev.to_string()),
        _ => {
            return Err(Error::persistence(
                "delete",
                "record was never saved; it has no identity or revision".to_string(),
            ))
        }
    };

    let mut doc = record.to_document()?;
    Hooks::run(&entity.hooks.before_destroy, &mut doc);

    let response = shared.driver.delete_document(&id, &rev).await?;
    if !response.ok {
        return Err(Error::persistence(
            "delete",
            format!("store rejected delete; id={id}"),
        ));
    }

    tracing::debug!(entity = %entity.name, id = %id, "destroyed");

    record.set_id(None);
    record.set_rev(None);
    Hooks::run(&entity.hooks.after_destroy, &mut doc);
    Ok(())
}

/// Fills declared defaults into fields that are absent or null.
fn apply_defaults(entity: &Entity, doc: &mut Document) {
    for (field, default) in entity.defaults() {
        if !doc.is_set(field) {
            doc.set(field, default.clone());
        }
    }
}
