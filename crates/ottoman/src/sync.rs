use crate::db::Shared;
use crate::{Error, Result};

use ottoman_core::schema::db::DesignDocument;

/// Reconciles the entity type's in-memory view declarations with the
/// stored design document, then marks the registry entry fresh.
///
/// A fetched design document is merged into, never clobbered: views
/// present remotely but not declared locally (another process, a stale
/// deployment) survive. A missing, unreadable, or unfetchable document is
/// rebuilt wholesale from the local declarations, which also covers the
/// document having been deleted out-of-band.
pub(crate) async fn synchronize(shared: &Shared, entity_name: &str) -> Result<()> {
    let local = shared.registry.design_document(entity_name);

    let merged = match shared.driver.get_document(&local.id).await {
        Ok(doc) => match DesignDocument::from_document(doc) {
            Ok(mut remote) => {
                remote.merge(&local.views);
                remote
            }
            Err(err) => {
                tracing::warn!(id = %local.id, %err, "stored design document is unreadable; replacing it");
                local
            }
        },
        Err(err) if err.is_document_not_found() => local,
        Err(err) => {
            tracing::debug!(id = %local.id, %err, "design document fetch failed; storing local copy");
            local
        }
    };

    let response = shared.driver.save_document(&merged.to_document()?).await?;
    if !response.ok {
        return Err(Error::persistence(
            "save",
            format!("store rejected design document; id={}", merged.id),
        ));
    }

    shared.registry.mark_fresh(entity_name);
    tracing::debug!(id = %merged.id, views = merged.views.len(), "design document synchronized");
    Ok(())
}
