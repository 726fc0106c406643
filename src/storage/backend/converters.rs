use sea_orm::ActiveValue::{NotSet, Set};

use crate::storage::{Link, NewLink};
use migration::entities::link;

/// Convert a SeaORM model into a [`Link`].
pub fn model_to_link(model: link::Model) -> Link {
    Link {
        id: model.id,
        url: model.url,
        hash: model.hash,
        created_at: model.created_at,
        views: model.views.max(0) as u64,
    }
}

/// Build the ActiveModel for a new record. The identity is store-assigned
/// and the view count always starts at zero.
pub fn new_link_to_active_model(link: &NewLink) -> link::ActiveModel {
    link::ActiveModel {
        id: NotSet,
        url: Set(link.url.clone()),
        hash: Set(link.hash.clone()),
        created_at: Set(link.created_at),
        views: Set(0),
    }
}
