//! User preference storage.
//!
//! Small key-value store for settings a client persists across launches.
//! One row per key, upserted in place.

use crate::{
    entities::{Preference, preference},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{ActiveValue::NotSet, Set, prelude::*};

/// Key under which the display language is stored.
pub const LANGUAGE_KEY: &str = "language";

/// Language used when the user never picked one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Reads a preference value, or None if the key was never set.
pub async fn get_preference(db: &DatabaseConnection, key: &str) -> Result<Option<String>> {
    let row = Preference::find()
        .filter(preference::Column::Key.eq(key))
        .one(db)
        .await?;
    Ok(row.map(|p| p.value))
}

/// Writes a preference value, replacing any previous value for the key.
pub async fn set_preference(db: &DatabaseConnection, key: &str, value: &str) -> Result<()> {
    let now = Utc::now().naive_utc();

    let existing = Preference::find()
        .filter(preference::Column::Key.eq(key))
        .one(db)
        .await?;

    match existing {
        Some(row) => {
            let mut active: preference::ActiveModel = row.into();
            active.value = Set(value.to_string());
            active.updated_at = Set(now);
            active.update(db).await?;
        }
        None => {
            let active = preference::ActiveModel {
                id: NotSet,
                key: Set(key.to_string()),
                value: Set(value.to_string()),
                updated_at: Set(now),
            };
            active.insert(db).await?;
        }
    }

    Ok(())
}

/// The stored display language, falling back to [`DEFAULT_LANGUAGE`].
pub async fn get_language(db: &DatabaseConnection) -> Result<String> {
    let language = get_preference(db, LANGUAGE_KEY).await?;
    Ok(language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()))
}

/// Persists the display language.
pub async fn set_language(db: &DatabaseConnection, language: &str) -> Result<()> {
    set_preference(db, LANGUAGE_KEY, language).await
}
