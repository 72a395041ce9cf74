//! Category business logic.
//!
//! Categories group budgets and recurring expenses for display. A fixed seed
//! set is installed once, on the first startup against an empty table; the
//! seeded rows are marked default and cannot be deleted.

use crate::{
    entities::{Category, RecurringExpense, category, recurring_expense},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use uuid::Uuid;

/// The seed set installed when no categories exist yet.
///
/// Returned models carry fresh ids; callers insert them as-is.
pub fn default_categories() -> Vec<category::Model> {
    let seeds = [
        ("Housing", "🏠", "#3b82f6"),
        ("Utilities", "💡", "#10b981"),
        ("Insurance", "🛡️", "#8b5cf6"),
        ("Subscriptions", "📱", "#f59e0b"),
        ("Transportation", "🚗", "#ef4444"),
        ("Healthcare", "⚕️", "#ec4899"),
        ("Education", "📚", "#6366f1"),
        ("Other", "📦", "#6b7280"),
    ];

    let now = Utc::now().naive_utc();
    seeds
        .into_iter()
        .map(|(name, icon, color)| category::Model {
            id: Uuid::new_v4(),
            name: name.to_string(),
            color: Some(color.to_string()),
            icon: Some(icon.to_string()),
            is_default: true,
            created_at: now,
        })
        .collect()
}

/// Installs the default category set if the table is empty.
///
/// Returns the number of categories inserted (zero when the table already
/// had any rows, seeded or user-created).
pub async fn ensure_default_categories(db: &DatabaseConnection) -> Result<usize> {
    let existing = Category::find().count(db).await?;
    if existing > 0 {
        return Ok(0);
    }

    let defaults = default_categories();
    let count = defaults.len();
    for model in defaults {
        let active = category::ActiveModel {
            id: Set(model.id),
            name: Set(model.name),
            color: Set(model.color),
            icon: Set(model.icon),
            is_default: Set(model.is_default),
            created_at: Set(model.created_at),
        };
        active.insert(db).await?;
    }

    Ok(count)
}

/// Creates a user-defined category.
pub async fn create_category(
    db: &DatabaseConnection,
    name: String,
    color: Option<String>,
    icon: Option<String>,
) -> Result<category::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Category name cannot be empty".to_string(),
        });
    }

    let category = category::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.trim().to_string()),
        color: Set(color),
        icon: Set(icon),
        is_default: Set(false),
        created_at: Set(Utc::now().naive_utc()),
    };

    let result = category.insert(db).await?;
    Ok(result)
}

/// Retrieves all categories ordered alphabetically by name.
pub async fn get_all_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a category by id, returning None if it does not exist.
pub async fn get_category_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<category::Model>> {
    Category::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Deletes a user-created category.
///
/// Default categories and categories still referenced by a recurring expense
/// are left in place; returns whether a row was actually deleted.
pub async fn delete_category(db: &DatabaseConnection, id: Uuid) -> Result<bool> {
    let Some(category) = get_category_by_id(db, id).await? else {
        return Ok(false);
    };

    if category.is_default {
        return Ok(false);
    }

    let in_use = RecurringExpense::find()
        .filter(recurring_expense::Column::CategoryId.eq(id))
        .count(db)
        .await?;
    if in_use > 0 {
        return Ok(false);
    }

    let result = Category::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_default_categories_seeded_once() -> Result<()> {
        let db = setup_test_db().await?;

        // setup_test_db already ran init_store; a second ensure is a no-op
        let inserted = ensure_default_categories(&db).await?;
        assert_eq!(inserted, 0);

        let all = get_all_categories(&db).await?;
        assert_eq!(all.len(), default_categories().len());
        assert!(all.iter().all(|c| c.is_default));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_category_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_category(&db, "   ".to_string(), None, None).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_category_guards() -> Result<()> {
        let db = setup_test_db().await?;

        // Default categories cannot be deleted
        let default = get_all_categories(&db).await?.remove(0);
        assert!(!delete_category(&db, default.id).await?);

        // A category referenced by a recurring expense cannot be deleted
        let custom = create_category(&db, "Pets".to_string(), None, None).await?;
        create_test_recurring_expense(&db, "Dog food", custom.id).await?;
        assert!(!delete_category(&db, custom.id).await?);

        // An unused user category can
        let unused = create_category(&db, "Hobby".to_string(), None, None).await?;
        assert!(delete_category(&db, unused.id).await?);
        assert!(get_category_by_id(&db, unused.id).await?.is_none());

        Ok(())
    }
}
