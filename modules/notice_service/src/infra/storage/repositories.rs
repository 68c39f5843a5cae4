//! SeaORM option store implementation

use crate::domain::repository::OptionStore;
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{sea_query::OnConflict, DatabaseConnection, EntityTrait};
use serde_json::Value;
use std::sync::Arc;

use super::{entity, mapper};

pub struct SeaOrmOptionStore {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmOptionStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OptionStore for SeaOrmOptionStore {
    async fn read(&self, key: &str) -> Result<Option<Value>> {
        let result = entity::Entity::find_by_id(key.to_string())
            .one(&*self.db)
            .await?;

        Ok(result.map(|row| mapper::decode_option_value(&row.option_value)))
    }

    async fn write(&self, key: &str, value: &Value, autoload: bool) -> Result<bool> {
        let encoded = mapper::encode_option_value(value)?;

        let existing = entity::Entity::find_by_id(key.to_string())
            .one(&*self.db)
            .await?;

        if existing.is_some_and(|row| row.option_value == encoded) {
            return Ok(false);
        }

        // A row inserted since the lookup is overwritten, not reported as a conflict
        entity::Entity::insert(mapper::new_option(key, encoded, autoload))
            .on_conflict(
                OnConflict::column(entity::Column::OptionName)
                    .update_columns([
                        entity::Column::OptionValue,
                        entity::Column::Autoload,
                        entity::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&*self.db)
            .await?;

        Ok(true)
    }
}

impl std::fmt::Debug for SeaOrmOptionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeaOrmOptionStore")
            .field("db", &"<connection>")
            .finish()
    }
}
