//! SeaORM entities for database tables

use sea_orm::entity::prelude::*;

/// Key-value options table entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "options")]
pub struct Model {
    /// Option key (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub option_name: String,

    /// Option value as serialized JSON
    #[sea_orm(column_type = "Text")]
    pub option_value: String,

    /// Whether the option is loaded eagerly
    pub autoload: bool,

    /// Last update timestamp
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
