use anyhow::Context;
use contracts::domain::a002_sheet::{Sheet, SheetId};
use contracts::domain::common::AggregateId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_sheet")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Sheet {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&m.id).context("Corrupt sheet id")?;
        Ok(Sheet {
            id: SheetId(id),
            name: m.name,
            created_at: m.created_at,
        })
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// All registered sheets in creation order.
pub async fn list_all() -> anyhow::Result<Vec<Sheet>> {
    Entity::find()
        .order_by_asc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Sheet::try_from)
        .collect()
}

pub async fn insert(sheet: &Sheet) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(sheet.id.as_string()),
        name: Set(sheet.name.clone()),
        created_at: Set(sheet.created_at),
    };
    active.insert(conn()).await?;
    Ok(())
}
