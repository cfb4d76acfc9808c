use anyhow::Context;
use contracts::domain::a001_carton::{Carton, CartonId, CartonRow};
use contracts::domain::a002_sheet::SheetId;
use contracts::domain::common::AggregateId;
use contracts::enums::Buyer;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_carton")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub carton_no: String,
    pub buyer: String,
    pub store_name: String,
    pub season: String,
    /// Row list serialized as JSON, in entry order
    pub rows: String,
    pub total_pieces: i64,
    pub net_weight: String,
    pub gross_weight: String,
    pub carton_dimension: String,
    pub unique_prints: String,
    pub unique_styles: String,
    pub sheet_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Carton {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let rows: Vec<CartonRow> =
            serde_json::from_str(&m.rows).context("Corrupt carton row list")?;
        let unique_prints: Vec<String> =
            serde_json::from_str(&m.unique_prints).context("Corrupt unique_prints")?;
        let unique_styles: Vec<String> =
            serde_json::from_str(&m.unique_styles).context("Corrupt unique_styles")?;
        let buyer = Buyer::from_name(&m.buyer)
            .ok_or_else(|| anyhow::anyhow!("Unknown buyer in storage: {}", m.buyer))?;
        let id = Uuid::parse_str(&m.id).context("Corrupt carton id")?;
        let sheet_id = match m.sheet_id {
            Some(raw) => Some(
                SheetId::from_string(&raw).map_err(|e| anyhow::anyhow!("Corrupt sheet id: {e}"))?,
            ),
            None => None,
        };

        Ok(Carton {
            id: CartonId(id),
            carton_no: m.carton_no,
            buyer,
            store_name: m.store_name,
            season: m.season,
            rows,
            total_pieces: m.total_pieces,
            net_weight: m.net_weight,
            gross_weight: m.gross_weight,
            carton_dimension: m.carton_dimension,
            timestamp: m.created_at,
            unique_prints,
            unique_styles,
            sheet_id,
        })
    }
}

fn to_active_model(aggregate: &Carton) -> anyhow::Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(aggregate.id.as_string()),
        carton_no: Set(aggregate.carton_no.clone()),
        buyer: Set(aggregate.buyer.display_name().to_string()),
        store_name: Set(aggregate.store_name.clone()),
        season: Set(aggregate.season.clone()),
        rows: Set(serde_json::to_string(&aggregate.rows)?),
        total_pieces: Set(aggregate.total_pieces),
        net_weight: Set(aggregate.net_weight.clone()),
        gross_weight: Set(aggregate.gross_weight.clone()),
        carton_dimension: Set(aggregate.carton_dimension.clone()),
        unique_prints: Set(serde_json::to_string(&aggregate.unique_prints)?),
        unique_styles: Set(serde_json::to_string(&aggregate.unique_styles)?),
        sheet_id: Set(aggregate.sheet_id.map(|s| s.as_string())),
        created_at: Set(aggregate.timestamp),
    })
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// All cartons in insertion order (commit timestamp ascending).
pub async fn list_all() -> anyhow::Result<Vec<Carton>> {
    Entity::find()
        .order_by_asc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Carton::try_from)
        .collect()
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Carton>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    result.map(Carton::try_from).transpose()
}

pub async fn insert(aggregate: &Carton) -> anyhow::Result<Uuid> {
    let active = to_active_model(aggregate)?;
    active.insert(conn()).await?;
    Ok(aggregate.id.value())
}

/// Hard delete. Returns whether a record was actually removed.
pub async fn delete_by_id(id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::delete_many()
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
