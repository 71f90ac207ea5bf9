use sea_orm::entity::prelude::*;

use crate::domain::model::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub login: String,
    pub firstname: String,
    pub lastname: String,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::article::Entity")]
    Article,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Article.def()
    }
}

impl From<Model> for User {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            login: m.login,
            firstname: m.firstname,
            lastname: m.lastname,
            description: m.description,
        }
    }
}
