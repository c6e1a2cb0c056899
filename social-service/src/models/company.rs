//! Companies. The owner column is nullable: rows without an owner are
//! read-only for everyone.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::nullable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub parent_company_id: Option<i64>,
    pub industry: Option<String>,
    pub sub_industry: Option<String>,
    pub headquarters: Option<String>,
    pub date_incorporated: Option<NaiveDate>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewCompany {
    pub name: String,
    pub description: Option<String>,
    pub parent_company_id: Option<i64>,
    pub industry: Option<String>,
    pub sub_industry: Option<String>,
    pub headquarters: Option<String>,
    pub date_incorporated: Option<NaiveDate>,
    pub user_id: i64,
}

/// Partial update. `None` leaves a column alone; `Some(None)` clears a
/// nullable column. The owner is not updatable.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CompanyChanges {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub parent_company_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub industry: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub sub_industry: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub headquarters: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub date_incorporated: Option<Option<NaiveDate>>,
}

impl CompanyChanges {
    pub fn apply(self, company: &mut Company) {
        if let Some(name) = self.name {
            company.name = name;
        }
        if let Some(description) = self.description {
            company.description = description;
        }
        if let Some(parent) = self.parent_company_id {
            company.parent_company_id = parent;
        }
        if let Some(industry) = self.industry {
            company.industry = industry;
        }
        if let Some(sub_industry) = self.sub_industry {
            company.sub_industry = sub_industry;
        }
        if let Some(headquarters) = self.headquarters {
            company.headquarters = headquarters;
        }
        if let Some(date) = self.date_incorporated {
            company.date_incorporated = date;
        }
    }
}
