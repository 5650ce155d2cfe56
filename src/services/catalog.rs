// src/services/catalog.rs

use std::collections::HashMap;

use uuid::Uuid;

use crate::db::{Database, Entity, Filter, UnitOfWork};
use crate::domain::catalog::{Make, Model, VehicleType};
use crate::domain::views::{MakeSummary, ModelSummary, VehicleTypeSummary};
use crate::errors::AppResult;

/// Read access to makes, models and vehicle types.
#[derive(Debug, Clone)]
pub struct CatalogService {
    db: Database,
}

impl CatalogService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn get_all_makes(&self) -> AppResult<Vec<MakeSummary>> {
        let uow = self.db.unit_of_work()?;
        Ok(uow.makes().get_all()?.into_iter().map(make_summary).collect())
    }

    pub fn get_make_by_id(&self, id: Uuid) -> AppResult<Option<MakeSummary>> {
        let uow = self.db.unit_of_work()?;
        Ok(uow.makes().get_by_id(id)?.map(make_summary))
    }

    pub fn get_all_models(&self) -> AppResult<Vec<ModelSummary>> {
        let uow = self.db.unit_of_work()?;
        let models = uow.models().get_all()?;
        model_summaries(&uow, models)
    }

    pub fn get_models_by_make(&self, make_id: Uuid) -> AppResult<Vec<ModelSummary>> {
        let uow = self.db.unit_of_work()?;
        let models = uow.models().find(&Filter::new().eq("make_id", make_id))?;
        model_summaries(&uow, models)
    }

    pub fn get_model_by_id(&self, id: Uuid) -> AppResult<Option<ModelSummary>> {
        let uow = self.db.unit_of_work()?;
        let Some(model) = uow.models().get_by_id(id)? else {
            return Ok(None);
        };
        Ok(model_summaries(&uow, vec![model])?.pop())
    }

    pub fn get_all_vehicle_types(&self) -> AppResult<Vec<VehicleTypeSummary>> {
        let uow = self.db.unit_of_work()?;
        Ok(uow
            .vehicle_types()
            .get_all()?
            .into_iter()
            .map(vehicle_type_summary)
            .collect())
    }

    pub fn get_vehicle_type_by_id(&self, id: Uuid) -> AppResult<Option<VehicleTypeSummary>> {
        let uow = self.db.unit_of_work()?;
        Ok(uow.vehicle_types().get_by_id(id)?.map(vehicle_type_summary))
    }
}

fn make_summary(make: Make) -> MakeSummary {
    MakeSummary {
        id: make.id(),
        name: make.name,
        logo_url: make.logo_url,
        country: make.country,
    }
}

fn vehicle_type_summary(vt: VehicleType) -> VehicleTypeSummary {
    VehicleTypeSummary {
        id: vt.id(),
        name: vt.name,
        description: vt.description,
    }
}

/// Attaches make names with a single lookup.
fn model_summaries(uow: &UnitOfWork, models: Vec<Model>) -> AppResult<Vec<ModelSummary>> {
    let mut make_ids: Vec<Uuid> = models.iter().map(|m| m.make_id).collect();
    make_ids.sort();
    make_ids.dedup();

    let names: HashMap<Uuid, String> = uow
        .makes()
        .get_by_ids(&make_ids)?
        .into_iter()
        .map(|m| (m.id(), m.name))
        .collect();

    Ok(models
        .into_iter()
        .map(|m| ModelSummary {
            id: m.id(),
            make_id: m.make_id,
            make_name: names.get(&m.make_id).cloned().unwrap_or_default(),
            name: m.name,
            year_from: m.year_from,
            year_to: m.year_to,
        })
        .collect())
}
