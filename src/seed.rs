// src/seed.rs

//! Starter catalogue for an empty database.

use tracing::info;

use crate::db::{Database, Entity, Filter};
use crate::domain::catalog::{Make, Model, VehicleType};
use crate::errors::AppResult;

type ModelRow = (&'static str, i32, Option<i32>);

const CATALOG: &[(&str, &str, &[ModelRow])] = &[
    (
        "BMW",
        "Germany",
        &[
            ("X1", 2015, None),
            ("X3", 2017, None),
            ("X5", 2013, None),
            ("3 Series", 2012, None),
            ("5 Series", 2010, None),
            ("7 Series", 2015, None),
        ],
    ),
    (
        "Mercedes-Benz",
        "Germany",
        &[
            ("A-Class", 2012, None),
            ("C-Class", 2014, None),
            ("E-Class", 2016, None),
            ("S-Class", 2013, None),
            ("GLC", 2015, None),
            ("GLE", 2015, None),
        ],
    ),
    (
        "Audi",
        "Germany",
        &[
            ("A3", 2012, None),
            ("A4", 2015, None),
            ("A6", 2011, None),
            ("Q3", 2011, None),
            ("Q5", 2016, None),
            ("Q7", 2015, None),
        ],
    ),
    (
        "Toyota",
        "Japan",
        &[
            ("Corolla", 2013, None),
            ("Camry", 2011, None),
            ("RAV4", 2013, None),
            ("Yaris", 2011, None),
            ("Avensis", 2009, Some(2018)),
            ("Land Cruiser", 2007, None),
        ],
    ),
    (
        "Volkswagen",
        "Germany",
        &[
            ("Golf", 2012, None),
            ("Passat", 2010, None),
            ("Tiguan", 2016, None),
            ("Polo", 2009, None),
            ("Touareg", 2010, None),
        ],
    ),
    (
        "Honda",
        "Japan",
        &[("Civic", 2012, None), ("Accord", 2008, None), ("CR-V", 2012, None), ("Jazz", 2008, None)],
    ),
    (
        "Ford",
        "USA",
        &[
            ("Focus", 2011, None),
            ("Fiesta", 2008, None),
            ("Mondeo", 2014, None),
            ("Kuga", 2012, None),
            ("Mustang", 2015, None),
        ],
    ),
    (
        "Renault",
        "France",
        &[("Clio", 2012, None), ("Megane", 2015, None), ("Captur", 2013, None), ("Kadjar", 2015, None)],
    ),
    (
        "Peugeot",
        "France",
        &[("208", 2012, None), ("308", 2013, None), ("3008", 2016, None), ("5008", 2017, None)],
    ),
    (
        "Skoda",
        "Czech Republic",
        &[("Octavia", 2013, None), ("Superb", 2015, None), ("Fabia", 2014, None), ("Kodiaq", 2016, None)],
    ),
    (
        "Mazda",
        "Japan",
        &[("3", 2013, None), ("6", 2012, None), ("CX-5", 2012, None), ("MX-5", 2015, None)],
    ),
    (
        "Nissan",
        "Japan",
        &[("Qashqai", 2013, None), ("Juke", 2010, None), ("X-Trail", 2014, None), ("Micra", 2010, None)],
    ),
    (
        "Hyundai",
        "South Korea",
        &[("i20", 2014, None), ("i30", 2012, None), ("Tucson", 2015, None), ("Santa Fe", 2012, None)],
    ),
    (
        "Kia",
        "South Korea",
        &[("Sportage", 2015, None), ("Ceed", 2012, None), ("Rio", 2011, None), ("Sorento", 2015, None)],
    ),
    ("Volvo", "Sweden", &[]),
    ("Opel", "Germany", &[]),
    ("Citroën", "France", &[]),
    ("Fiat", "Italy", &[]),
    ("Seat", "Spain", &[]),
    ("Dacia", "Romania", &[]),
];

const VEHICLE_TYPES: &[(&str, &str)] = &[
    ("Passenger car", "Cars built to carry up to nine people"),
    ("SUV", "Sport utility and off-road vehicles"),
    ("Van", "Vans and minibuses"),
    ("Pickup", "Light trucks with an open cargo bed"),
    ("Motorcycle", "Two-wheeled motor vehicles"),
];

/// Inserts the starter makes, models and vehicle types. Does nothing when
/// any make exists already. Returns the number of rows written.
pub fn seed_catalog(db: &Database) -> AppResult<usize> {
    let uow = db.unit_of_work()?;
    if uow.makes().any(&Filter::new())? {
        info!("catalogue already present; skipping seed");
        return Ok(0);
    }

    let written = uow.transaction(|uow| {
        for (name, country, models) in CATALOG {
            let make = Make::new(*name, Some(*country));
            uow.makes().add(&make)?;
            for (model_name, year_from, year_to) in models.iter() {
                let mut model = Model::new(make.id(), *model_name, Some(*year_from));
                model.year_to = *year_to;
                uow.models().add(&model)?;
            }
        }
        for (name, description) in VEHICLE_TYPES {
            uow.vehicle_types().add(&VehicleType::new(*name, Some(*description)))?;
        }
        uow.save_changes()
    })?;

    info!(rows = written, "catalogue seeded");
    Ok(written)
}
