//! World loader.
//!
//! Ingests a YAML world description and upserts the reference catalog:
//!
//! ```yaml
//! name: small world
//! cities:
//!   here: [stuff]
//!   there: [things, cruft]
//! cards:
//!   - number: 1
//!     contracts:
//!       - [stuff, there, 5]
//!   - event: "oh noes!"
//! ```
//!
//! Everything matches on natural keys, so re-running a file is a no-op
//! apart from refreshed contract amounts and event text. A contract that
//! names an undeclared good or city aborts the import; the caller runs
//! the whole import in one transaction so nothing partial lands.

use std::collections::BTreeMap;

use sea_orm::ConnectionTrait;
use serde::Deserialize;

use crate::adapters::catalog_sea;
use crate::errors::domain::DomainError;

#[derive(Debug, Deserialize)]
pub struct WorldDef {
    pub name: String,
    #[serde(default)]
    pub cities: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub cards: Vec<CardDef>,
}

#[derive(Debug, Deserialize)]
pub struct CardDef {
    pub number: Option<i32>,
    pub event: Option<String>,
    #[serde(default)]
    pub contracts: Vec<ContractDef>,
}

/// `[good, city, amount]` triple as written in the YAML.
#[derive(Debug, Deserialize)]
pub struct ContractDef(pub String, pub String, pub i64);

/// Counts for the CLI to report after a successful import.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct WorldImportReport {
    pub world_id: i64,
    pub cities: usize,
    pub goods: usize,
    pub cards: usize,
    pub contracts: usize,
}

pub fn parse_world_def(input: &str) -> Result<WorldDef, DomainError> {
    serde_yaml::from_str(input)
        .map_err(|e| DomainError::validation(format!("invalid world definition: {e}")))
}

/// Import one world definition. Stages only; the caller owns the
/// transaction boundary.
pub async fn import_world<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    def: &WorldDef,
) -> Result<WorldImportReport, DomainError> {
    let world = catalog_sea::upsert_world(conn, &def.name).await?;
    let mut report = WorldImportReport {
        world_id: world.id,
        ..Default::default()
    };

    for (city_name, produces) in &def.cities {
        let city = catalog_sea::upsert_city(conn, world.id, city_name).await?;
        report.cities += 1;
        for good_name in produces {
            let good = catalog_sea::upsert_good(conn, good_name).await?;
            report.goods += 1;
            catalog_sea::ensure_city_good(conn, city.id, good.id).await?;
        }
    }

    for (position, card_def) in def.cards.iter().enumerate() {
        // A card without a printed number takes its position in the list,
        // which keeps re-imports stable.
        let number = card_def.number.unwrap_or(position as i32);

        let card = match catalog_sea::find_card_by_number(conn, world.id, number).await? {
            Some(card) => catalog_sea::update_card_event(conn, card, card_def.event.clone()).await?,
            None => {
                catalog_sea::insert_card(conn, world.id, Some(number), card_def.event.clone())
                    .await?
            }
        };
        report.cards += 1;

        for ContractDef(good_name, city_name, amount) in &card_def.contracts {
            let good = catalog_sea::find_good_by_name(conn, good_name)
                .await?
                .ok_or_else(|| {
                    DomainError::validation(format!(
                        "contract references good {good_name:?}, which no city produces"
                    ))
                })?;
            let city = catalog_sea::find_city_by_name(conn, world.id, city_name)
                .await?
                .ok_or_else(|| {
                    DomainError::validation(format!(
                        "contract references city {city_name:?}, which is not in world {:?}",
                        def.name
                    ))
                })?;

            let contract = catalog_sea::upsert_contract(conn, good.id, city.id, *amount).await?;
            catalog_sea::ensure_card_contract(conn, card.id, contract.id).await?;
            report.contracts += 1;
        }
    }

    tracing::info!(
        world = %def.name,
        cities = report.cities,
        cards = report.cards,
        contracts = report.contracts,
        "world imported"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::parse_world_def;

    #[test]
    fn parses_full_definition() {
        let def = parse_world_def(
            r#"
name: small world
cities:
  here: [stuff]
  there: [things, cruft]
cards:
  - number: 7
    contracts:
      - [stuff, there, 5]
  - event: "oh noes!"
"#,
        )
        .unwrap();

        assert_eq!(def.name, "small world");
        assert_eq!(def.cities["there"], vec!["things", "cruft"]);
        assert_eq!(def.cards.len(), 2);
        assert_eq!(def.cards[0].number, Some(7));
        assert_eq!(def.cards[0].contracts[0].2, 5);
        assert_eq!(def.cards[1].event.as_deref(), Some("oh noes!"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_world_def("cards: {not: [valid").is_err());
    }

    #[test]
    fn cities_and_cards_default_to_empty() {
        let def = parse_world_def("name: bare").unwrap();
        assert!(def.cities.is_empty());
        assert!(def.cards.is_empty());
    }
}
