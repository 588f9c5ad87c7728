//! Line formats of the batch input.
//!
//! An address line carries ten `;`-separated fields:
//! `address id;entity id;street type;street name;number;neighborhood;region;postal code;lat;lon`.
//! A query line carries four: `query id;text;lat;lon`.

use crate::entity::Point;
use crate::EntityId;
use std::str::FromStr;
use thiserror::Error;

pub const ADDRESS_FIELDS: usize = 10;
pub const QUERY_FIELDS: usize = 4;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("invalid integer in `{field}`: {value:?}")]
    BadInteger { field: &'static str, value: String },
    #[error("invalid coordinate in `{field}`: {value:?}")]
    BadCoordinate { field: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddressRecord {
    pub address_id: String,
    pub entity_id: EntityId,
    pub street_type: String,
    pub street_name: String,
    pub number: String,
    pub neighborhood: String,
    pub region: String,
    pub postal_code: String,
    pub location: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryRecord {
    pub id: i64,
    pub text: String,
    pub origin: Point,
}

fn split_fields(line: &str, expected: usize) -> Result<Vec<&str>, RecordError> {
    let fields: Vec<&str> = line.trim().split(';').map(str::trim).collect();
    if fields.len() != expected {
        return Err(RecordError::FieldCount { expected, found: fields.len() });
    }
    Ok(fields)
}

fn parse_int<T: FromStr>(field: &'static str, value: &str) -> Result<T, RecordError> {
    value.parse().map_err(|_| RecordError::BadInteger { field, value: value.to_owned() })
}

/// Finite decimal coordinate; `NaN` and infinities are rejected.
fn parse_coordinate(field: &'static str, value: &str) -> Result<f64, RecordError> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RecordError::BadCoordinate { field, value: value.to_owned() }),
    }
}

impl FromStr for AddressRecord {
    type Err = RecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let f = split_fields(line, ADDRESS_FIELDS)?;
        Ok(Self {
            address_id: f[0].to_owned(),
            entity_id: parse_int("entity id", f[1])?,
            street_type: f[2].to_owned(),
            street_name: f[3].to_owned(),
            number: f[4].to_owned(),
            neighborhood: f[5].to_owned(),
            region: f[6].to_owned(),
            postal_code: f[7].to_owned(),
            location: Point::new(parse_coordinate("lat", f[8])?, parse_coordinate("lon", f[9])?),
        })
    }
}

impl FromStr for QueryRecord {
    type Err = RecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let f = split_fields(line, QUERY_FIELDS)?;
        Ok(Self {
            id: parse_int("query id", f[0])?,
            text: f[1].to_owned(),
            origin: Point::new(parse_coordinate("lat", f[2])?, parse_coordinate("lon", f[3])?),
        })
    }
}
