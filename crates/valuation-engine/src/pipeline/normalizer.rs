//! Input normalizer
//!
//! Turns a raw JSON mapping of named fields into a [`PropertyDescription`].
//! Field names follow the request payload: `sqft` and `property_type` are
//! accepted as aliases of `size_area` and `property_category`.

use serde_json::{Map, Value};

use crate::error::{Result, ValuationError};
use crate::model::{LocationGrade, PropertyCategory, PropertyDescription};

const SIZE_FIELDS: [&str; 2] = ["size_area", "sqft"];
const CATEGORY_FIELDS: [&str; 2] = ["property_category", "property_type"];
const GRADE_FIELDS: [&str; 1] = ["location_grade"];
const ADDRESS_FIELDS: [&str; 1] = ["address"];

/// Validate and canonicalize a raw property description
pub fn normalize(raw: &Value) -> Result<PropertyDescription> {
    let fields = raw
        .as_object()
        .ok_or_else(|| ValuationError::validation("input", "expected an object of named fields"))?;

    let size_area = parse_size(required(fields, &SIZE_FIELDS)?)?;
    let category: PropertyCategory = required_str(fields, &CATEGORY_FIELDS)?.parse()?;
    let grade: LocationGrade = required_str(fields, &GRADE_FIELDS)?.parse()?;

    let description = PropertyDescription::new(size_area, category, grade)?;

    match lookup(fields, &ADDRESS_FIELDS) {
        None => Ok(description),
        Some((_, Value::String(address))) => Ok(description.with_address(address.as_str())),
        Some((name, _)) => Err(ValuationError::validation(name, "expected a string")),
    }
}

/// First present, non-null field among `names`
fn lookup<'a>(
    fields: &'a Map<String, Value>,
    names: &[&'static str],
) -> Option<(&'static str, &'a Value)> {
    names
        .iter()
        .find_map(|name| fields.get(*name).filter(|v| !v.is_null()).map(|v| (*name, v)))
}

fn required<'a>(
    fields: &'a Map<String, Value>,
    names: &[&'static str],
) -> Result<(&'static str, &'a Value)> {
    lookup(fields, names).ok_or_else(|| ValuationError::validation(names[0], "field is required"))
}

fn required_str<'a>(fields: &'a Map<String, Value>, names: &[&'static str]) -> Result<&'a str> {
    match required(fields, names)? {
        (_, Value::String(s)) => Ok(s.as_str()),
        (name, _) => Err(ValuationError::validation(name, "expected a string")),
    }
}

fn parse_size((name, value): (&'static str, &Value)) -> Result<f64> {
    let size = match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| ValuationError::validation(name, "number out of range"))?,
        // Form-encoded requests deliver numbers as text
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            ValuationError::validation(name, format!("expected a number, got {s:?}"))
        })?,
        _ => return Err(ValuationError::validation(name, "expected a number")),
    };

    if !size.is_finite() {
        return Err(ValuationError::validation(name, "must be a finite number"));
    }
    if size <= 0.0 {
        return Err(ValuationError::validation(
            name,
            format!("must be greater than zero, got {size}"),
        ));
    }
    Ok(size)
}
