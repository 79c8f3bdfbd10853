use std::collections::HashSet;

use quarry_core::{Map, Range, Value};

use crate::errors::GenerationError;
use crate::generators::primitives::draw_len;
use crate::generators::{Draw, DrawContext, Gen, Generator, IntoGen};

/// Sequence of `length` independently drawn elements, in draw order.
///
/// If any element omits, the whole array omits.
pub fn array(length: impl Into<Range>, element: impl IntoGen) -> Result<Gen, GenerationError> {
    let length = length.into().validate_length("array")?;
    Ok(Gen::new(ArrayGenerator {
        length,
        element: element.into_gen(),
    }))
}

/// Shape of a generated object: how many entries, and where keys and values
/// come from.
#[derive(Debug, Clone)]
pub struct ObjectSpec {
    pub width: Range,
    pub keys: Gen,
    pub values: Gen,
}

impl ObjectSpec {
    pub fn new(width: impl Into<Range>, keys: impl IntoGen, values: impl IntoGen) -> Self {
        Self {
            width: width.into(),
            keys: keys.into_gen(),
            values: values.into_gen(),
        }
    }
}

/// Mapping built from `width` independently drawn (key, value) pairs.
///
/// A later pair with a colliding key overwrites the earlier value, so the
/// result may hold fewer than `width` entries. Non-string keys are stored as
/// their JSON text. If any key or value omits, the whole object omits.
pub fn object(spec: ObjectSpec) -> Result<Gen, GenerationError> {
    let width = spec.width.validate_length("object")?;
    Ok(Gen::new(ObjectGenerator {
        width,
        keys: spec.keys,
        values: spec.values,
    }))
}

/// Mapping with one entry per declared field, in declaration order.
///
/// Fields whose generator omits are left out of the output.
pub fn record<I, K, T>(fields: I) -> Result<Gen, GenerationError>
where
    I: IntoIterator<Item = (K, T)>,
    K: Into<String>,
    T: IntoGen,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for (name, field) in fields {
        let name = name.into();
        if !seen.insert(name.clone()) {
            return Err(GenerationError::InvalidConfiguration(format!(
                "record: duplicate field '{name}'"
            )));
        }
        out.push((name, field.into_gen()));
    }
    Ok(Gen::new(RecordGenerator { fields: out }))
}

fn key_string(key: Value) -> String {
    match key {
        Value::String(value) => value,
        other => other.to_string(),
    }
}

struct ArrayGenerator {
    length: Range,
    element: Gen,
}

impl Generator for ArrayGenerator {
    fn id(&self) -> &'static str {
        "array"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Draw {
        let len = draw_len(self.length, ctx.rng);
        let mut items = Vec::new();
        for _ in 0..len {
            let Some(item) = self.element.draw(ctx)? else {
                return Ok(None);
            };
            items.push(item);
        }
        Ok(Some(Value::Array(items)))
    }
}

struct ObjectGenerator {
    width: Range,
    keys: Gen,
    values: Gen,
}

impl Generator for ObjectGenerator {
    fn id(&self) -> &'static str {
        "object"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Draw {
        let width = draw_len(self.width, ctx.rng);
        let mut map = Map::new();
        for _ in 0..width {
            let Some(key) = self.keys.draw(ctx)? else {
                return Ok(None);
            };
            let Some(value) = self.values.draw(ctx)? else {
                return Ok(None);
            };
            map.insert(key_string(key), value);
        }
        Ok(Some(Value::Object(map)))
    }
}

struct RecordGenerator {
    fields: Vec<(String, Gen)>,
}

impl Generator for RecordGenerator {
    fn id(&self) -> &'static str {
        "record"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Draw {
        let mut map = Map::new();
        for (name, field) in &self.fields {
            if let Some(value) = field.draw(ctx)? {
                map.insert(name.clone(), value);
            }
        }
        Ok(Some(Value::Object(map)))
    }
}
