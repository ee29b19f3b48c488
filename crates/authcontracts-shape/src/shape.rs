use serde_json::{json, Map, Value};

/// Primitive kind of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Object(ShapeDescriptor),
}

impl FieldKind {
    /// JSON Schema `type` keyword for this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Object(_) => "object",
        }
    }

    pub fn to_json_schema(&self) -> Value {
        match self {
            FieldKind::Object(shape) => shape.to_json_schema(),
            other => json!({ "type": other.type_name() }),
        }
    }

    fn same_structure(&self, other: &FieldKind) -> bool {
        match (self, other) {
            (FieldKind::Object(a), FieldKind::Object(b)) => a.same_structure(b),
            (a, b) => a.type_name() == b.type_name(),
        }
    }
}

/// A named field inside a [`ShapeDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    kind: FieldKind,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }
}

/// Declarative description of an object's fields.
///
/// Fields keep declaration order. Declaring a name twice replaces the earlier
/// kind in place, mirroring how object literals resolve duplicate keys.
///
/// No field is ever marked required: the rendered schema omits `required`
/// entirely, so every field is optional to the validation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeDescriptor {
    fields: Vec<Field>,
}

impl ShapeDescriptor {
    /// Start an empty object shape.
    pub fn object() -> Self {
        Self::default()
    }

    /// Add (or replace) a field of the given kind.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(existing) => existing.kind = kind,
            None => self.fields.push(Field { name, kind }),
        }
        self
    }

    /// Add a text field.
    pub fn text(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::String)
    }

    /// Add a numeric field.
    pub fn number(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Number)
    }

    /// Add a nested object field.
    pub fn nested(self, name: impl Into<String>, shape: ShapeDescriptor) -> Self {
        self.field(name, FieldKind::Object(shape))
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldKind> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.kind)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }

    /// Look up a field by dotted path, e.g. `tokens.accessToken`.
    pub fn resolve(&self, path: &str) -> Option<&FieldKind> {
        let mut segments = path.split('.');
        let mut kind = self.get(segments.next()?)?;
        for segment in segments {
            match kind {
                FieldKind::Object(shape) => kind = shape.get(segment)?,
                _ => return None,
            }
        }
        Some(kind)
    }

    /// Dotted paths of every non-object field, sorted.
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_leaf_paths("", &mut paths);
        paths.sort_unstable();
        paths
    }

    fn collect_leaf_paths(&self, prefix: &str, out: &mut Vec<String>) {
        for field in &self.fields {
            let path = if prefix.is_empty() {
                field.name.clone()
            } else {
                format!("{prefix}.{}", field.name)
            };
            match &field.kind {
                FieldKind::Object(shape) => shape.collect_leaf_paths(&path, out),
                _ => out.push(path),
            }
        }
    }

    /// Same field names with the same kinds, recursively, ignoring order.
    pub fn same_structure(&self, other: &ShapeDescriptor) -> bool {
        self.fields.len() == other.fields.len()
            && self.fields.iter().all(|field| {
                other
                    .get(&field.name)
                    .is_some_and(|kind| field.kind.same_structure(kind))
            })
    }

    /// Render as a JSON Schema object schema.
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|field| (field.name.clone(), field.kind.to_json_schema()))
            .collect();

        json!({
            "type": "object",
            "properties": properties,
        })
    }
}

/// Free-function form of [`ShapeDescriptor::same_structure`].
pub fn structurally_equal(a: &ShapeDescriptor, b: &ShapeDescriptor) -> bool {
    a.same_structure(b)
}
