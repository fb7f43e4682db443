use std::ptr;

use crate::error::SchemaDefinitionError;

use super::{FieldDescriptor, ModelDescriptor};

/// A field together with the model type that declared it.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedField {
    pub field: &'static FieldDescriptor,
    pub declared_in: &'static ModelDescriptor,
}

/// Flattens a model's extension chain into one ordered field list,
/// base-first.
///
/// A derived type with N inherited and M own fields yields exactly N+M
/// entries. Cycles in the chain and field names declared twice along the
/// chain are definition errors.
pub fn resolve_fields(
    model: &'static ModelDescriptor,
) -> Result<Vec<ResolvedField>, SchemaDefinitionError> {
    let mut chain = vec![model];
    let mut current = model;
    while let Some(base) = current.base {
        if chain.iter().any(|seen| ptr::eq(*seen, base)) {
            let mut names: Vec<String> = chain.iter().map(|m| m.key().to_string()).collect();
            names.push(base.key().to_string());
            return Err(SchemaDefinitionError::ExtensionCycle { chain: names });
        }
        chain.push(base);
        current = base;
    }

    let mut resolved: Vec<ResolvedField> = Vec::new();
    for &declaring in chain.iter().rev() {
        for field in declaring.fields {
            if let Some(existing) = resolved.iter().find(|r| r.field.name == field.name) {
                return Err(SchemaDefinitionError::FieldCollision {
                    model: declaring.key().to_string(),
                    field: field.name.to_string(),
                    base: existing.declared_in.key().to_string(),
                });
            }
            resolved.push(ResolvedField {
                field,
                declared_in: declaring,
            });
        }
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ScalarKind, SchemaId};

    const BASE_NS: SchemaId = SchemaId::new("eCH-0058", 5);
    const DERIVED_NS: SchemaId = SchemaId::new("eCH-0020", 3);

    static BASE: ModelDescriptor = ModelDescriptor {
        schema: BASE_NS,
        name: "headerType",
        element: "header",
        base: None,
        fields: &[
            FieldDescriptor::scalar("senderId", ScalarKind::TEXT),
            FieldDescriptor::scalar("messageId", ScalarKind::TEXT),
        ],
        attributes: &[],
    };

    static DERIVED: ModelDescriptor = ModelDescriptor {
        schema: DERIVED_NS,
        name: "headerType",
        element: "deliveryHeader",
        base: Some(&BASE),
        fields: &[FieldDescriptor::scalar("dataLock", ScalarKind::TEXT)],
        attributes: &[],
    };

    static COLLIDING: ModelDescriptor = ModelDescriptor {
        schema: DERIVED_NS,
        name: "collidingType",
        element: "colliding",
        base: Some(&BASE),
        fields: &[FieldDescriptor::scalar("messageId", ScalarKind::TEXT)],
        attributes: &[],
    };

    static LOOP_A: ModelDescriptor = ModelDescriptor {
        schema: DERIVED_NS,
        name: "loopA",
        element: "a",
        base: Some(&LOOP_B),
        fields: &[],
        attributes: &[],
    };

    static LOOP_B: ModelDescriptor = ModelDescriptor {
        schema: DERIVED_NS,
        name: "loopB",
        element: "b",
        base: Some(&LOOP_A),
        fields: &[],
        attributes: &[],
    };

    #[test]
    fn test_base_fields_come_first() {
        let fields = resolve_fields(&DERIVED).unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.field.name).collect();
        assert_eq!(names, vec!["senderId", "messageId", "dataLock"]);
        assert_eq!(fields[0].declared_in.schema, BASE_NS);
        assert_eq!(fields[2].declared_in.schema, DERIVED_NS);
    }

    #[test]
    fn test_collision_is_rejected() {
        let err = resolve_fields(&COLLIDING).unwrap_err();
        assert_eq!(
            err,
            SchemaDefinitionError::FieldCollision {
                model: "eCH-0020/3:collidingType".into(),
                field: "messageId".into(),
                base: "eCH-0058/5:headerType".into(),
            }
        );
    }

    #[test]
    fn test_cycle_is_rejected() {
        let err = resolve_fields(&LOOP_A).unwrap_err();
        match err {
            SchemaDefinitionError::ExtensionCycle { chain } => {
                assert_eq!(chain.first(), chain.last());
                assert_eq!(chain.len(), 3);
            }
            other => panic!("expected cycle, got {other:?}"),
        }
    }
}
