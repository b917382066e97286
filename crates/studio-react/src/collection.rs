//! Data-store bindings for collection components.
//!
//! A collection prop `items` bound to model `M` becomes
//!
//! ```text
//! const itemsDataStore = useDataStoreBinding({ type: "collection", model: M }).items;
//! const items = itemsProp !== undefined ? itemsProp : itemsDataStore;
//! ```
//!
//! With a data schema, every has-many relation of `M` is queried as well and
//! joined onto each item through its foreign key.

use crate::ast::{BinaryOp, Expr, ObjectMember, Stmt};
use crate::helpers::COLLECTION_ITEM;
use crate::hooks::HookName;
use studio_core::{
    lower_case_first, sanitize_name, GenericDataSchema, StudioComponent,
    StudioComponentDataConfiguration,
};
use tracing::debug;

/// A has-many relation queried alongside the collection model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedQuery {
    /// Field on the collection model holding the related items.
    pub field: String,
    pub related_model_name: String,
    /// Field on the related model pointing back at the item's `id`.
    pub foreign_key: String,
    /// Identifier the related items are bound to.
    pub identifier: String,
}

/// `items` -> `itemsProp`.
pub fn collection_prop_alias(key: &str) -> String {
    format!("{key}Prop")
}

/// `items` -> `itemsDataStore`.
pub fn collection_data_store_name(key: &str) -> String {
    format!("{key}DataStore")
}

/// `Book` -> `bookItems`.
pub fn related_items_name(model: &str) -> String {
    format!("{}Items", lower_case_first(&sanitize_name(model)))
}

/// Has-many relations of `model` whose related model exists in `schema`.
///
/// Relations without a foreign key cannot be joined and are skipped.
pub fn get_nested_queries(model: &str, schema: &GenericDataSchema) -> Vec<NestedQuery> {
    let Some(data_model) = schema.models.get(model) else {
        return Vec::new();
    };

    data_model
        .has_many_fields()
        .filter(|(_, relation)| schema.models.contains_key(&relation.related_model_name))
        .filter_map(|(field, relation)| {
            let foreign_key = relation.related_model_fields.first()?;
            Some(NestedQuery {
                field: field.to_string(),
                related_model_name: relation.related_model_name.clone(),
                foreign_key: foreign_key.clone(),
                identifier: related_items_name(&relation.related_model_name),
            })
        })
        .collect()
}

/// `useDataStoreBinding({ type: "collection", model: M }).items`
fn data_store_items(config: &StudioComponentDataConfiguration) -> Expr {
    let mut arguments = vec![
        ObjectMember::property("type", Expr::string("collection")),
        ObjectMember::property("model", Expr::ident(sanitize_name(&config.model))),
    ];
    if let Some(predicate) = &config.predicate {
        arguments.push(ObjectMember::property("criteria", Expr::from_json(predicate)));
    }
    Expr::call(
        Expr::ident(HookName::UseDataStoreBinding.as_str()),
        [Expr::object(arguments)],
    )
    .member("items")
}

/// `items.map((item) => ({ ...item, books: bookItems.filter(...), }))`
fn join_nested(items: Expr, queries: &[NestedQuery]) -> Expr {
    let mut members = vec![ObjectMember::spread(Expr::ident(COLLECTION_ITEM))];
    for query in queries {
        let matches_item = Expr::binary(
            Expr::ident("model").member(&query.foreign_key),
            BinaryOp::StrictEq,
            Expr::ident(COLLECTION_ITEM).member("id"),
        );
        let related = Expr::call(
            Expr::ident(&query.identifier).member("filter"),
            [Expr::arrow(["model"], matches_item)],
        );
        members.push(ObjectMember::property(&query.field, related));
    }

    Expr::call(
        items.member("map"),
        [Expr::arrow([COLLECTION_ITEM], Expr::object_multiline(members))],
    )
}

/// Statements binding every collection prop of `component` to its items.
///
/// Related-model queries come first so the joined items can refer to them.
/// Without a schema only the first-level query is generated.
pub fn build_collection_statements(
    component: &StudioComponent,
    schema: Option<&GenericDataSchema>,
) -> Vec<Stmt> {
    let Some(collections) = &component.collection_properties else {
        return Vec::new();
    };

    let mut statements = Vec::new();
    let mut bound_related: Vec<String> = Vec::new();

    for (key, config) in collections {
        let queries = schema
            .map(|schema| get_nested_queries(&config.model, schema))
            .unwrap_or_default();

        for query in &queries {
            if bound_related.contains(&query.identifier) {
                continue;
            }
            statements.push(Stmt::const_decl(
                &query.identifier,
                data_store_items(&StudioComponentDataConfiguration {
                    model: query.related_model_name.clone(),
                    predicate: None,
                }),
            ));
            bound_related.push(query.identifier.clone());
        }

        let items = data_store_items(config);
        let items = if queries.is_empty() {
            items
        } else {
            join_nested(items, &queries)
        };
        let data_store = collection_data_store_name(key);
        statements.push(Stmt::const_decl(&data_store, items));

        let prop = collection_prop_alias(key);
        statements.push(Stmt::const_decl(
            key,
            Expr::conditional(
                Expr::binary(Expr::ident(&prop), BinaryOp::StrictNe, Expr::ident("undefined")),
                Expr::ident(&prop),
                Expr::ident(data_store),
            ),
        ));

        debug!(
            collection = %key,
            model = %config.model,
            nested = queries.len(),
            "collection bound"
        );
    }

    statements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::Printer;
    use serde_json::json;

    fn author_collection() -> StudioComponent {
        serde_json::from_value(json!({
            "name": "AuthorCollection",
            "componentType": "Collection",
            "collectionProperties": { "items": { "model": "Author" } },
            "children": [
                {
                    "name": "AuthorCard",
                    "componentType": "Flex",
                    "children": [
                        {
                            "name": "AuthorName",
                            "componentType": "Text",
                            "properties": {
                                "label": { "collectionBindingProperties": { "property": "Author", "field": "name" } }
                            }
                        }
                    ]
                }
            ]
        }))
        .unwrap()
    }

    fn author_has_many_schema() -> GenericDataSchema {
        serde_json::from_value(json!({
            "dataSourceType": "DataStore",
            "models": {
                "Author": {
                    "fields": {
                        "id": { "dataType": "ID", "required": true },
                        "name": { "dataType": "String" },
                        "books": {
                            "dataType": { "model": "Book" },
                            "isArray": true,
                            "relationship": {
                                "type": "HAS_MANY",
                                "relatedModelName": "Book",
                                "relatedModelFields": ["authorID"]
                            }
                        }
                    }
                },
                "Book": {
                    "fields": {
                        "id": { "dataType": "ID", "required": true },
                        "title": { "dataType": "String" },
                        "authorID": { "dataType": "ID" }
                    }
                }
            }
        }))
        .unwrap()
    }

    fn print(statements: &[Stmt]) -> String {
        Printer::default().print_module(statements)
    }

    #[test]
    fn test_nested_queries() {
        let queries = get_nested_queries("Author", &author_has_many_schema());
        assert_eq!(
            queries,
            vec![NestedQuery {
                field: "books".to_string(),
                related_model_name: "Book".to_string(),
                foreign_key: "authorID".to_string(),
                identifier: "bookItems".to_string(),
            }]
        );
        assert!(get_nested_queries("Book", &author_has_many_schema()).is_empty());
        assert!(get_nested_queries("Missing", &author_has_many_schema()).is_empty());
    }

    #[test]
    fn test_nested_query_generated() {
        let schema = author_has_many_schema();
        let text = print(&build_collection_statements(&author_collection(), Some(&schema)));

        assert!(text.contains(
            r#"const bookItems = useDataStoreBinding({ type: "collection", model: Book }).items;"#
        ));
        assert!(text.contains("const itemsDataStore = useDataStoreBinding"));
        assert!(text.contains("books: bookItems.filter((model) => model.authorID === item.id),"));
        assert!(text.find("const bookItems").unwrap() < text.find("const itemsDataStore").unwrap());
    }

    #[test]
    fn test_joined_items_layout() {
        let schema = author_has_many_schema();
        let statements = build_collection_statements(&author_collection(), Some(&schema));
        assert_eq!(statements.len(), 3);
        assert_eq!(
            Printer::default().print_stmt(&statements[1]),
            concat!(
                "const itemsDataStore = useDataStoreBinding({ type: \"collection\", model: Author })",
                ".items.map((item) => ({\n",
                "  ...item,\n",
                "  books: bookItems.filter((model) => model.authorID === item.id),\n",
                "}));"
            )
        );
    }

    #[test]
    fn test_first_level_only_without_schema() {
        let text = print(&build_collection_statements(&author_collection(), None));

        assert!(!text.contains("const bookItems = useDataStoreBinding"));
        assert!(text.contains(
            r#"const itemsDataStore = useDataStoreBinding({ type: "collection", model: Author }).items;"#
        ));
        assert!(!text.contains("books: bookItems.filter((model) => model.authorID === item.id),"));
        assert!(text.contains("const items = itemsProp !== undefined ? itemsProp : itemsDataStore;"));
    }

    #[test]
    fn test_predicate_becomes_criteria() {
        let mut component = author_collection();
        if let Some(collections) = component.collection_properties.as_mut() {
            collections["items"].predicate = Some(json!({ "field": "name", "operand": "Ann", "operator": "eq" }));
        }
        let text = print(&build_collection_statements(&component, None));
        assert!(text.contains(
            r#"model: Author, criteria: { field: "name", operand: "Ann", operator: "eq" } }).items;"#
        ));
    }

    #[test]
    fn test_not_a_collection() {
        let component: StudioComponent =
            serde_json::from_value(json!({ "name": "Plain", "componentType": "View" })).unwrap();
        assert!(build_collection_statements(&component, None).is_empty());
    }
}
