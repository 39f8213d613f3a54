//! The schema registry: every object type keyed by name.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;

use crate::graph::resolvers;
use crate::graph::types::{FieldDef, ObjectType, Resolve};

/// Immutable registry of object types.
///
/// Built once before the server accepts requests and shared behind an `Arc`;
/// nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct Schema {
    types: HashMap<&'static str, ObjectType>,
    /// Type names in declaration order, for stable SDL output.
    order: Vec<&'static str>,
}

impl Schema {
    /// Builds the canonical type graph.
    ///
    /// An earlier revision of `Article` lacked `name`, `subreddit` and
    /// `preview`; that legacy shape is a strict subset of this one.
    pub fn build() -> Self {
        Self::from_types(vec![
            resolvers::query_type(),
            resolvers::article_type(),
            resolvers::preview_type(),
            resolvers::image_type(),
            resolvers::source_type(),
        ])
    }

    fn from_types(types: Vec<ObjectType>) -> Self {
        let order = types.iter().map(|t| t.name).collect();
        let types = types.into_iter().map(|t| (t.name, t)).collect();
        Self { types, order }
    }

    /// The root query type.
    pub fn query(&self) -> &ObjectType {
        &self.types[resolvers::QUERY]
    }

    pub fn object_type(&self, name: &str) -> Option<&ObjectType> {
        self.types.get(name)
    }

    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&FieldDef> {
        self.object_type(type_name)?.field(field_name)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Wraps every projection resolver so `hook(type, field)` runs before it.
    ///
    /// Root (upstream) fields are left untouched.
    pub fn instrument<H>(mut self, hook: H) -> Self
    where
        H: Fn(&'static str, &'static str) + Send + Sync + 'static,
    {
        let hook = Arc::new(hook);
        for object in self.types.values_mut() {
            let type_name = object.name;
            for field in &mut object.fields {
                if let Resolve::Projection(inner) = &field.resolve {
                    let inner = inner.clone();
                    let hook = hook.clone();
                    let field_name = field.name;
                    field.resolve = Resolve::Projection(Arc::new(move |parent| {
                        hook(type_name, field_name);
                        inner(parent)
                    }));
                }
            }
        }
        self
    }

    /// Renders the type graph as GraphQL SDL.
    pub fn sdl(&self) -> String {
        let mut out = String::new();
        for name in &self.order {
            let object = &self.types[name];
            let _ = writeln!(out, "\"\"\"{}\"\"\"", object.description);
            let _ = writeln!(out, "type {} {{", object.name);
            for field in &object.fields {
                let _ = writeln!(out, "  \"{}\"", field.description);
                if field.arguments.is_empty() {
                    let _ = writeln!(out, "  {}: {}", field.name, field.ty);
                } else {
                    let args = field
                        .arguments
                        .iter()
                        .map(|a| format!("{}: {}", a.name, a.ty.name()))
                        .collect::<Vec<_>>()
                        .join(", ");
                    let _ = writeln!(out, "  {}({}): {}", field.name, args, field.ty);
                }
            }
            out.push_str("}\n\n");
        }
        out.push_str("schema {\n  query: Query\n}\n");
        out
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    #[test]
    fn test_registry_contents() {
        let schema = Schema::build();

        assert_eq!(schema.type_count(), 5);
        assert!(schema.query().field("articles").is_some());
        assert!(schema.field("Article", "preview").is_some());
        assert!(schema.field("Article", "score").is_none());
        assert!(schema.object_type("Comment").is_none());
    }

    #[test]
    fn test_article_field_order() {
        let schema = Schema::build();
        let names: Vec<_> = schema
            .object_type("Article")
            .unwrap()
            .fields
            .iter()
            .map(|f| f.name)
            .collect();

        assert_eq!(
            names,
            vec![
                "id",
                "name",
                "permalink",
                "author",
                "created",
                "num_comments",
                "thumbnail",
                "title",
                "visited",
                "subreddit",
                "preview"
            ]
        );
    }

    #[test]
    fn test_sdl_rendering() {
        let sdl = Schema::build().sdl();

        assert!(sdl.contains("type Query {"));
        assert!(sdl.contains("articles(limit: Int, before: String, after: String): [Article]"));
        assert!(sdl.contains("  images: [Image]"));
        assert!(sdl.contains("  preview: Preview"));
        assert!(sdl.ends_with("schema {\n  query: Query\n}\n"));
    }

    #[test]
    fn test_instrument_observes_projection_calls() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorded = calls.clone();
        let schema = Schema::build().instrument(move |ty, field| {
            recorded.lock().unwrap().push(format!("{ty}.{field}"));
        });

        let entry = json!({ "data": { "title": "Hello" } });
        if let Resolve::Projection(resolver) = &schema.field("Article", "title").unwrap().resolve {
            assert_eq!(resolver(&entry).unwrap(), json!("Hello"));
        }

        assert_eq!(*calls.lock().unwrap(), vec!["Article.title".to_string()]);
        assert!(matches!(
            schema.query().field("articles").unwrap().resolve,
            Resolve::Upstream
        ));
    }
}
