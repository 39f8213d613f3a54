//! Object type definitions and their field resolvers.
//!
//! Every projection resolver reads data already fetched by the root field.
//! None of them performs I/O.

use serde_json::Value;

use crate::domain::entities::{Article, Image, Preview, Source};
use crate::domain::projection::ResolveResult;
use crate::graph::types::{ArgumentDef, FieldDef, ObjectType, Resolve, ScalarKind, TypeRef};

pub const QUERY: &str = "Query";
pub const ARTICLE: &str = "Article";
pub const PREVIEW: &str = "Preview";
pub const IMAGE: &str = "Image";
pub const SOURCE: &str = "Source";

const STRING: TypeRef = TypeRef::Scalar(ScalarKind::String);
const INT: TypeRef = TypeRef::Scalar(ScalarKind::Int);
const BOOLEAN: TypeRef = TypeRef::Scalar(ScalarKind::Boolean);

fn string(value: ResolveResult<Option<&str>>) -> ResolveResult<Value> {
    value.map(|v| v.map_or(Value::Null, |s| Value::String(s.to_string())))
}

fn int(value: ResolveResult<Option<i64>>) -> ResolveResult<Value> {
    value.map(|v| v.map_or(Value::Null, Value::from))
}

fn boolean(value: ResolveResult<Option<bool>>) -> ResolveResult<Value> {
    value.map(|v| v.map_or(Value::Null, Value::Bool))
}

fn list(items: ResolveResult<&[Value]>) -> ResolveResult<Value> {
    items.map(|items| Value::Array(items.to_vec()))
}

pub fn query_type() -> ObjectType {
    ObjectType {
        name: QUERY,
        description: "Root query",
        fields: vec![FieldDef {
            name: "articles",
            description: "Top articles of the upstream listing, one page per query",
            ty: TypeRef::list_of(TypeRef::Object(ARTICLE)),
            arguments: vec![
                ArgumentDef {
                    name: "limit",
                    description: "Maximum number of entries; upstream default when omitted",
                    ty: ScalarKind::Int,
                },
                ArgumentDef {
                    name: "before",
                    description: "Opaque cursor: return entries before this fullname",
                    ty: ScalarKind::String,
                },
                ArgumentDef {
                    name: "after",
                    description: "Opaque cursor: return entries after this fullname",
                    ty: ScalarKind::String,
                },
            ],
            resolve: Resolve::Upstream,
        }],
    }
}

pub fn article_type() -> ObjectType {
    ObjectType {
        name: ARTICLE,
        description: "A Reddit article",
        fields: vec![
            FieldDef::projection("id", STRING, "Upstream identifier", |v| {
                string(Article::new(v).id())
            }),
            FieldDef::projection("name", STRING, "Upstream fullname, usable as a cursor", |v| {
                string(Article::new(v).name())
            }),
            FieldDef::projection("permalink", STRING, "Path of the comments page", |v| {
                string(Article::new(v).permalink())
            }),
            FieldDef::projection("author", STRING, "Author username", |v| {
                string(Article::new(v).author())
            }),
            FieldDef::projection("created", INT, "Creation time in epoch seconds", |v| {
                int(Article::new(v).created())
            }),
            FieldDef::projection("num_comments", INT, "Number of comments", |v| {
                int(Article::new(v).num_comments())
            }),
            FieldDef::projection("thumbnail", STRING, "Thumbnail URL or a placeholder keyword", |v| {
                string(Article::new(v).thumbnail())
            }),
            FieldDef::projection("title", STRING, "Article title", |v| {
                string(Article::new(v).title())
            }),
            FieldDef::projection("visited", BOOLEAN, "Visited flag, when upstream provides it", |v| {
                boolean(Article::new(v).visited())
            }),
            FieldDef::projection("subreddit", STRING, "Subreddit name", |v| {
                string(Article::new(v).subreddit())
            }),
            FieldDef::projection("preview", TypeRef::Object(PREVIEW), "Image preview", |v| {
                Article::new(v).preview().cloned()
            }),
        ],
    }
}

pub fn preview_type() -> ObjectType {
    ObjectType {
        name: PREVIEW,
        description: "Preview metadata of an article",
        fields: vec![
            FieldDef::projection("enabled", BOOLEAN, "Whether the preview is enabled", |v| {
                boolean(Preview::new(v).enabled())
            }),
            FieldDef::projection(
                "images",
                TypeRef::list_of(TypeRef::Object(IMAGE)),
                "Preview images",
                |v| list(Preview::new(v).images()),
            ),
        ],
    }
}

pub fn image_type() -> ObjectType {
    ObjectType {
        name: IMAGE,
        description: "A preview image with its resolutions",
        fields: vec![
            FieldDef::projection("id", STRING, "Upstream image identifier", |v| {
                string(Image::new(v).id())
            }),
            FieldDef::projection("source", TypeRef::Object(SOURCE), "Full-resolution source", |v| {
                Image::new(v).source().cloned()
            }),
            FieldDef::projection(
                "resolutions",
                TypeRef::list_of(TypeRef::Object(SOURCE)),
                "Alternate resolutions",
                |v| list(Image::new(v).resolutions()),
            ),
        ],
    }
}

pub fn source_type() -> ObjectType {
    ObjectType {
        name: SOURCE,
        description: "An image URL with its dimensions",
        fields: vec![
            FieldDef::projection("url", STRING, "Image URL", |v| string(Source::new(v).url())),
            FieldDef::projection("width", INT, "Width in pixels", |v| int(Source::new(v).width())),
            FieldDef::projection("height", INT, "Height in pixels", |v| {
                int(Source::new(v).height())
            }),
        ],
    }
}
