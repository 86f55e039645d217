#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use jsonapi::document::{Linkable, MetaProvider, RelationshipLinkable, RelationshipMetaProvider};
use jsonapi::{resource, scalar, Link, Links, Meta};
use serde_json::json;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

resource! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct BadModel {
        pub id: i64 => "primary",
    }
}

resource! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Bogus {
        pub id: String => "primary,bogus",
        pub name: String => "bogus,name",
    }
}

resource! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct TwoKeys {
        pub id: String => "primary,keys",
        pub other: String => "primary,other-keys",
    }
}

resource! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct ModelBadTypes {
        pub id: String => "primary,badtypes",
        pub string_field: String => "attr,string_field",
        pub float_field: f64 => "attr,float_field",
        pub time_field: DateTime<Utc> => "attr,time_field",
        pub time_ptr_field: Option<DateTime<Utc>> => "attr,time_ptr_field",
    }
}

resource! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct WithPointer {
        pub id: Option<u64> => "primary,with-pointers",
        pub name: Option<String> => "attr,name",
        pub is_active: Option<bool> => "attr,is-active",
        pub int_val: Option<i32> => "attr,int-val",
        pub float_val: Option<f32> => "attr,float-val",
    }
}

resource! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Numeric {
        pub id: String => "primary,numeric",
        pub int: i32 => "attr,int,omitempty",
        pub uint: u32 => "attr,uint,omitempty",
        pub float: f64 => "attr,float,omitempty",
    }
}

resource! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Widths {
        pub id: u8 => "primary,widths",
        pub small: i8 => "attr,small",
        pub unsigned: u16 => "attr,unsigned",
        pub wide: i64 => "attr,wide",
        pub size: usize => "attr,size",
    }
}

resource! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Timestamp {
        pub id: i64 => "primary,timestamps",
        pub time: DateTime<Utc> => "attr,timestamp,iso8601",
        pub next: Option<DateTime<Utc>> => "attr,next,iso8601",
    }
}

resource! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Car {
        pub id: Option<String> => "primary,cars",
        pub make: Option<String> => "attr,make,omitempty",
        pub model: Option<String> => "attr,model,omitempty",
        pub year: Option<u32> => "attr,year,omitempty",
    }
}

resource! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Comment {
        pub id: i64 => "primary,comments",
        pub client_id: String => "client-id",
        pub post_id: i64 => "attr,post_id",
        pub body: String => "attr,body",
    }
}

resource! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Post {
        pub id: u64 => "primary,posts",
        pub blog_id: i64 => "attr,blog_id",
        pub client_id: String => "client-id",
        pub title: String => "attr,title",
        pub body: String => "attr,body",
        pub comments: Vec<Comment> => "relation,comments",
        pub latest_comment: Option<Comment> => "relation,latest_comment",
    }
}

resource! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Blog {
        pub id: i64 => "primary,blogs",
        pub client_id: String => "client-id",
        pub title: String => "attr,title",
        pub posts: Vec<Post> => "relation,posts",
        pub current_post: Option<Box<Post>> => "relation,current_post",
        pub current_post_id: i64 => "attr,current_post_id",
        pub created_at: DateTime<Utc> => "attr,created_at",
        pub view_count: i64 => "attr,view_count",
    }
    capabilities = [linkable, relationship_linkable, meta, relationship_meta];
}

impl Linkable for Blog {
    fn links(&self) -> Option<Links> {
        let mut counts = Meta::new();
        counts.insert("counts".into(), json!({"likes": 4, "comments": 20}));
        Some(
            Links::new()
                .href("self", format!("https://example.com/api/blogs/{}", self.id))
                .link(
                    "comments",
                    Link::new(format!("https://example.com/api/blogs/{}/comments", self.id))
                        .with_meta(counts),
                ),
        )
    }
}

impl RelationshipLinkable for Blog {
    fn relationship_links(&self, relation: &str) -> Option<Links> {
        match relation {
            "posts" => {
                let mut meta = Meta::new();
                meta.insert("count".into(), json!(self.posts.len()));
                Some(Links::new().link(
                    "related",
                    Link::new(format!("https://example.com/api/blogs/{}/posts", self.id))
                        .with_meta(meta),
                ))
            }
            "current_post" => Some(
                Links::new()
                    .href("self", "https://example.com/api/posts/3")
                    .link(
                        "related",
                        Link::new(format!(
                            "https://example.com/api/blogs/{}/current_post",
                            self.id
                        )),
                    ),
            ),
            _ => None,
        }
    }
}

impl MetaProvider for Blog {
    fn meta(&self) -> Option<Meta> {
        let mut meta = Meta::new();
        meta.insert("detail".into(), json!("extra details regarding the blog"));
        Some(meta)
    }
}

impl RelationshipMetaProvider for Blog {
    fn relationship_meta(&self, relation: &str) -> Option<Meta> {
        let mut meta = Meta::new();
        match relation {
            "posts" => {
                meta.insert(
                    "this".into(),
                    json!({"can": {"go": ["as", "deep", {"as": "required"}]}}),
                );
            }
            "current_post" => {
                meta.insert("detail".into(), json!("extra current_post detail"));
            }
            _ => return None,
        }
        Some(meta)
    }
}

resource! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct BadComment {
        pub id: u64 => "primary,bad-comment",
        pub body: String => "attr,body",
    }
    capabilities = [linkable];
}

impl Linkable for BadComment {
    fn links(&self) -> Option<Links> {
        let mut links = Links::new();
        links.insert("self", json!(["invalid", "should error"]));
        Some(links)
    }
}

resource! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Book {
        pub id: u64 => "primary,books",
        pub author: String => "attr,author",
        pub isbn: String => "attr,isbn",
        pub title: String => "attr,title,omitempty",
        pub description: Option<String> => "attr,description",
        pub pages: Option<u32> => "attr,pages,omitempty",
        pub published_at: DateTime<Utc>,
        pub tags: Vec<String> => "attr,tags",
    }
}

resource! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Employee {
        pub firstname: String => "attr,firstname",
        pub surname: String => "attr,surname",
        pub age: i32 => "attr,age",
        pub hired_at: Option<DateTime<Utc>> => "attr,hired-at,iso8601",
    }
}

resource! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Team {
        pub name: String => "attr,name",
        pub leader: Option<Employee> => "attr,leader",
        pub members: Vec<Employee> => "attr,members",
    }
}

resource! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Company {
        pub id: String => "primary,companies",
        pub name: String => "attr,name",
        pub boss: Employee => "attr,boss",
        pub teams: Vec<Team> => "attr,teams",
        pub founded_at: DateTime<Utc> => "attr,founded-at,iso8601",
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CustomIntType(pub i64);

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CustomFloatType(pub f64);

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CustomStringType(pub String);

scalar!(
    CustomIntType(i64),
    CustomFloatType(f64),
    CustomStringType(String),
);

resource! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct CustomAttributeTypes {
        pub id: String => "primary,customtypes",
        pub int: CustomIntType => "attr,int",
        pub int_ptr: Option<CustomIntType> => "attr,intptr",
        pub int_ptr_null: Option<CustomIntType> => "attr,intptrnull",
        pub float: CustomFloatType => "attr,float",
        pub string: CustomStringType => "attr,string",
    }
}

resource! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Node {
        pub id: String => "primary,nodes",
        pub parent: Option<Box<Node>> => "relation,parent",
    }
}

resource! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Shelf {
        pub id: i64 => "primary,shelves",
        pub books: Option<Vec<Book>> => "relation,books",
        pub featured: Option<Book> => "relation,featured",
    }
}

resource! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Mislinked {
        pub id: String => "primary,mislinked",
        pub title: String => "relation,title",
    }
}

pub fn sample_blog() -> Blog {
    Blog {
        id: 5,
        client_id: "1".into(),
        title: "Title 1".into(),
        created_at: at(1_470_000_000),
        view_count: 1000,
        posts: vec![
            Post {
                id: 1,
                title: "Foo".into(),
                body: "Bar".into(),
                comments: vec![
                    Comment {
                        id: 1,
                        body: "foo".into(),
                        ..Default::default()
                    },
                    Comment {
                        id: 2,
                        body: "bar".into(),
                        ..Default::default()
                    },
                ],
                latest_comment: Some(Comment {
                    id: 1,
                    body: "foo".into(),
                    ..Default::default()
                }),
                ..Default::default()
            },
            Post {
                id: 2,
                title: "Fuubar".into(),
                body: "Bas".into(),
                comments: vec![Comment {
                    id: 3,
                    body: "bas".into(),
                    ..Default::default()
                }],
                ..Default::default()
            },
        ],
        current_post: Some(Box::new(Post {
            id: 1,
            title: "Foo".into(),
            body: "Bar".into(),
            ..Default::default()
        })),
        current_post_id: 1,
    }
}
