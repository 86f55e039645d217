mod common;

use chrono::{DateTime, Utc};
use jsonapi::resource;
use proptest::prelude::*;

use common::*;

resource! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Sample {
        pub id: i64 => "primary,samples",
        pub name: String => "attr,name",
        pub count: u32 => "attr,count",
        pub small: i8 => "attr,small",
        pub big: u64 => "attr,big",
        pub ratio: f64 => "attr,ratio",
        pub fraction: f32 => "attr,fraction,omitempty",
        pub flag: bool => "attr,flag",
        pub tags: Vec<String> => "attr,tags",
        pub note: Option<String> => "attr,note",
        pub seen: DateTime<Utc> => "attr,seen",
        pub stamped: DateTime<Utc> => "attr,stamped,iso8601",
        pub size: CustomIntType => "attr,size,omitempty",
    }
}

fn sample() -> impl Strategy<Value = Sample> {
    (
        (any::<i64>(), ".*", any::<u32>(), any::<i8>(), any::<u64>()),
        (-1e12f64..1e12, -1e6f32..1e6, any::<bool>()),
        (
            prop::collection::vec("[a-z]{0,8}", 0..5),
            prop::option::of("[ -~]{0,12}"),
        ),
        (0i64..4_000_000_000, 0i64..4_000_000_000, any::<i64>()),
    )
        .prop_map(
            |((id, name, count, small, big), (ratio, fraction, flag), (tags, note), (seen, stamped, size))| {
                Sample {
                    id,
                    name,
                    count,
                    small,
                    big,
                    ratio,
                    fraction,
                    flag,
                    tags,
                    note,
                    seen: at(seen),
                    stamped: at(stamped),
                    size: CustomIntType(size),
                }
            },
        )
}

fn comment() -> impl Strategy<Value = (String, i64)> {
    ("[a-z ]{0,16}", any::<i64>())
}

proptest! {
    #[test]
    fn attributes_survive_a_round_trip(record in sample()) {
        let value = jsonapi::to_value(&record).unwrap();
        let back: Sample = jsonapi::from_value(&value).unwrap();
        prop_assert_eq!(back, record);
    }

    #[test]
    fn text_round_trip_keeps_integers_and_strings(record in sample()) {
        let text = jsonapi::to_string(&record).unwrap();
        let back: Sample = jsonapi::from_str(&text).unwrap();
        prop_assert_eq!(back.id, record.id);
        prop_assert_eq!(back.name, record.name);
        prop_assert_eq!(back.big, record.big);
        prop_assert_eq!(back.tags, record.tags);
        prop_assert_eq!(back.stamped, record.stamped);
    }

    #[test]
    fn to_many_relations_keep_order_and_length(
        ids in prop::collection::hash_set(any::<i64>(), 0..8),
        bodies in prop::collection::vec(comment(), 8),
    ) {
        let comments: Vec<Comment> = ids
            .into_iter()
            .zip(bodies)
            .map(|(id, (body, post_id))| Comment {
                id,
                body,
                post_id,
                ..Default::default()
            })
            .collect();
        let post = Post {
            id: 1,
            title: "ordered".into(),
            comments,
            ..Default::default()
        };

        let doc = jsonapi::to_document(&post).unwrap();
        prop_assert_eq!(doc.included().len(), post.comments.len());
        let back: Post = jsonapi::from_document(&doc).unwrap();
        prop_assert_eq!(back, post);
    }

    #[test]
    fn collections_round_trip(records in prop::collection::vec(sample(), 0..4)) {
        let doc = jsonapi::to_document_many(&records).unwrap();
        let back: Vec<Sample> = jsonapi::many_from_document(&doc).unwrap();
        prop_assert_eq!(back, records);
    }
}

#[test]
fn blog_graph_round_trips_through_included() {
    let blog = sample_blog();
    let bytes = jsonapi::to_vec(&blog).unwrap();
    let back: Blog = jsonapi::from_slice(&bytes).unwrap();

    assert_eq!(back.id, blog.id);
    assert_eq!(back.title, blog.title);
    assert_eq!(back.created_at, blog.created_at);
    assert!(back.client_id.is_empty());
    assert_eq!(back.posts.len(), 2);
    assert_eq!(back.posts[0].title, "Foo");
    assert_eq!(back.posts[1].title, "Fuubar");

    let bodies: Vec<&str> = back.posts[0].comments.iter().map(|c| c.body.as_str()).collect();
    assert_eq!(bodies, ["foo", "bar"]);
    assert_eq!(back.posts[1].comments[0].body, "bas");
    assert_eq!(back.posts[0].latest_comment.as_ref().unwrap().body, "foo");

    // `current_post` resolves to the richer post 1 that was side-loaded first.
    let current = back.current_post.unwrap();
    assert_eq!(current.id, 1);
    assert_eq!(current.comments.len(), 2);
    assert_eq!(current.comments[1].body, "bar");
}
