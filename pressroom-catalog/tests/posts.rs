use pressroom_catalog::{CatalogError, PostCollection, PostRecord};
use pressroom_core::Identifier;

const FEED_DUMP: &str = r#"[
  {
    "title": "Robot Rabbits",
    "link": "https://medium.com/@ink/robot-rabbits-8aacc89aecc9?source=rss",
    "guid": "https://medium.com/p/8aacc89aecc9",
    "pubDate": "Tue, 05 Mar 2024 14:30:00 GMT",
    "thumbnail": "images/rabbits.png",
    "author": "Ink",
    "contentSnippet": "Two rabbits and a robot."
  },
  {
    "title": "Robot Rabbits (republished)",
    "link": "https://medium.com/p/8aacc89aecc9",
    "thumbnail": null
  },
  {
    "title": "Announcement",
    "link": "https://example.com/about"
  },
  {
    "title": "Duck Soup",
    "guid": "https://medium.com/p/0123456789ab",
    "slug": "duck-soup",
    "featured": "yes"
  }
]"#;

#[test]
fn loads_array_with_feed_dates_and_extras() {
    let posts = PostCollection::from_json(FEED_DUMP).unwrap();
    assert_eq!(posts.len(), 4);

    let first = &posts.posts()[0];
    assert_eq!(first.pub_date.as_deref(), Some("Tue, 05 Mar 2024 14:30:00 GMT"));
    assert_eq!(first.published_at, None);
    assert_eq!(first.feed_date(), Some("Tue, 05 Mar 2024 14:30:00 GMT"));
    assert!(first.published_at_parsed().is_some());
    assert!(first.has_thumbnail());
    assert_eq!(first.extra["author"], "Ink");
    assert_eq!(first.extra["contentSnippet"], "Two rabbits and a robot.");
    assert!(!first.extra.contains_key("pubDate"));

    let second = &posts.posts()[1];
    assert_eq!(second.thumbnail, None);
    assert!(!second.has_thumbnail());

    let duck = &posts.posts()[3];
    assert_eq!(duck.slug(), Some("duck-soup"));
    assert_eq!(duck.featured, Some(true));
}

#[test]
fn loads_wrapped_object() {
    let text = format!(r#"{{ "feed": "ink", "items": {FEED_DUMP} }}"#);
    let posts = PostCollection::from_json(&text).unwrap();
    assert_eq!(posts.len(), 4);

    let text = r#"{ "posts": [ { "title": "A", "link": "https://x.test/a-111111111111" } ] }"#;
    assert_eq!(PostCollection::from_json(text).unwrap().len(), 1);
}

#[test]
fn rejects_other_shapes() {
    assert!(matches!(
        PostCollection::from_json(r#"{ "feed": "ink" }"#),
        Err(CatalogError::InvalidCollection(_))
    ));
    assert!(matches!(
        PostCollection::from_json(r#"{ "posts": 3 }"#),
        Err(CatalogError::InvalidCollection(_))
    ));
    assert!(matches!(
        PostCollection::from_json("\"posts\""),
        Err(CatalogError::InvalidCollection(_))
    ));
    assert!(matches!(
        PostCollection::from_json("[ not json"),
        Err(CatalogError::Json(_))
    ));
}

#[test]
fn identifier_prefers_link_then_guid() {
    let posts = PostCollection::from_json(FEED_DUMP).unwrap();
    let ids: Vec<Option<String>> = posts
        .iter()
        .map(|p| p.identifier().map(|i| i.to_string()))
        .collect();
    assert_eq!(
        ids,
        vec![
            Some("8aacc89aecc9".to_string()),
            Some("8aacc89aecc9".to_string()),
            None,
            Some("0123456789ab".to_string()),
        ]
    );
}

#[test]
fn groups_by_identifier_in_first_seen_order() {
    let posts = PostCollection::from_json(FEED_DUMP).unwrap();
    let grouped = posts.group_by_identifier();

    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped.duplicate_count(), 1);
    assert_eq!(grouped.groups()[0].identifier.as_str(), "8aacc89aecc9");
    assert_eq!(grouped.groups()[1].identifier.as_str(), "0123456789ab");

    let rabbits = grouped
        .get(&Identifier::parse("8aacc89aecc9").unwrap())
        .unwrap();
    assert!(rabbits.is_duplicated());
    assert_eq!(rabbits.posts[0].title, "Robot Rabbits");
    assert_eq!(rabbits.posts[1].title, "Robot Rabbits (republished)");

    assert_eq!(grouped.unidentifiable().len(), 1);
    assert_eq!(grouped.unidentifiable()[0].title, "Announcement");
}

#[test]
fn serialization_omits_absent_fields_and_keeps_extras() {
    let mut post = PostRecord::new("Robot Rabbits", "https://x.test/robot-rabbits-8aacc89aecc9");
    post.extra
        .insert("author".to_string(), serde_json::Value::from("Ink"));
    let json = PostCollection::new(vec![post.clone()])
        .to_json_pretty()
        .unwrap();
    assert!(json.contains("\"author\": \"Ink\""));
    assert!(!json.contains("slug"));
    assert!(!json.contains("thumbnail"));

    let back = PostCollection::from_json(&json).unwrap();
    assert_eq!(back.posts(), &[post]);
}

#[test]
fn feed_date_keeps_the_key_it_was_read_with() {
    let posts = PostCollection::from_json(FEED_DUMP).unwrap();
    let json = PostCollection::new(vec![posts.posts()[0].clone()])
        .to_json_pretty()
        .unwrap();
    assert!(json.contains("\"pubDate\": \"Tue, 05 Mar 2024 14:30:00 GMT\""));
    assert!(!json.contains("\"publishedAt\""));

    let back = PostCollection::from_json(&json).unwrap();
    assert_eq!(back.posts()[0], posts.posts()[0]);
}

#[test]
fn both_feed_date_keys_load_and_survive() {
    let text = r#"[
      {
        "title": "Both",
        "link": "https://medium.com/p/8aacc89aecc9",
        "pubDate": "Tue, 05 Mar 2024 14:30:00 GMT",
        "publishedAt": "2024-03-06T09:00:00Z"
      }
    ]"#;
    let posts = PostCollection::from_json(text).unwrap();
    let post = &posts.posts()[0];
    assert_eq!(post.pub_date.as_deref(), Some("Tue, 05 Mar 2024 14:30:00 GMT"));
    assert_eq!(post.published_at.as_deref(), Some("2024-03-06T09:00:00Z"));
    assert_eq!(post.feed_date(), Some("2024-03-06T09:00:00Z"));
    assert!(post.extra.is_empty());

    let json = posts.to_json_pretty().unwrap();
    assert!(json.contains("\"pubDate\""));
    assert!(json.contains("\"publishedAt\""));
}
