use streetfind::{CatalogBuilder, Point, Query};

/// Places entities on the lat axis so that their distance from the origin
/// equals the given value.
fn catalog_at(entries: &[(u32, &str, f64)]) -> streetfind::Catalog {
    let mut builder = CatalogBuilder::new();
    for &(id, name, distance) in entries {
        builder.add(id, name, Point::new(distance, 0.0));
    }
    builder.finish()
}

fn ids(hits: &[streetfind::Candidate]) -> Vec<u32> {
    hits.iter().map(|c| c.id).collect()
}

#[test]
fn nearest_two_of_three() {
    let catalog = catalog_at(&[(3, "rua tres", 5.0), (7, "rua sete", 1.0), (9, "rua nove", 3.0)]);
    let hits = catalog.search("rua", Point::new(0.0, 0.0), 2);
    assert_eq!(ids(&hits), vec![7, 9]);
    assert_eq!(hits[0].distance, 1.0);
    assert_eq!(hits[1].distance, 3.0);
}

#[test]
fn only_common_ids_are_considered() {
    // "a" -> {1,2,3}, "b" -> {2,3,4}
    let catalog = catalog_at(&[(1, "a", 1.0), (2, "a b", 2.0), (3, "a b", 3.0), (4, "b", 4.0)]);
    assert_eq!(catalog.engine().matching_ids(&["a", "b"]), vec![2, 3]);
    let hits = catalog.search("a b", Point::new(0.0, 0.0), 10);
    assert_eq!(ids(&hits), vec![2, 3]);
    let reversed = catalog.search("b a", Point::new(0.0, 0.0), 10);
    assert_eq!(ids(&reversed), vec![2, 3]);
}

#[test]
fn unknown_token_empties_the_result() {
    let catalog = catalog_at(&[(1, "rua alfa", 1.0), (2, "rua beta", 2.0)]);
    assert!(catalog.search("rua gama", Point::new(0.0, 0.0), 10).is_empty());
    assert!(catalog.search("gama rua", Point::new(0.0, 0.0), 10).is_empty());
}

#[test]
fn empty_query_text() {
    let catalog = catalog_at(&[(1, "rua alfa", 1.0)]);
    assert!(catalog.search("", Point::new(0.0, 0.0), 10).is_empty());
    assert!(catalog.search("   ", Point::new(0.0, 0.0), 10).is_empty());
}

#[test]
fn matching_is_case_sensitive() {
    let catalog = catalog_at(&[(1, "RUA ALFA", 1.0)]);
    assert!(catalog.search("rua", Point::new(0.0, 0.0), 10).is_empty());
    assert_eq!(catalog.search("RUA", Point::new(0.0, 0.0), 10).len(), 1);
}

#[test]
fn distance_uses_centroid() {
    let mut builder = CatalogBuilder::new();
    builder.add(1, "RUA", Point::new(0.0, 0.0));
    builder.add(1, "RUA", Point::new(6.0, 8.0));
    builder.add(2, "RUA", Point::new(4.0, 4.0));
    let catalog = builder.finish();
    let query = Query { id: 1, text: "RUA".into(), origin: Point::new(0.0, 0.0), cap: 5 };
    let hits = catalog.run(&query);
    // entity 1 centroid is (3, 4): distance 5; entity 2 is sqrt(32)
    assert_eq!(ids(&hits), vec![1, 2]);
    assert!((hits[0].distance - 5.0).abs() < 1e-12);
}

#[test]
fn results_never_exceed_cap() {
    let entries: Vec<(u32, &str, f64)> = (0..50).map(|i| (i, "AVENIDA", f64::from(50 - i))).collect();
    let catalog = catalog_at(&entries);
    let hits = catalog.search("AVENIDA", Point::new(0.0, 0.0), 5);
    assert_eq!(ids(&hits), vec![49, 48, 47, 46, 45]);
}
