use hereabouts::domain::{CacheKey, Coordinate};

fn point(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).unwrap()
}

#[test]
fn given_coordinates_rounding_to_same_point_when_deriving_then_keys_match() {
    let a = CacheKey::derive(point(41.52345, -71.41777), 4, &[]);
    let b = CacheKey::derive(point(41.52344, -71.41776), 4, &[]);
    assert_eq!(a, b);
}

#[test]
fn given_coordinates_rounding_apart_when_deriving_then_keys_differ() {
    let a = CacheKey::derive(point(41.52345, -71.41777), 4, &[]);
    let b = CacheKey::derive(point(41.52355, -71.41777), 4, &[]);
    assert_ne!(a, b);
}

#[test]
fn given_any_input_when_deriving_then_key_is_64_hex_chars() {
    let key = CacheKey::derive(point(41.5292, -71.4188), 4, &["surroundings", "en"]);
    assert_eq!(key.as_str().len(), 64);
    assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(key.to_string(), key.as_str());
}

#[test]
fn given_same_input_when_deriving_twice_then_deterministic() {
    let a = CacheKey::derive(point(41.5292, -71.4188), 4, &["x"]);
    let b = CacheKey::derive(point(41.5292, -71.4188), 4, &["x"]);
    assert_eq!(a, b);
}

#[test]
fn given_different_discriminators_when_deriving_then_keys_differ() {
    let at = point(41.5292, -71.4188);
    let english = CacheKey::derive(at, 4, &["en"]);
    let french = CacheKey::derive(at, 4, &["fr"]);
    assert_ne!(english, french);
}

#[test]
fn given_joined_versus_split_discriminators_when_deriving_then_keys_differ() {
    let at = point(41.5292, -71.4188);
    let joined = CacheKey::derive(at, 4, &["a|b"]);
    let split = CacheKey::derive(at, 4, &["a", "b"]);
    assert_ne!(joined, split);
}

#[test]
fn given_coarser_precision_when_deriving_then_more_points_collapse() {
    let a = point(41.5292, -71.4188);
    let b = point(41.5294, -71.4186);
    assert_ne!(CacheKey::derive(a, 4, &[]), CacheKey::derive(b, 4, &[]));
    assert_eq!(CacheKey::derive(a, 3, &[]), CacheKey::derive(b, 3, &[]));
}
