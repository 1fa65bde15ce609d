//! Unit tests for base64 and data URL helpers

use creative_banana::response::base64;

#[test]
fn test_base64_encode_decode() {
    let original = b"Hello, World!";
    let encoded = base64::encode(original);
    let decoded = base64::decode(&encoded).unwrap();

    assert_eq!(original.as_slice(), decoded.as_slice());
}

#[test]
fn test_base64_decode_data_url() {
    let data_url = "data:image/png;base64,SGVsbG8sIFdvcmxkIQ==";
    let decoded = base64::decode(data_url).unwrap();

    assert_eq!(b"Hello, World!", decoded.as_slice());
}

#[test]
fn test_create_data_url() {
    let payload = base64::encode(b"test data");
    let data_url = base64::create_data_url(&payload, "image/webp");

    assert!(data_url.starts_with("data:image/webp;base64,"));

    // Verify we can decode it back
    let decoded = base64::decode(&data_url).unwrap();
    assert_eq!(b"test data".as_slice(), decoded.as_slice());
}

#[test]
fn test_strip_data_url_prefix() {
    assert_eq!(base64::strip_data_url_prefix("data:image/gif;base64,R0lG"), "R0lG");
    assert_eq!(base64::strip_data_url_prefix("R0lG"), "R0lG");
}
