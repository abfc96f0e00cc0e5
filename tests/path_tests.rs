use photobot::photo::last_path_segment;

#[test]
fn last_segment_of_url() {
    assert_eq!(
        last_path_segment("http://example.com/path/to/resource.jpg"),
        Some("resource.jpg")
    );
    assert_eq!(last_path_segment("photos/file_12.jpg"), Some("file_12.jpg"));
}

#[test]
fn ignores_empty_segments() {
    assert_eq!(last_path_segment("a/b/c/"), Some("c"));
    assert_eq!(last_path_segment("a//b///"), Some("b"));
    assert_eq!(last_path_segment("/leading"), Some("leading"));
}

#[test]
fn no_slash_is_whole_string() {
    assert_eq!(last_path_segment("file.jpg"), Some("file.jpg"));
}

#[test]
fn empty_or_absent_has_no_segment() {
    assert_eq!(last_path_segment(""), None);
    assert_eq!(last_path_segment("/"), None);
    assert_eq!(last_path_segment("////"), None);

    let absent: Option<&str> = None;
    assert_eq!(absent.and_then(last_path_segment), None);
}
