use super::*;

#[test]
fn album_key_is_its_id() {
    let album = Album {
        id: "4aawyAB9vmqN3uQ7FjRGTy".to_owned(),
        name: "Global Warming".to_owned(),
        artist: "Pitbull".to_owned(),
        release_date: "2012-11-16".to_owned(),
    };
    assert_eq!(album.key(), "4aawyAB9vmqN3uQ7FjRGTy");
}

#[test]
fn album_deserializes_from_api_json() {
    let json = r#"{"id":"a1","name":"Blue","artist":"Joni Mitchell","release_date":"1971-06-22"}"#;
    let album: Album = serde_json::from_str(json).unwrap();
    assert_eq!(album.name, "Blue");
    assert_eq!(album.artist, "Joni Mitchell");
    assert_eq!(album.release_date, "1971-06-22");
}

#[test]
fn user_avatar_defaults_to_none() {
    let user: User = serde_json::from_str(r#"{"id":"u1","name":"Alice"}"#).unwrap();
    assert_eq!(user, User { id: "u1".to_owned(), name: "Alice".to_owned(), avatar_url: None });
}
