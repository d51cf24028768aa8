use serde::{Deserialize, Serialize};

/// Post - a single record in the combined remote and local list
///
/// The wire shape matches the remote list service: the owner reference is
/// serialized as `userId` (`ownerId` is accepted when reading). The local
/// cache stores the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Post {
    /// Opaque owner reference, not validated
    #[serde(rename = "userId", alias = "ownerId")]
    pub owner_id: u64,

    /// Unique within remote ∪ local records; the sort key
    pub id: u64,

    pub title: String,

    pub body: String,
}

/// A post as authored locally, before an identifier is allocated
///
/// This is also the body sent to the remote create endpoint, which never
/// receives a client-side id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    #[serde(rename = "userId", alias = "ownerId")]
    pub owner_id: u64,
    pub title: String,
    pub body: String,
}

impl NewPost {
    pub fn new(owner_id: u64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            owner_id,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Materialize the post under an allocated identifier
    pub fn into_post(self, id: u64) -> Post {
        Post {
            owner_id: self.owner_id,
            id,
            title: self.title,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_wire_shape_uses_user_id() {
        let post = NewPost::new(7, "Title", "Body").into_post(101);
        let json = serde_json::to_value(&post).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"userId": 7, "id": 101, "title": "Title", "body": "Body"})
        );
    }

    #[test]
    fn test_post_accepts_owner_id_alias() {
        let post: Post =
            serde_json::from_str(r#"{"ownerId": 3, "id": 4, "title": "t", "body": "b"}"#)
                .unwrap();

        assert_eq!(post.owner_id, 3);
        assert_eq!(post.id, 4);
    }

    #[test]
    fn test_new_post_has_no_id_on_the_wire() {
        let json = serde_json::to_value(NewPost::new(1, "T", "")).unwrap();

        assert!(json.get("id").is_none());
        assert_eq!(json["userId"], 1);
    }
}
