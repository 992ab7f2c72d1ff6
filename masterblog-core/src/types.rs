use serde::{Deserialize, Serialize};

/// A blog post as served by the remote API. The server owns the record;
/// the client only ever holds the snapshot from the most recent fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub date: String,
    pub content: String,
    #[serde(default)]
    pub likes: u64,
    pub comments: Vec<String>,
}

/// Request body for creating or updating a post. Field values are taken
/// verbatim from the input fields, untrimmed and unvalidated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub author: String,
    pub date: String,
    pub content: String,
}

/// Parameters for the search endpoint. `sort` and `direction` are sent
/// as typed, the server decides what they mean.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub title: String,
    pub sort: String,
    pub direction: String,
}
