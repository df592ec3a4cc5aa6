/// Routes an extracted (method, path) pair into one of a closed set of
/// endpoint categories. Classification is total: every event lands in
/// exactly one category, with `Other` as the catch-all.
use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CategoryKey {
    PendingMessages,
    GetMessages,
    GetFriendsProgress,
    GetFriendsScore,
    UserGet,
    UserPost,
    Other,
}

impl CategoryKey {
    /// Fixed emission order for reports.
    pub const ALL: [CategoryKey; 7] = [
        CategoryKey::PendingMessages,
        CategoryKey::GetMessages,
        CategoryKey::GetFriendsProgress,
        CategoryKey::GetFriendsScore,
        CategoryKey::UserGet,
        CategoryKey::UserPost,
        CategoryKey::Other,
    ];

    pub fn endpoint(&self) -> &'static str {
        match self {
            CategoryKey::PendingMessages => "GET /api/users/{user_id}/count_pending_messages",
            CategoryKey::GetMessages => "GET /api/users/{user_id}/get_messages",
            CategoryKey::GetFriendsProgress => "GET /api/users/{user_id}/get_friends_progress",
            CategoryKey::GetFriendsScore => "GET /api/users/{user_id}/get_friends_score",
            CategoryKey::UserGet => "GET /api/users/{user_id}",
            CategoryKey::UserPost => "POST /api/users/{user_id}",
            CategoryKey::Other => "unrecognized endpoints",
        }
    }
}

// Ordered by precedence: "get_messages" must win over the generic "users"
// substring even though "users" occurs earlier in a path like
// /api/users/42/get_messages.
const GET_PATTERNS: [&str; 5] = [
    "count_pending_messages",
    "get_messages",
    "get_friends_progress",
    "get_friends_score",
    "users",
];

const GET_CATEGORIES: [CategoryKey; 5] = [
    CategoryKey::PendingMessages,
    CategoryKey::GetMessages,
    CategoryKey::GetFriendsProgress,
    CategoryKey::GetFriendsScore,
    CategoryKey::UserGet,
];

static GET_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| AhoCorasick::new(GET_PATTERNS).unwrap());

/// Classify one event. Case-sensitive substring matching against the path;
/// precedence among the GET patterns is by pattern index, not by match
/// position.
pub fn classify(method: Option<&str>, path: Option<&str>) -> CategoryKey {
    match method {
        Some("POST") => {
            if path.map_or(false, |p| p.contains("users")) {
                CategoryKey::UserPost
            } else {
                CategoryKey::Other
            }
        }
        Some("GET") => path
            .and_then(|p| {
                GET_MATCHER
                    .find_overlapping_iter(p)
                    .map(|m| m.pattern().as_usize())
                    .min()
            })
            .map_or(CategoryKey::Other, |idx| GET_CATEGORIES[idx]),
        _ => CategoryKey::Other,
    }
}
